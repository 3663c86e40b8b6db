//! # Channel Builder
//!
//! Turns a [`ChannelConfig`] into a `tonic` [`Channel`].
//!
//! Secure channels (the default) validate the server certificate against, in order:
//!
//! 1. the root certificate set with [`ChannelConfig::with_root_certificate`], if any;
//! 2. the root certificate bundled with the library (feature `bundled-root-cert`);
//! 3. the system trust store, when the crate is built without that feature.
//!
//! Insecure (plaintext) channels are only used when explicitly requested, through
//! [`TlsMode::Insecure`] or the `DISPATCH_API_INSECURE` environment variable.
use std::time::Duration;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};
use tracing::info;

/// Environment variable that switches [`TlsMode::from_env`] to insecure mode.
pub const INSECURE_ENV_VAR: &str = "DISPATCH_API_INSECURE";

/// Root certificate compiled into the library, used when no override is configured.
#[cfg(feature = "bundled-root-cert")]
pub const BUNDLED_ROOT_CERTIFICATE: &[u8] = include_bytes!("../certs/dispatch-root-ca.pem");

/// Errors that can occur when building a channel.
#[derive(Debug, thiserror::Error)]
pub enum ClientConnectError {
    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, #[source] tonic::transport::Error),
    #[error("Invalid TLS configuration for '{0}': {1}")]
    Tls(String, #[source] tonic::transport::Error),
    #[error("Failed to connect to '{0}': {1}")]
    ConnectionFailed(String, #[source] tonic::transport::Error),
    #[error("Invalid API key: {0}")]
    InvalidApiKey(#[source] tonic::metadata::errors::InvalidMetadataValue),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    #[default]
    Secure,
    /// Plaintext HTTP/2, no certificate validation.
    Insecure,
}

impl TlsMode {
    /// Reads `DISPATCH_API_INSECURE`. Unset or unrecognised values mean [`TlsMode::Secure`].
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(INSECURE_ENV_VAR).ok().as_deref())
    }

    /// `1`, `true`, `yes` and `on` (any case) select [`TlsMode::Insecure`].
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v)
                if ["1", "true", "yes", "on"]
                    .iter()
                    .any(|truthy| v.eq_ignore_ascii_case(truthy)) =>
            {
                TlsMode::Insecure
            }
            _ => TlsMode::Secure,
        }
    }
}

/// How to reach the dispatch service. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    address: String,
    tls: TlsMode,
    root_certificate: Option<Vec<u8>>,
    auto_connect: bool,
    connect_timeout: Option<Duration>,
}

impl ChannelConfig {
    /// Secure, eagerly connected channel to `address`.
    ///
    /// `address` may be `host:port` or carry a `grpc://`, `http://` or `https://` scheme;
    /// the scheme actually used follows the TLS mode.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            tls: TlsMode::Secure,
            root_certificate: None,
            auto_connect: true,
            connect_timeout: None,
        }
    }

    pub fn with_tls_mode(mut self, tls: TlsMode) -> Self {
        self.tls = tls;
        self
    }

    /// PEM encoded root certificate that replaces the bundled one.
    pub fn with_root_certificate(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.root_certificate = Some(pem.into());
        self
    }

    /// When `false`, the connection is deferred until the first request.
    pub fn with_auto_connect(mut self, auto_connect: bool) -> Self {
        self.auto_connect = auto_connect;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn tls_mode(&self) -> TlsMode {
        self.tls
    }

    pub fn root_certificate(&self) -> Option<&[u8]> {
        self.root_certificate.as_deref()
    }

    pub fn auto_connect(&self) -> bool {
        self.auto_connect
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    /// The URI handed to `tonic`: `https://` for secure channels, `http://` otherwise.
    pub fn uri(&self) -> String {
        let authority = ["grpc://", "http://", "https://"]
            .iter()
            .find_map(|scheme| self.address.strip_prefix(scheme))
            .unwrap_or(self.address.as_str());

        let scheme = match self.tls {
            TlsMode::Secure => "https",
            TlsMode::Insecure => "http",
        };

        format!("{scheme}://{authority}")
    }
}

/// Builds a channel. Never retries; a failed handshake is reported as is.
pub async fn build_channel(config: &ChannelConfig) -> Result<Channel, ClientConnectError> {
    let uri = config.uri();

    let mut endpoint = Endpoint::from_shared(uri.clone())
        .map_err(|e| ClientConnectError::InvalidUrl(uri.clone(), e))?;

    if let Some(timeout) = config.connect_timeout {
        endpoint = endpoint.connect_timeout(timeout);
    }

    if config.tls == TlsMode::Secure {
        endpoint = endpoint
            .tls_config(tls_config(config))
            .map_err(|e| ClientConnectError::Tls(uri.clone(), e))?;
    }

    if !config.auto_connect {
        return Ok(endpoint.connect_lazy());
    }

    let channel = endpoint
        .connect()
        .await
        .map_err(|e| ClientConnectError::ConnectionFailed(uri.clone(), e))?;

    info!(%uri, tls = ?config.tls, "connected to dispatch service");

    Ok(channel)
}

fn tls_config(config: &ChannelConfig) -> ClientTlsConfig {
    let tls = ClientTlsConfig::new();
    match config.root_certificate() {
        Some(pem) => tls.ca_certificate(Certificate::from_pem(pem)),
        None => default_trust(tls),
    }
}

#[cfg(feature = "bundled-root-cert")]
fn default_trust(tls: ClientTlsConfig) -> ClientTlsConfig {
    tls.ca_certificate(Certificate::from_pem(BUNDLED_ROOT_CERTIFICATE))
}

#[cfg(not(feature = "bundled-root-cert"))]
fn default_trust(tls: ClientTlsConfig) -> ClientTlsConfig {
    tls.with_native_roots()
}
