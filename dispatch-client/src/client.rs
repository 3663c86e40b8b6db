//! # Dispatch Client
//!
//! [`DispatchClient`] is the public facade of the crate. It owns one channel to the service
//! for its whole lifetime and exposes the dispatch operations, each scoped by a
//! [`MicrogridId`].
//!
//! The client is cheap to clone and every operation takes `&self`, so one instance can be
//! shared by concurrent tasks; requests are multiplexed over the same HTTP/2 connection.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dispatch_client::{ChannelConfig, DispatchClient, ListFilter, MicrogridId};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ChannelConfig::new("grpc://dispatch.example.com:443");
//! let client = DispatchClient::connect(&config).await?.with_api_key("secret")?;
//!
//! let mut dispatches = client.list(MicrogridId(42), ListFilter::default(), None);
//! while let Some(dispatch) = dispatches.next().await {
//!     println!("{:?}", dispatch?);
//! }
//! # Ok(())
//! # }
//! ```
use crate::BoxError;
use crate::channel::{self, ChannelConfig, ClientConnectError};
use crate::grpc::{DispatchGrpcClient, TransportError};
use crate::mapping::MappingError;
use crate::pagination::{ContractError, ListPager, PageToken, RetryPolicy};
use crate::types::{
    Dispatch, DispatchId, DispatchUpdate, ListFilter, ListParams, MicrogridId, NewDispatch,
    SortOptions,
};
use http_body::Body as HttpBody;
use std::time::SystemTime;
use tonic::{Code, client::GrpcService, transport::Channel};
use tracing::debug;

/// Errors returned by the single-call operations (create, update, get, delete).
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Malformed response: {0}")]
    Mapping(#[from] MappingError),
}

impl RequestError {
    /// `true` when the service reported that the dispatch does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RequestError::Transport(err) if err.code() == Code::NotFound)
    }
}

#[derive(Debug, Clone)]
pub struct DispatchClient<S = Channel> {
    grpc: DispatchGrpcClient<S>,
    retry: RetryPolicy,
}

impl DispatchClient<Channel> {
    /// Builds the channel described by `config` and wraps it in a client.
    ///
    /// With `auto_connect` set (the default) the connection, including the TLS handshake,
    /// is established here and failures are reported as [`ClientConnectError`]. Otherwise
    /// the connection is made on first use.
    pub async fn connect(config: &ChannelConfig) -> Result<Self, ClientConnectError> {
        let channel = channel::build_channel(config).await?;
        Ok(Self::from_service(channel))
    }
}

impl<S> DispatchClient<S>
where
    S: GrpcService<tonic::body::Body> + Clone,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    /// Creates a client from an existing Tonic service/channel.
    pub fn from_service(service: S) -> Self {
        Self {
            grpc: DispatchGrpcClient::new(service),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_api_key(mut self, key: &str) -> Result<Self, ClientConnectError> {
        self.grpc = self
            .grpc
            .with_api_key(key)
            .map_err(ClientConnectError::InvalidApiKey)?;
        Ok(self)
    }

    /// Retry policy applied by the pagers this client creates.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Lists the dispatches of a microgrid.
    ///
    /// Nothing is sent until the returned pager is driven.
    pub fn list(
        &self,
        microgrid_id: MicrogridId,
        filter: ListFilter,
        sort: Option<SortOptions>,
    ) -> ListPager<DispatchGrpcClient<S>> {
        let mut params = ListParams::new(microgrid_id).with_filter(filter);
        params.sort = sort;
        self.list_with(params)
    }

    /// Like [`DispatchClient::list`], with full control over the parameters (page size).
    pub fn list_with(&self, params: ListParams) -> ListPager<DispatchGrpcClient<S>> {
        debug!(microgrid_id = %params.microgrid_id, "listing dispatches");
        ListPager::new(self.grpc.clone(), params, self.retry)
    }

    /// Continues a listing from a token taken from an earlier pager.
    pub fn resume_list(
        &self,
        params: ListParams,
        token: PageToken,
    ) -> Result<ListPager<DispatchGrpcClient<S>>, ContractError> {
        ListPager::resume(self.grpc.clone(), params, token, self.retry)
    }

    /// Creates a dispatch. Its start time must lie in the future.
    pub async fn create(
        &self,
        microgrid_id: MicrogridId,
        new: NewDispatch,
    ) -> Result<Dispatch, RequestError> {
        if new.start_time <= SystemTime::now() {
            return Err(RequestError::InvalidArgument(
                "start_time must not be in the past".to_string(),
            ));
        }

        debug!(%microgrid_id, dispatch_type = %new.dispatch_type, "creating dispatch");
        self.grpc.clone().create(microgrid_id, &new).await
    }

    /// Applies `changes` to a dispatch and returns the modified record.
    pub async fn update(
        &self,
        microgrid_id: MicrogridId,
        dispatch_id: DispatchId,
        changes: &DispatchUpdate,
    ) -> Result<Dispatch, RequestError> {
        if changes.is_empty() {
            return Err(RequestError::InvalidArgument(
                "update contains no changes".to_string(),
            ));
        }

        debug!(%microgrid_id, %dispatch_id, fields = ?changes.mask_paths(), "updating dispatch");
        self.grpc
            .clone()
            .update(microgrid_id, dispatch_id, changes)
            .await
    }

    pub async fn get(
        &self,
        microgrid_id: MicrogridId,
        dispatch_id: DispatchId,
    ) -> Result<Dispatch, RequestError> {
        self.grpc.clone().get(microgrid_id, dispatch_id).await
    }

    pub async fn delete(
        &self,
        microgrid_id: MicrogridId,
        dispatch_id: DispatchId,
    ) -> Result<(), RequestError> {
        debug!(%microgrid_id, %dispatch_id, "deleting dispatch");
        self.grpc.clone().delete(microgrid_id, dispatch_id).await
    }
}
