use dispatch_client::proto::dispatch::v1::microgrid_dispatch_service_server::MicrogridDispatchServiceServer;
use dispatch_client::tonic::service::interceptor::InterceptedService;
use dispatch_client::tonic::transport::{Identity, Server, ServerTlsConfig};
use dispatch_client::tonic::{Code, Request, Status};
use dispatch_client::{
    ChannelConfig, ClientConnectError, ComponentSelector, DispatchClient, ListFilter,
    MicrogridId, NewDispatch, RetryPolicy, TlsMode,
};
use dispatch_testing::FakeService;
use rcgen::{BasicConstraints, CertificateParams, IsCa, KeyPair};
use std::net::SocketAddr;
use std::time::{Duration, SystemTime};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;

struct TestPki {
    ca_pem: String,
    identity: Identity,
}

fn generate_pki() -> TestPki {
    let ca_key = KeyPair::generate().unwrap();
    let mut ca_params = CertificateParams::new(Vec::<String>::new()).unwrap();
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    let ca_cert = ca_params.self_signed(&ca_key).unwrap();

    let server_key = KeyPair::generate().unwrap();
    let server_params =
        CertificateParams::new(vec!["localhost".to_string(), "127.0.0.1".to_string()]).unwrap();
    let server_cert = server_params
        .signed_by(&server_key, &ca_cert, &ca_key)
        .unwrap();

    TestPki {
        ca_pem: ca_cert.pem(),
        identity: Identity::from_pem(server_cert.pem(), server_key.serialize_pem()),
    }
}

async fn serve(tls: Option<Identity>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut builder = Server::builder();
    if let Some(identity) = tls {
        builder = builder
            .tls_config(ServerTlsConfig::new().identity(identity))
            .unwrap();
    }

    let router = builder.add_service(MicrogridDispatchServiceServer::new(FakeService::new()));
    tokio::spawn(router.serve_with_incoming(TcpListenerStream::new(listener)));

    addr
}

fn new_dispatch() -> NewDispatch {
    NewDispatch::new(
        "TEST",
        SystemTime::now() + Duration::from_secs(60 * 60),
        Duration::from_secs(60),
        ComponentSelector::Ids(vec![1, 2]),
    )
}

#[tokio::test]
async fn test_override_certificate_is_trusted() {
    let pki = generate_pki();
    let addr = serve(Some(pki.identity)).await;

    let config = ChannelConfig::new(format!("grpc://{addr}"))
        .with_root_certificate(pki.ca_pem)
        .with_connect_timeout(Duration::from_secs(5));
    let client = DispatchClient::connect(&config).await.unwrap();

    let created = client.create(MicrogridId(3), new_dispatch()).await.unwrap();
    let listed = client
        .list(MicrogridId(3), ListFilter::default(), None)
        .collect()
        .await
        .unwrap();

    assert_eq!(listed, vec![created]);
}

#[cfg(feature = "bundled-root-cert")]
#[tokio::test]
async fn test_bundled_certificate_rejects_unknown_server() {
    let pki = generate_pki();
    let addr = serve(Some(pki.identity)).await;

    let config = ChannelConfig::new(format!("grpc://{addr}"))
        .with_connect_timeout(Duration::from_secs(5));
    let err = DispatchClient::connect(&config).await.unwrap_err();

    assert!(matches!(err, ClientConnectError::ConnectionFailed(..)));
}

#[tokio::test]
async fn test_lazy_channel_reports_handshake_failure_on_first_request() {
    let pki = generate_pki();
    let other = generate_pki();
    let addr = serve(Some(pki.identity)).await;

    let config = ChannelConfig::new(format!("grpc://{addr}"))
        .with_root_certificate(other.ca_pem)
        .with_auto_connect(false);
    let client = DispatchClient::connect(&config)
        .await
        .unwrap()
        .with_retry_policy(RetryPolicy::new(0));

    let result = client
        .list(MicrogridId(3), ListFilter::default(), None)
        .collect()
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_insecure_channel_talks_plaintext() {
    let addr = serve(None).await;

    let config = ChannelConfig::new(addr.to_string()).with_tls_mode(TlsMode::Insecure);
    let client = DispatchClient::connect(&config).await.unwrap();

    let created = client.create(MicrogridId(3), new_dispatch()).await.unwrap();
    let fetched = client.get(MicrogridId(3), created.id).await.unwrap();

    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_secure_channel_fails_against_plaintext_server() {
    let addr = serve(None).await;

    let config =
        ChannelConfig::new(addr.to_string()).with_connect_timeout(Duration::from_secs(5));
    let err = DispatchClient::connect(&config).await.unwrap_err();

    assert!(matches!(err, ClientConnectError::ConnectionFailed(..)));
}

fn require_key(request: Request<()>) -> Result<Request<()>, Status> {
    match request.metadata().get("key") {
        Some(key) if key.as_bytes() == b"secret" => Ok(request),
        _ => Err(Status::unauthenticated("invalid API key")),
    }
}

#[tokio::test]
async fn test_api_key_is_sent_as_metadata() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let service = InterceptedService::new(
        MicrogridDispatchServiceServer::new(FakeService::new()),
        require_key,
    );
    tokio::spawn(
        Server::builder()
            .add_service(service)
            .serve_with_incoming(TcpListenerStream::new(listener)),
    );

    let config = ChannelConfig::new(addr.to_string()).with_tls_mode(TlsMode::Insecure);
    let client = DispatchClient::connect(&config).await.unwrap();

    let err = client
        .get(MicrogridId(3), 1.into())
        .await
        .unwrap_err();
    assert!(
        matches!(&err, dispatch_client::RequestError::Transport(e) if e.code() == Code::Unauthenticated)
    );

    let client = client.with_api_key("secret").unwrap();
    let err = client
        .get(MicrogridId(3), 1.into())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
