use crate::service::FakeService;
use dispatch_client::proto::dispatch::v1::microgrid_dispatch_service_server::MicrogridDispatchServiceServer;
use dispatch_client::{DispatchClient, RetryPolicy};
use std::ops::Deref;

/// The fake service, served in-process as a `tonic` service.
pub type FakeTransport = MicrogridDispatchServiceServer<FakeService>;

/// A [`DispatchClient`] talking to a [`FakeService`] without any network.
///
/// Dereferences to the wrapped client, so every client operation is available directly.
/// [`FakeClient::service`] gives access to the backing store for seeding and assertions.
#[derive(Debug, Clone)]
pub struct FakeClient {
    client: DispatchClient<FakeTransport>,
    service: FakeService,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::with_service(FakeService::new())
    }

    pub fn with_service(service: FakeService) -> Self {
        let transport = MicrogridDispatchServiceServer::new(service.clone());
        let client = DispatchClient::from_service(transport);
        Self { client, service }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.client = self.client.with_retry_policy(retry);
        self
    }

    pub fn service(&self) -> &FakeService {
        &self.service
    }
}

impl Default for FakeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for FakeClient {
    type Target = DispatchClient<FakeTransport>;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}
