use crate::BoxError;
use crate::client::RequestError;
use crate::mapping;
use crate::pagination::{ListError, Page, PageFetcher, PageToken};
use crate::proto::dispatch::v1 as pb;
use crate::proto::dispatch::v1::microgrid_dispatch_service_client::MicrogridDispatchServiceClient;
use crate::types::{Dispatch, DispatchId, DispatchUpdate, ListParams, MicrogridId, NewDispatch};
use http_body::Body as HttpBody;
use std::str::FromStr;
use std::sync::Arc;
use tonic::{
    Code, Status,
    client::GrpcService,
    metadata::{AsciiMetadataValue, errors::InvalidMetadataValue},
    transport::Channel,
};
use tracing::debug;

/// Metadata key carrying the API key.
pub const API_KEY_METADATA: &str = "key";

/// A failed call: network failure or an error status returned by the service.
#[derive(Debug, Clone, thiserror::Error)]
#[error("gRPC call failed with code {:?}: {}", .0.code(), .0.message())]
pub struct TransportError(pub Status);

impl TransportError {
    pub fn code(&self) -> Code {
        self.0.code()
    }

    pub fn status(&self) -> &Status {
        &self.0
    }

    /// `Unavailable` and `DeadlineExceeded` are transient; everything else is final.
    pub fn is_retriable(&self) -> bool {
        matches!(self.code(), Code::Unavailable | Code::DeadlineExceeded)
    }
}

impl From<Status> for TransportError {
    fn from(status: Status) -> Self {
        Self(status)
    }
}

/// Typed client for the dispatch service.
///
/// Cloning is cheap when `S` is a [`Channel`]; clones share the underlying connection.
#[derive(Debug, Clone)]
pub struct DispatchGrpcClient<S = Channel> {
    inner: MicrogridDispatchServiceClient<S>,
    api_key: Option<AsciiMetadataValue>,
}

impl<S> DispatchGrpcClient<S>
where
    S: GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    pub fn new(service: S) -> Self {
        Self {
            inner: MicrogridDispatchServiceClient::new(service),
            api_key: None,
        }
    }

    /// Sends `key` as the `key` metadata entry of every request.
    pub fn with_api_key(mut self, key: &str) -> Result<Self, InvalidMetadataValue> {
        self.api_key = Some(AsciiMetadataValue::from_str(key)?);
        Ok(self)
    }

    /// Fetches one page of a listing.
    pub async fn list(
        &mut self,
        params: &ListParams,
        page_token: Option<&str>,
    ) -> Result<pb::ListMicrogridDispatchesResponse, TransportError> {
        let request = self.request(mapping::list_request(params, page_token));
        let response = self.inner.list_microgrid_dispatches(request).await?;
        Ok(response.into_inner())
    }

    pub async fn create(
        &mut self,
        microgrid_id: MicrogridId,
        new: &NewDispatch,
    ) -> Result<Dispatch, RequestError> {
        let request = self.request(mapping::create_request(microgrid_id, new)?);
        let response = self
            .inner
            .create_microgrid_dispatch(request)
            .await
            .map_err(TransportError::from)?;
        Ok(mapping::required_dispatch(response.into_inner().dispatch)?)
    }

    pub async fn update(
        &mut self,
        microgrid_id: MicrogridId,
        dispatch_id: DispatchId,
        update: &DispatchUpdate,
    ) -> Result<Dispatch, RequestError> {
        let request = self.request(mapping::update_request(microgrid_id, dispatch_id, update)?);
        let response = self
            .inner
            .update_microgrid_dispatch(request)
            .await
            .map_err(TransportError::from)?;
        Ok(mapping::required_dispatch(response.into_inner().dispatch)?)
    }

    pub async fn get(
        &mut self,
        microgrid_id: MicrogridId,
        dispatch_id: DispatchId,
    ) -> Result<Dispatch, RequestError> {
        let request = self.request(pb::GetMicrogridDispatchRequest {
            microgrid_id: microgrid_id.0,
            dispatch_id: dispatch_id.0,
        });
        let response = self
            .inner
            .get_microgrid_dispatch(request)
            .await
            .map_err(TransportError::from)?;
        Ok(mapping::required_dispatch(response.into_inner().dispatch)?)
    }

    pub async fn delete(
        &mut self,
        microgrid_id: MicrogridId,
        dispatch_id: DispatchId,
    ) -> Result<(), RequestError> {
        let request = self.request(pb::DeleteMicrogridDispatchRequest {
            microgrid_id: microgrid_id.0,
            dispatch_id: dispatch_id.0,
        });
        self.inner
            .delete_microgrid_dispatch(request)
            .await
            .map_err(TransportError::from)?;
        Ok(())
    }

    fn request<T>(&self, message: T) -> tonic::Request<T> {
        let mut request = tonic::Request::new(message);
        if let Some(key) = &self.api_key {
            request
                .metadata_mut()
                .insert(API_KEY_METADATA, key.clone());
        }
        request
    }
}

impl<S> PageFetcher for DispatchGrpcClient<S>
where
    S: GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    async fn fetch_page(
        &mut self,
        params: &Arc<ListParams>,
        token: Option<&PageToken>,
    ) -> Result<Page, ListError> {
        if let Some(token) = token {
            token.check(params)?;
        }

        debug!(
            microgrid_id = %params.microgrid_id,
            first_page = token.is_none(),
            "fetching dispatch page"
        );

        let response = self.list(params, token.map(PageToken::value)).await?;
        Ok(mapping::page_from_response(response, params)?)
    }
}
