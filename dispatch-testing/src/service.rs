use dispatch_client::mapping::{self, MappingError};
use dispatch_client::prost::Message;
use dispatch_client::proto::common::v1::PaginationInfo;
use dispatch_client::proto::dispatch::v1 as pb;
use dispatch_client::proto::dispatch::v1::microgrid_dispatch_service_server::MicrogridDispatchService;
use dispatch_client::{Dispatch, DispatchId, MicrogridId, SortField, SortOptions, SortOrder};
use std::collections::VecDeque;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::Mutex;
use tonic::{Request, Response, Status};
use tracing::debug;

/// Page size used when a list request does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 100;
/// Larger page size requests are capped to this.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// In-memory dispatch service.
///
/// Cloning yields a handle to the same store, so a test can keep one handle to seed and
/// inspect the data while another serves requests.
///
/// Page tokens encode the offset and page size of the next page together with a
/// fingerprint of the request that produced them. Presenting a token with a request whose
/// microgrid, filter or sort differ fails with `INVALID_ARGUMENT`.
#[derive(Debug, Clone, Default)]
pub struct FakeService {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    dispatches: Vec<Dispatch>,
    last_id: u64,
    list_failures: VecDeque<Status>,
    list_requests: usize,
}

impl State {
    fn position(&self, microgrid_id: u64, dispatch_id: u64) -> Result<usize, Status> {
        self.dispatches
            .iter()
            .position(|d| {
                d.microgrid_id == MicrogridId(microgrid_id) && d.id == DispatchId(dispatch_id)
            })
            .ok_or_else(|| Status::not_found("Dispatch not found"))
    }
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `dispatch` as is. Ids assigned later by `create` continue after the highest
    /// id stored.
    pub async fn insert(&self, dispatch: Dispatch) {
        let mut state = self.state.lock().await;
        state.last_id = state.last_id.max(dispatch.id.0);
        state.dispatches.push(dispatch);
    }

    pub async fn insert_all(&self, dispatches: impl IntoIterator<Item = Dispatch>) {
        for dispatch in dispatches {
            self.insert(dispatch).await;
        }
    }

    /// Stored dispatches of a microgrid, in insertion order.
    pub async fn dispatches(&self, microgrid_id: MicrogridId) -> Vec<Dispatch> {
        let state = self.state.lock().await;
        state
            .dispatches
            .iter()
            .filter(|d| d.microgrid_id == microgrid_id)
            .cloned()
            .collect()
    }

    /// Makes the next list request fail with `status`. Failures queue up in call order.
    pub async fn fail_next_list(&self, status: Status) {
        self.state.lock().await.list_failures.push_back(status);
    }

    /// Number of list requests received so far, failed ones included.
    pub async fn list_request_count(&self) -> usize {
        self.state.lock().await.list_requests
    }
}

#[tonic::async_trait]
impl MicrogridDispatchService for FakeService {
    async fn list_microgrid_dispatches(
        &self,
        request: Request<pb::ListMicrogridDispatchesRequest>,
    ) -> Result<Response<pb::ListMicrogridDispatchesResponse>, Status> {
        let request = request.into_inner();
        let mut state = self.state.lock().await;

        state.list_requests += 1;
        if let Some(status) = state.list_failures.pop_front() {
            debug!(code = ?status.code(), "injecting list failure");
            return Err(status);
        }

        let params = mapping::list_params_from_pb(&request).map_err(invalid_argument)?;
        let fingerprint = fingerprint(&request);

        let page_token = request
            .pagination_params
            .as_ref()
            .and_then(|pagination| pagination.page_token.as_deref())
            .filter(|token| !token.is_empty());

        let (offset, page_size) = match page_token {
            Some(token) => decode_token(token, fingerprint)?,
            None => (0, effective_page_size(params.page_size)),
        };

        let mut matching: Vec<&Dispatch> = state
            .dispatches
            .iter()
            .filter(|d| d.microgrid_id == params.microgrid_id && params.filter.matches(d))
            .collect();

        if let Some(sort) = params.sort {
            sort_dispatches(&mut matching, sort);
        }

        let total = matching.len();
        let end = offset.saturating_add(page_size).min(total);
        let dispatches = matching
            .get(offset..end)
            .unwrap_or_default()
            .iter()
            .map(|d| mapping::dispatch_to_pb(d))
            .collect::<Result<Vec<_>, _>>()
            .map_err(internal)?;

        let next_page_token = (end < total).then(|| encode_token(end, page_size, fingerprint));

        Ok(Response::new(pb::ListMicrogridDispatchesResponse {
            dispatches,
            pagination_info: Some(PaginationInfo {
                total_items: u32::try_from(total).unwrap_or(u32::MAX),
                next_page_token,
            }),
        }))
    }

    async fn create_microgrid_dispatch(
        &self,
        request: Request<pb::CreateMicrogridDispatchRequest>,
    ) -> Result<Response<pb::CreateMicrogridDispatchResponse>, Status> {
        let (microgrid_id, new) =
            mapping::new_dispatch_from_pb(request.into_inner()).map_err(invalid_argument)?;

        let mut state = self.state.lock().await;
        state.last_id += 1;
        let id = DispatchId(state.last_id);
        let dispatch = new.into_dispatch(id, microgrid_id, SystemTime::now());
        let response = mapping::dispatch_to_pb(&dispatch).map_err(internal)?;
        state.dispatches.push(dispatch);

        Ok(Response::new(pb::CreateMicrogridDispatchResponse {
            dispatch: Some(response),
        }))
    }

    async fn update_microgrid_dispatch(
        &self,
        request: Request<pb::UpdateMicrogridDispatchRequest>,
    ) -> Result<Response<pb::UpdateMicrogridDispatchResponse>, Status> {
        let request = request.into_inner();
        let update = mapping::dispatch_update_from_pb(request.update, request.update_mask)
            .map_err(invalid_argument)?;

        if update.is_empty() {
            return Err(Status::invalid_argument("Update mask is empty"));
        }

        let mut state = self.state.lock().await;
        let index = state.position(request.microgrid_id, request.dispatch_id)?;

        let mut updated = state.dispatches[index].updated(&update);
        updated.update_time = SystemTime::now();
        let response = mapping::dispatch_to_pb(&updated).map_err(internal)?;
        state.dispatches[index] = updated;

        Ok(Response::new(pb::UpdateMicrogridDispatchResponse {
            dispatch: Some(response),
        }))
    }

    async fn get_microgrid_dispatch(
        &self,
        request: Request<pb::GetMicrogridDispatchRequest>,
    ) -> Result<Response<pb::GetMicrogridDispatchResponse>, Status> {
        let request = request.into_inner();
        let state = self.state.lock().await;
        let index = state.position(request.microgrid_id, request.dispatch_id)?;

        let dispatch = mapping::dispatch_to_pb(&state.dispatches[index]).map_err(internal)?;
        Ok(Response::new(pb::GetMicrogridDispatchResponse {
            dispatch: Some(dispatch),
        }))
    }

    async fn delete_microgrid_dispatch(
        &self,
        request: Request<pb::DeleteMicrogridDispatchRequest>,
    ) -> Result<Response<pb::DeleteMicrogridDispatchResponse>, Status> {
        let request = request.into_inner();
        let mut state = self.state.lock().await;
        let index = state.position(request.microgrid_id, request.dispatch_id)?;

        state.dispatches.remove(index);
        Ok(Response::new(pb::DeleteMicrogridDispatchResponse {}))
    }
}

fn effective_page_size(requested: Option<u32>) -> usize {
    let size = match requested {
        None | Some(0) => DEFAULT_PAGE_SIZE,
        Some(size) => size.min(MAX_PAGE_SIZE),
    };
    size as usize
}

/// Stable sort, so equal keys keep insertion order in both directions.
fn sort_dispatches(dispatches: &mut [&Dispatch], sort: SortOptions) {
    let key = |d: &Dispatch| match sort.field {
        SortField::StartTime => d.start_time,
        SortField::CreateTime => d.create_time,
        SortField::UpdateTime => d.update_time,
    };

    dispatches.sort_by(|a, b| {
        let ordering = key(*a).cmp(&key(*b));
        match sort.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

/// Hash of everything in the request except its pagination parameters.
fn fingerprint(request: &pb::ListMicrogridDispatchesRequest) -> u64 {
    let unpaged = pb::ListMicrogridDispatchesRequest {
        pagination_params: None,
        ..request.clone()
    };

    let mut hasher = DefaultHasher::new();
    unpaged.encode_to_vec().hash(&mut hasher);
    hasher.finish()
}

fn encode_token(offset: usize, page_size: usize, fingerprint: u64) -> String {
    format!("{offset}:{page_size}:{fingerprint:016x}")
}

fn decode_token(token: &str, fingerprint: u64) -> Result<(usize, usize), Status> {
    let malformed = || Status::invalid_argument(format!("Malformed page token '{token}'"));

    let mut parts = token.splitn(3, ':');
    let (Some(offset), Some(page_size), Some(issued_for)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    let offset = offset.parse::<usize>().map_err(|_| malformed())?;
    let page_size = page_size.parse::<usize>().map_err(|_| malformed())?;
    let issued_for = u64::from_str_radix(issued_for, 16).map_err(|_| malformed())?;

    if issued_for != fingerprint {
        return Err(Status::invalid_argument(
            "Page token does not match the request parameters",
        ));
    }

    Ok((offset, page_size.max(1)))
}

fn invalid_argument(err: MappingError) -> Status {
    Status::invalid_argument(err.to_string())
}

fn internal(err: MappingError) -> Status {
    Status::internal(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_request(
        microgrid_id: u64,
        page_size: Option<u32>,
        token: Option<String>,
    ) -> pb::ListMicrogridDispatchesRequest {
        pb::ListMicrogridDispatchesRequest {
            microgrid_id,
            filter: None,
            sort_options: None,
            pagination_params: Some(dispatch_client::proto::common::v1::PaginationParams {
                page_size,
                page_token: token,
            }),
        }
    }

    #[test]
    fn token_is_bound_to_the_request_fingerprint() {
        let first = list_request(1, Some(10), None);
        let token = encode_token(10, 10, fingerprint(&first));

        let same = list_request(1, None, Some(token.clone()));
        let other = list_request(2, None, Some(token.clone()));

        assert_eq!(decode_token(&token, fingerprint(&same)).unwrap(), (10, 10));
        let err = decode_token(&token, fingerprint(&other)).unwrap_err();
        assert_eq!(err.code(), tonic::Code::InvalidArgument);
    }

    #[test]
    fn malformed_tokens_are_invalid_arguments() {
        for token in ["", "abc", "1:2", "x:2:ff", "1:2:zz"] {
            let err = decode_token(token, 0).unwrap_err();
            assert_eq!(err.code(), tonic::Code::InvalidArgument);
        }
    }

    #[test]
    fn page_size_defaults_and_caps() {
        assert_eq!(effective_page_size(None), DEFAULT_PAGE_SIZE as usize);
        assert_eq!(effective_page_size(Some(0)), DEFAULT_PAGE_SIZE as usize);
        assert_eq!(effective_page_size(Some(5)), 5);
        assert_eq!(effective_page_size(Some(5_000)), MAX_PAGE_SIZE as usize);
    }
}
