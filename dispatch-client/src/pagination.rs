//! # Pagination
//!
//! A logical "list all dispatches" request is served as a sequence of bounded pages. This
//! module turns a [`PageFetcher`] (one RPC per call) into a lazy sequence of items.
//!
//! ## State machine
//!
//! ```text
//! Fresh ──> Fetching ──> HasPage ──> Fetching ──> ... ──> Exhausted
//!              │                        │
//!              └────────> Errored <─────┘
//! ```
//!
//! * `Fetching` holds the token of the page being requested. If the pending future is
//!   dropped, the pager stays there and the next call re-issues the same request.
//! * Retriable transport errors are retried in place, up to [`RetryPolicy::max_retries`]
//!   times, so no page is skipped or fetched twice into the output.
//! * `Exhausted` and `Errored` are terminal. An error is surfaced once; afterwards the
//!   pager yields nothing.
//!
//! At most one page is buffered at any time.
use crate::grpc::TransportError;
use crate::mapping::MappingError;
use crate::types::{Dispatch, ListParams};
use futures_util::Stream;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// A page token was presented with parameters other than the ones it was issued for.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ContractError {
    #[error(
        "Page token was issued for microgrid {} and cannot be reused with different list parameters",
        .issued.microgrid_id
    )]
    PageTokenMismatch {
        issued: Box<ListParams>,
        requested: Box<ListParams>,
    },
}

/// Errors that can end a listing.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Malformed list response: {0}")]
    Mapping(#[from] MappingError),
    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl ListError {
    pub fn is_retriable(&self) -> bool {
        matches!(self, ListError::Transport(err) if err.is_retriable())
    }
}

/// Opaque continuation marker issued by the service, bound to the parameters of the
/// request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PageToken {
    value: String,
    origin: Arc<ListParams>,
}

impl PageToken {
    pub fn new(value: impl Into<String>, origin: Arc<ListParams>) -> Self {
        Self {
            value: value.into(),
            origin,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The parameters this token was issued for.
    pub fn params(&self) -> &ListParams {
        &self.origin
    }

    /// Fails unless `params` are exactly the parameters this token was issued for.
    pub fn check(&self, params: &ListParams) -> Result<(), ContractError> {
        if *self.origin == *params {
            Ok(())
        } else {
            Err(ContractError::PageTokenMismatch {
                issued: Box::new((*self.origin).clone()),
                requested: Box::new(params.clone()),
            })
        }
    }
}

/// What follows a page: exactly one of a next token or the end of the listing.
#[derive(Debug, Clone, PartialEq)]
pub enum Continuation {
    Next(PageToken),
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Dispatch>,
    pub continuation: Continuation,
}

/// Fetches a single page. Implementations issue exactly one request per call and never
/// loop internally.
///
/// `token == None` requests the first page. Implementations must reject a token whose
/// parameters differ from `params` with [`ContractError`] before touching the network.
pub trait PageFetcher {
    fn fetch_page(
        &mut self,
        params: &Arc<ListParams>,
        token: Option<&PageToken>,
    ) -> impl Future<Output = Result<Page, ListError>>;
}

/// Bounded exponential backoff for retriable page fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    pub fn with_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    /// Delay before retry number `attempt` (zero-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_backoff)
    }
}

/// Observable state of a [`ListPager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerStatus {
    Fresh,
    Fetching,
    HasPage,
    Exhausted,
    Errored,
}

enum State {
    Fresh,
    Fetching(Option<PageToken>),
    HasPage {
        items: std::vec::IntoIter<Dispatch>,
        continuation: Continuation,
    },
    Exhausted,
    Errored,
}

/// Lazy, single-pass sequence over every dispatch matching one set of [`ListParams`].
///
/// Drive it with [`ListPager::next`] (item by item), [`ListPager::next_page`] (page by
/// page) or convert it into a [`Stream`]. To start over, create a new pager.
pub struct ListPager<F> {
    fetcher: F,
    params: Arc<ListParams>,
    retry: RetryPolicy,
    state: State,
}

impl<F: PageFetcher> ListPager<F> {
    pub fn new(fetcher: F, params: ListParams, retry: RetryPolicy) -> Self {
        Self {
            fetcher,
            params: Arc::new(params),
            retry,
            state: State::Fresh,
        }
    }

    /// Continues a listing from a token obtained from an earlier pager.
    ///
    /// Fails immediately, without any request, if `token` was issued for other parameters.
    pub fn resume(
        fetcher: F,
        params: ListParams,
        token: PageToken,
        retry: RetryPolicy,
    ) -> Result<Self, ContractError> {
        token.check(&params)?;
        Ok(Self {
            fetcher,
            params: Arc::new(params),
            retry,
            state: State::Fetching(Some(token)),
        })
    }

    pub fn params(&self) -> &ListParams {
        &self.params
    }

    pub fn status(&self) -> PagerStatus {
        match self.state {
            State::Fresh => PagerStatus::Fresh,
            State::Fetching(_) => PagerStatus::Fetching,
            State::HasPage { .. } => PagerStatus::HasPage,
            State::Exhausted => PagerStatus::Exhausted,
            State::Errored => PagerStatus::Errored,
        }
    }

    /// Token of the next page to be requested, once the buffered page (if any) is done.
    pub fn next_page_token(&self) -> Option<&PageToken> {
        match &self.state {
            State::Fetching(token) => token.as_ref(),
            State::HasPage {
                continuation: Continuation::Next(token),
                ..
            } => Some(token),
            _ => None,
        }
    }

    /// Yields the next dispatch, `None` at the end, or the error that ended the listing.
    pub async fn next(&mut self) -> Option<Result<Dispatch, ListError>> {
        loop {
            match &mut self.state {
                State::HasPage {
                    items,
                    continuation,
                } => {
                    if let Some(item) = items.next() {
                        return Some(Ok(item));
                    }
                    self.state = advance(continuation);
                }
                State::Exhausted | State::Errored => return None,
                State::Fresh | State::Fetching(_) => {
                    if let Err(err) = self.fetch().await {
                        return Some(Err(err));
                    }
                }
            }
        }
    }

    /// Yields the rest of the buffered page, or the next page fetched from the service.
    ///
    /// Pages are returned as received, empty ones included.
    pub async fn next_page(&mut self) -> Option<Result<Vec<Dispatch>, ListError>> {
        loop {
            match &mut self.state {
                State::HasPage {
                    items,
                    continuation,
                } => {
                    let page = items.collect();
                    self.state = advance(continuation);
                    return Some(Ok(page));
                }
                State::Exhausted | State::Errored => return None,
                State::Fresh | State::Fetching(_) => {
                    if let Err(err) = self.fetch().await {
                        return Some(Err(err));
                    }
                }
            }
        }
    }

    /// Collects every remaining dispatch, stopping at the first error.
    pub async fn collect(mut self) -> Result<Vec<Dispatch>, ListError> {
        let mut dispatches = Vec::new();
        while let Some(item) = self.next().await {
            dispatches.push(item?);
        }
        Ok(dispatches)
    }

    pub fn into_stream(self) -> impl Stream<Item = Result<Dispatch, ListError>> {
        futures_util::stream::unfold(self, |mut pager| async move {
            pager.next().await.map(|item| (item, pager))
        })
    }

    pub fn into_page_stream(self) -> impl Stream<Item = Result<Vec<Dispatch>, ListError>> {
        futures_util::stream::unfold(self, |mut pager| async move {
            pager.next_page().await.map(|page| (page, pager))
        })
    }

    async fn fetch(&mut self) -> Result<(), ListError> {
        let token = match &self.state {
            State::Fresh => None,
            State::Fetching(token) => token.clone(),
            _ => return Ok(()),
        };
        self.state = State::Fetching(token.clone());

        let mut attempt = 0;
        loop {
            match self.fetcher.fetch_page(&self.params, token.as_ref()).await {
                Ok(page) => {
                    debug!(
                        microgrid_id = %self.params.microgrid_id,
                        items = page.items.len(),
                        last = page.continuation == Continuation::End,
                        "received dispatch page"
                    );
                    self.state = State::HasPage {
                        items: page.items.into_iter(),
                        continuation: page.continuation,
                    };
                    return Ok(());
                }
                Err(err) if err.is_retriable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.backoff(attempt);
                    attempt += 1;
                    warn!(
                        microgrid_id = %self.params.microgrid_id,
                        attempt,
                        max_retries = self.retry.max_retries,
                        ?delay,
                        error = %err,
                        "page fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    self.state = State::Errored;
                    return Err(err);
                }
            }
        }
    }
}

fn advance(continuation: &mut Continuation) -> State {
    match std::mem::replace(continuation, Continuation::End) {
        Continuation::Next(token) => State::Fetching(Some(token)),
        Continuation::End => State::Exhausted,
    }
}
