//! # Dispatch Testing
//!
//! Test doubles for code built on `dispatch-client`, usable without a live server:
//!
//! * **[`FakeService`]:** An in-memory implementation of the dispatch gRPC service. It
//!   filters, sorts and paginates like the real one, and can inject list failures.
//! * **[`FakeClient`]:** A [`dispatch_client::DispatchClient`] wired directly to a
//!   [`FakeService`], with no sockets involved.
//! * **[`DispatchSampler`]:** A seeded generator of random dispatches for an explicit
//!   microgrid id.
//!
//! The fake plugs into the same transport seam as a real channel, so everything built on
//! top of the client (pagers, retries, mapping) runs unchanged against it.
mod client;
mod sampler;
mod service;

pub use client::{FakeClient, FakeTransport};
pub use sampler::DispatchSampler;
pub use service::{DEFAULT_PAGE_SIZE, FakeService, MAX_PAGE_SIZE};
