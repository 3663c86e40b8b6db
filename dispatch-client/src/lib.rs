//! # Dispatch Client
//!
//! `dispatch-client` is a typed client for the Frequenz microgrid dispatch API
//! (`frequenz.api.dispatch.v1.MicrogridDispatchService`). It lists, creates, updates,
//! fetches and deletes dispatches scoped to a microgrid.
//!
//! ## Key Components
//!
//! * **[`DispatchClient`]:** The main entry point. It owns a single channel to the
//!   service and exposes the public operations. Every operation takes the microgrid id.
//! * **[`ListPager`]:** A lazy, single-pass iterator over a paginated listing. It fetches
//!   one page at a time, retries transient transport failures and rejects page tokens
//!   that were issued for different request parameters.
//! * **[`ChannelConfig`]:** Describes how to reach the service: address, TLS mode,
//!   optional root certificate override and whether to connect eagerly.
//!
//! ## Transport seam
//!
//! The client is generic over any `tonic` gRPC service, so the `dispatch-testing` crate can
//! plug its in-memory fake directly into [`DispatchClient::from_service`] without sockets.
//!
//! ## Feature Flags
//!
//! * `bundled-root-cert` (default): trust the root certificate compiled into the library
//!   when no override is configured. Without it, the system trust store is used.
//! * `gen-proto`: Enables the binary that regenerates the protobuf bindings (internal use).
//!
//! ## Re-exports
//!
//! This crate re-exports `prost`, `prost-types` and `tonic` to ensure that consumers
//! use compatible versions of these underlying dependencies.
pub mod channel;
pub mod client;
pub mod grpc;
pub mod mapping;
pub mod pagination;
pub mod proto;
pub mod types;

pub use channel::{ChannelConfig, ClientConnectError, TlsMode};
pub use client::{DispatchClient, RequestError};
pub use grpc::{DispatchGrpcClient, TransportError};
pub use mapping::MappingError;
pub use pagination::{
    Continuation, ContractError, ListError, ListPager, Page, PageFetcher, PageToken, PagerStatus,
    RetryPolicy,
};
pub use types::*;

// Re-exports
pub use prost;
pub use prost_types;
pub use tonic;

/// Type alias for the standard boxed error used in generic bounds.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
