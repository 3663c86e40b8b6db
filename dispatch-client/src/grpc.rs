//! # gRPC Transport
//!
//! Thin typed layer over the generated `MicrogridDispatchService` client. It attaches the
//! API key to every request, maps wire messages through [`crate::mapping`] and classifies
//! failures into [`TransportError`].
//!
//! [`DispatchGrpcClient`] is generic over any `tonic` gRPC service: a real
//! [`tonic::transport::Channel`] in production, or an in-process server in tests.
pub mod client;

pub use client::{DispatchGrpcClient, TransportError};
