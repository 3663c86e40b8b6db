//! Protobuf bindings for the dispatch API.
//!
//! The files under `src/proto` are generated by the `generate-dispatch-service` binary
//! (`cargo run --features gen-proto --bin generate-dispatch-service`) and checked in,
//! so building the crate does not require `protoc`.
#![allow(clippy::all, missing_docs)]

pub mod common {
    pub mod v1 {
        include!("proto/frequenz.api.common.v1.rs");
    }
}

pub mod dispatch {
    pub mod v1 {
        include!("proto/frequenz.api.dispatch.v1.rs");
    }
}
