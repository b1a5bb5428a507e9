//! JSON-RPC 2.0 types shared by the wallet router and its transport.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

/// JSON-RPC request bindings
pub mod request;

/// JSON-RPC response bindings
pub mod response;

/// JSON-RPC error bindings
pub mod error;
