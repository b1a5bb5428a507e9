//! # dao-wallet
//!
//! The wallet side of a relay session with a DAO dApp: approves session proposals, routes
//! the session's JSON-RPC requests to typed handlers and answers each exactly once.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod api;
pub mod error;
pub mod governance;
pub mod handler;
pub mod hooks;
pub mod oracle;
pub mod session;
pub mod signer;
pub mod transport;

mod service;

pub use api::WalletApi;
pub use governance::GovernanceClient;
pub use handler::RequestRouter;
pub use hooks::SessionObserver;
pub use oracle::GovernanceOracle;
pub use service::WalletService;
pub use signer::WalletSigner;
pub use transport::{SessionTransport, TransportEvent};

pub use dao_wallet_config::WalletConfig;
pub use dao_wallet_core as core;
pub use dao_wallet_rpc as rpc;
