//! # dao-wallet-core
//!
//! Core types shared by the dao-wallet crates: networks and addresses, the Clarity value
//! encoder, the governance operation table and the contract-call builder, plus the typed
//! JSON-RPC method surface a session can invoke.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod address;
pub mod call;
pub mod clarity;
pub mod contract;
pub mod error;
pub mod governance;
pub mod network;
pub mod proposal;
pub mod request;
pub mod serde_helpers;
pub mod units;

pub use address::StacksAddress;
pub use call::{CallBuilder, CallDescriptor};
pub use clarity::{ArgKind, ClarityValue, EncodedArg};
pub use contract::ContractIdentifier;
pub use error::{GovernanceError, WalletError};
pub use governance::{GovernanceCall, GovernanceOperation};
pub use network::Network;
pub use proposal::Proposal;
pub use request::{WalletMethod, WalletRequest};
