//! Aggregated error type for wallet operations

use crate::{
    address::{AddressError, StacksAddress},
    clarity::EncodeError,
};
use std::time::Duration;

pub type Result<T, E = WalletError> = std::result::Result<T, E>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    /// A mutating call was attempted without an authenticated account.
    #[error("no account connected")]
    NoAccount,
    /// A supplied sender/address differs from the session's account.
    #[error("address mismatch: connected account is {expected}, request names {actual}")]
    IdentityMismatch { expected: StacksAddress, actual: String },
    #[error("malformed contract identifier `{0}`: expected <address>.<contract-name>")]
    MalformedIdentifier(String),
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),
    #[error(transparent)]
    Encoding(#[from] EncodeError),
    #[error(transparent)]
    InvalidAddress(#[from] AddressError),
    #[error("invalid arguments for `{function}`: {reason}")]
    InvalidArguments { function: String, reason: String },
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("unknown session `{0}`")]
    SessionNotFound(String),
    #[error("proposal requests no supported namespace, expected `stacks`")]
    NoSupportedNamespace,
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Governance(#[from] GovernanceError),
    /// Failure reported by the transport, signer or oracle.
    #[error("{0}")]
    External(String),
}

impl WalletError {
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }

    pub fn invalid_arguments(function: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidArguments { function: function.into(), reason: reason.to_string() }
    }
}

impl From<eyre::Report> for WalletError {
    fn from(err: eyre::Report) -> Self {
        Self::External(err.to_string())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidParams(err.to_string())
    }
}

/// Governance preconditions checked against on-chain state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GovernanceError {
    #[error("proposal {0} not found")]
    ProposalNotFound(u64),
    #[error("proposal {0} is not active")]
    ProposalNotActive(u64),
    #[error("proposal {0} has not passed")]
    ProposalNotPassed(u64),
    #[error("proposal {0} was already executed")]
    AlreadyExecuted(u64),
    #[error("{0} is not a member")]
    NotAMember(StacksAddress),
    #[error("no governance contract configured")]
    NoContract,
}
