//! The external signer and broadcaster.

use async_trait::async_trait;
use dao_wallet_core::{
    CallDescriptor, Network, StacksAddress,
    request::{MessageType, SignMessageResult, SignTransactionResult, TxResult},
};
use serde::Serialize;

/// A native STX transfer, validated and ready to sign.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub sender: StacksAddress,
    pub recipient: StacksAddress,
    /// Amount in micro-STX.
    pub amount: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    pub network: Network,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignTransactionRequest {
    pub account: StacksAddress,
    /// Serialized transaction bytes.
    pub transaction: Vec<u8>,
    pub broadcast: bool,
    pub network: Network,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignMessageRequest {
    pub account: StacksAddress,
    pub message: String,
    pub message_type: MessageType,
    pub domain: Option<String>,
    pub network: Network,
}

/// Holds the keys of the wallet's accounts and talks to the network.
///
/// Identifiers in the returned results come from the signer; the router never invents them.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Signs and broadcasts a native transfer.
    async fn transfer(&self, transfer: &TransferRequest) -> eyre::Result<TxResult>;

    /// Signs and broadcasts a contract call.
    async fn call_contract(&self, call: &CallDescriptor) -> eyre::Result<TxResult>;

    /// Signs a serialized transaction, broadcasting it if requested.
    async fn sign_transaction(
        &self,
        request: &SignTransactionRequest,
    ) -> eyre::Result<SignTransactionResult>;

    async fn sign_message(&self, request: &SignMessageRequest) -> eyre::Result<SignMessageResult>;
}
