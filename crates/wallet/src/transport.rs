//! The relay transport a wallet session runs over.

use async_trait::async_trait;
use dao_wallet_rpc::{request::Id, response::RpcResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Capabilities a dApp asks for under one namespace key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalNamespace {
    #[serde(default)]
    pub chains: Vec<String>,
    #[serde(default)]
    pub methods: Vec<String>,
    #[serde(default)]
    pub events: Vec<String>,
}

/// An inbound request to open a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProposal {
    pub id: u64,
    #[serde(default)]
    pub required_namespaces: BTreeMap<String, ProposalNamespace>,
    #[serde(default)]
    pub optional_namespaces: BTreeMap<String, ProposalNamespace>,
}

/// Capabilities granted under one namespace key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedNamespace {
    /// `<chain id>:<address>` entries, one per approved chain.
    pub accounts: Vec<String>,
    pub methods: Vec<String>,
    pub events: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveSessionParams {
    pub id: u64,
    pub namespaces: BTreeMap<String, ApprovedNamespace>,
}

/// An established session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub topic: String,
    pub namespaces: BTreeMap<String, ApprovedNamespace>,
}

/// A method invocation delivered over an established session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub topic: String,
    pub id: Id,
    pub method: String,
    #[serde(default)]
    pub params: Value,
    /// Chain the dApp addressed the request to, e.g. `stacks:testnet`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<String>,
}

/// Everything the transport delivers to the wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    Proposal(SessionProposal),
    Request(SessionRequest),
    Delete { topic: String },
}

/// The relay transport.
///
/// Implementations own connection management, topic lifecycle and message delivery.
#[async_trait]
pub trait SessionTransport: Send + Sync {
    /// Finalizes a session with the given namespaces.
    async fn approve_session(&self, params: ApproveSessionParams) -> eyre::Result<Session>;

    /// Sends the response to a request back over the session it arrived on.
    async fn respond_request(&self, topic: &str, response: RpcResponse) -> eyre::Result<()>;
}
