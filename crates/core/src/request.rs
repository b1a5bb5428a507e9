//! The JSON-RPC method surface a session can invoke.

use crate::{
    address::StacksAddress,
    error::{Result, WalletError},
    network::Network,
    serde_helpers::{empty_params, object_or_sequence, uint},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token symbol reported by `stx_getAddresses`.
pub const STX_SYMBOL: &str = "STX";

/// Maximum length of a transfer memo, in bytes.
pub const MAX_MEMO_LEN: usize = 34;

/// Every method a session may call.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum WalletMethod {
    #[strum(serialize = "stx_getAddresses")]
    GetAddresses,
    #[strum(serialize = "stx_transferStx")]
    TransferStx,
    #[strum(serialize = "stx_signTransaction")]
    SignTransaction,
    #[strum(serialize = "stx_signMessage")]
    SignMessage,
    #[strum(serialize = "stx_callContract")]
    CallContract,
}

impl WalletMethod {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// The names of all supported methods, in declaration order.
    pub fn all_names() -> Vec<String> {
        use strum::IntoEnumIterator;
        Self::iter().map(|m| m.as_str().to_string()).collect()
    }
}

/// A decoded session request.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum WalletRequest {
    #[serde(rename = "stx_getAddresses", deserialize_with = "empty_params::deserialize")]
    GetAddresses(()),

    #[serde(rename = "stx_transferStx", deserialize_with = "object_or_sequence::deserialize")]
    TransferStx(TransferStxParams),

    #[serde(rename = "stx_signTransaction", deserialize_with = "object_or_sequence::deserialize")]
    SignTransaction(SignTransactionParams),

    #[serde(rename = "stx_signMessage", deserialize_with = "object_or_sequence::deserialize")]
    SignMessage(SignMessageParams),

    #[serde(rename = "stx_callContract", deserialize_with = "object_or_sequence::deserialize")]
    CallContract(CallContractParams),
}

impl WalletRequest {
    /// Decodes a request from its method name and raw params.
    ///
    /// Unknown method names fail with [`WalletError::UnsupportedMethod`]; known methods with
    /// malformed params fail with [`WalletError::InvalidParams`].
    pub fn parse(method: &str, params: Value) -> Result<Self> {
        if method.parse::<WalletMethod>().is_err() {
            return Err(WalletError::UnsupportedMethod(method.to_string()));
        }
        let call = serde_json::json!({ "method": method, "params": params });
        Ok(serde_json::from_value(call)?)
    }

    pub fn method(&self) -> WalletMethod {
        match self {
            Self::GetAddresses(()) => WalletMethod::GetAddresses,
            Self::TransferStx(_) => WalletMethod::TransferStx,
            Self::SignTransaction(_) => WalletMethod::SignTransaction,
            Self::SignMessage(_) => WalletMethod::SignMessage,
            Self::CallContract(_) => WalletMethod::CallContract,
        }
    }

    /// The network the request explicitly targets, if any.
    pub fn network(&self) -> Option<Network> {
        match self {
            Self::GetAddresses(()) => None,
            Self::TransferStx(p) => p.network,
            Self::SignTransaction(p) => p.network,
            Self::SignMessage(p) => p.network,
            Self::CallContract(p) => p.network,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferStxParams {
    pub sender: String,
    pub recipient: String,
    /// Amount in micro-STX.
    #[serde(deserialize_with = "uint::deserialize")]
    pub amount: u128,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub network: Option<Network>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignTransactionParams {
    /// Hex-encoded serialized transaction.
    pub transaction: String,
    #[serde(default)]
    pub broadcast: Option<bool>,
    #[serde(default)]
    pub network: Option<Network>,
}

impl SignTransactionParams {
    /// Decodes the transaction bytes, accepting an optional `0x` prefix.
    pub fn transaction_bytes(&self) -> Result<Vec<u8>> {
        let raw = self.transaction.strip_prefix("0x").unwrap_or(&self.transaction);
        if raw.is_empty() {
            return Err(WalletError::invalid_params("empty transaction"));
        }
        hex::decode(raw)
            .map_err(|err| WalletError::invalid_params(format!("transaction is not valid hex: {err}")))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Utf8,
    Structured,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignMessageParams {
    pub address: String,
    pub message: String,
    #[serde(default)]
    pub message_type: Option<MessageType>,
    #[serde(default)]
    pub network: Option<Network>,
    /// Domain tuple of a structured message.
    #[serde(default)]
    pub domain: Option<String>,
}

impl SignMessageParams {
    pub fn message_type(&self) -> MessageType {
        self.message_type.unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallContractParams {
    /// `<address>.<contract-name>`
    pub contract: String,
    pub function_name: String,
    /// Arguments as encoded literals, e.g. `["u1", "true"]`.
    #[serde(default)]
    pub function_args: Vec<String>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub network: Option<Network>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressEntry {
    pub symbol: String,
    pub address: StacksAddress,
}

impl AddressEntry {
    pub fn stx(address: StacksAddress) -> Self {
        Self { symbol: STX_SYMBOL.to_string(), address }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressesResult {
    pub addresses: Vec<AddressEntry>,
}

/// Result of a broadcast transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    pub txid: String,
    pub transaction: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignTransactionResult {
    pub signature: String,
    pub transaction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignMessageResult {
    pub signature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}
