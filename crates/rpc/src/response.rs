use crate::{
    error::RpcError,
    request::{Id, Version},
};
use serde::{Deserialize, Serialize};

/// Response of a _single_ rpc call
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    // JSON RPC version
    jsonrpc: Version,
    id: Id,
    #[serde(flatten)]
    result: ResponseResult,
}

impl RpcResponse {
    pub fn new(id: Id, content: impl Into<ResponseResult>) -> Self {
        Self { jsonrpc: Version::V2, id, result: content.into() }
    }

    /// The id of the request this responds to.
    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn result(&self) -> &ResponseResult {
        &self.result
    }

    pub fn is_error(&self) -> bool {
        matches!(self.result, ResponseResult::Error(_))
    }
}

/// Represents the result of a call either success or error
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub enum ResponseResult {
    #[serde(rename = "result")]
    Success(serde_json::Value),
    #[serde(rename = "error")]
    Error(RpcError),
}

impl ResponseResult {
    pub fn error(error: RpcError) -> Self {
        Self::Error(error)
    }

    /// Returns the success payload, if any.
    pub fn as_success(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Success(value) => Some(value),
            Self::Error(_) => None,
        }
    }

    /// Returns the error, if any.
    pub fn as_error(&self) -> Option<&RpcError> {
        match self {
            Self::Success(_) => None,
            Self::Error(err) => Some(err),
        }
    }
}

impl From<RpcError> for ResponseResult {
    fn from(err: RpcError) -> Self {
        Self::error(err)
    }
}
