//! Conversion of handler results into RPC results

use dao_wallet_core::WalletError;
use dao_wallet_rpc::{error::RpcError, response::ResponseResult};
use serde::Serialize;

/// Helper trait to easily convert results to rpc results
pub(crate) trait ToRpcResponseResult {
    fn to_rpc_result(self) -> ResponseResult;
}

/// Converts a serializable value into a `ResponseResult`
pub fn to_rpc_result<T: Serialize>(val: T) -> ResponseResult {
    match serde_json::to_value(val) {
        Ok(success) => ResponseResult::Success(success),
        Err(err) => {
            error!(target: "rpc", "Failed serialize rpc response: {:?}", err);
            ResponseResult::error(RpcError::internal_error())
        }
    }
}

/// Every wallet failure is answered with the wallet error code and its message.
pub fn to_rpc_error(err: &WalletError) -> RpcError {
    RpcError::wallet_error(err.to_string())
}

impl<T: Serialize> ToRpcResponseResult for Result<T, WalletError> {
    fn to_rpc_result(self) -> ResponseResult {
        match self {
            Ok(val) => to_rpc_result(val),
            Err(err) => to_rpc_error(&err).into(),
        }
    }
}
