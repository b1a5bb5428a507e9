//! Routes session requests to the wallet api
use crate::{
    api::WalletApi,
    error::to_rpc_error,
    session::{SessionContext, SessionRegistry},
    transport::SessionRequest,
};
use dao_wallet_core::{Network, WalletError, WalletRequest};
use dao_wallet_rpc::response::{ResponseResult, RpcResponse};
use std::time::Duration;

/// Answers every session request with exactly one response carrying the request's id.
#[derive(Clone)]
pub struct RequestRouter {
    api: WalletApi,
    sessions: SessionRegistry,
    timeout: Option<Duration>,
}

impl RequestRouter {
    pub fn new(api: WalletApi, sessions: SessionRegistry) -> Self {
        Self { api, sessions, timeout: None }
    }

    /// Bounds the time a single request may take.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api(&self) -> &WalletApi {
        &self.api
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Handles a single request.
    ///
    /// Failures never escape: unknown sessions, unknown methods, bad params, handler errors
    /// and timeouts all become an error response. The session is resolved before the method is
    /// decoded, so a request on an unknown topic is answered with the session error whatever its
    /// method.
    pub async fn route(&self, request: SessionRequest) -> RpcResponse {
        let SessionRequest { topic, id, method, params, chain_id } = request;
        trace!(target: "rpc", %topic, %id, %method, "received session request");

        let result = match self.prepare(&topic, &method, params, chain_id.as_deref()) {
            Ok((session, request)) => self.dispatch(&session, request).await,
            Err(err) => to_rpc_error(&err).into(),
        };

        match &result {
            ResponseResult::Success(_) => {
                trace!(target: "rpc", %topic, %id, %method, "request succeeded");
            }
            ResponseResult::Error(err) => {
                warn!(target: "rpc", %topic, %id, %method, code = err.code.code(), message = %err.message, "request failed");
            }
        }
        RpcResponse::new(id, result)
    }

    /// Resolves the session and decodes the request.
    fn prepare(
        &self,
        topic: &str,
        method: &str,
        params: serde_json::Value,
        chain_id: Option<&str>,
    ) -> Result<(SessionContext, WalletRequest), WalletError> {
        let mut session = self
            .sessions
            .get(topic)
            .ok_or_else(|| WalletError::SessionNotFound(topic.to_string()))?;
        let request = WalletRequest::parse(method, params)?;
        if let Some(chain_id) = chain_id {
            session.network = chain_id.parse::<Network>().map_err(|err| {
                WalletError::invalid_params(err.to_string())
            })?;
        }
        Ok((session, request))
    }

    async fn dispatch(&self, session: &SessionContext, request: WalletRequest) -> ResponseResult {
        let execution = self.api.execute(session, request);
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, execution)
                .await
                .unwrap_or_else(|_| to_rpc_error(&WalletError::Timeout(timeout)).into()),
            None => execution.await,
        }
    }
}
