//! The wallet side of a session: lifecycle hooks plus request routing.

use crate::{
    api::WalletApi,
    governance::GovernanceClient,
    handler::RequestRouter,
    hooks::SessionObserver,
    oracle::GovernanceOracle,
    session::{NamespaceNegotiator, SessionContext, SessionRegistry},
    signer::WalletSigner,
    transport::{
        ApproveSessionParams, Session, SessionProposal, SessionRequest, SessionTransport,
        TransportEvent,
    },
};
use dao_wallet_config::WalletConfig;
use dao_wallet_core::{GovernanceError, StacksAddress, WalletError, error::Result};
use futures::{Stream, StreamExt};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Clone)]
pub struct WalletService {
    transport: Arc<dyn SessionTransport>,
    router: RequestRouter,
    negotiator: NamespaceNegotiator,
    /// The wallet's active account, bound to each session at approval.
    account: Arc<RwLock<Option<StacksAddress>>>,
    observer: Option<Arc<dyn SessionObserver>>,
    config: WalletConfig,
}

impl WalletService {
    pub fn new(
        config: WalletConfig,
        transport: Arc<dyn SessionTransport>,
        signer: Arc<dyn WalletSigner>,
    ) -> Self {
        let api = WalletApi::new(signer).with_governance_contract(config.governance_contract.clone());
        let router = RequestRouter::new(api, SessionRegistry::new()).with_timeout(config.timeout());
        Self {
            transport,
            router,
            negotiator: NamespaceNegotiator::from_config(&config),
            account: Arc::new(RwLock::new(config.account.clone())),
            observer: None,
            config,
        }
    }

    /// Reports lifecycle events to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionRegistry {
        self.router.sessions()
    }

    /// The active account.
    pub fn account(&self) -> Option<StacksAddress> {
        self.account.read().clone()
    }

    /// Makes `account` the active account for sessions approved from now on.
    pub fn connect_account(&self, account: StacksAddress) {
        info!(target: "wallet::session", %account, "account connected");
        *self.account.write() = Some(account);
    }

    pub fn disconnect_account(&self) {
        info!(target: "wallet::session", "account disconnected");
        *self.account.write() = None;
    }

    /// Rebinds one session to `account`, or locks it with `None`. Other sessions are untouched.
    pub fn set_session_account(&self, topic: &str, account: Option<StacksAddress>) -> Result<()> {
        self.sessions().set_account(topic, account)
    }

    /// A governance client for the configured contract, acting through this wallet's signer.
    pub fn governance(&self, oracle: Arc<dyn GovernanceOracle>) -> Result<GovernanceClient> {
        let contract = self.config.governance_contract.clone().ok_or(GovernanceError::NoContract)?;
        Ok(GovernanceClient::new(
            contract,
            self.config.network,
            oracle,
            self.router.api().signer().clone(),
        ))
    }

    /// Negotiates and approves a session proposal.
    ///
    /// Returns `Ok(None)` when the proposal was rejected and an observer was notified.
    pub async fn on_proposal(&self, proposal: SessionProposal) -> Result<Option<Session>> {
        let id = proposal.id;
        debug!(target: "wallet::session", id, "received session proposal");
        match self.approve(proposal).await {
            Ok(session) => {
                if let Some(observer) = &self.observer {
                    observer.on_session_approved(&session);
                }
                Ok(Some(session))
            }
            Err(err) => {
                warn!(target: "wallet::session", id, %err, "session proposal rejected");
                match &self.observer {
                    Some(observer) => {
                        observer.on_session_rejected(id, &err);
                        Ok(None)
                    }
                    None => Err(err),
                }
            }
        }
    }

    async fn approve(&self, proposal: SessionProposal) -> Result<Session> {
        let account = self.account().ok_or(WalletError::NoAccount)?;
        let negotiated = self.negotiator.negotiate(&proposal, &account)?;
        let params = ApproveSessionParams { id: proposal.id, namespaces: negotiated.namespaces };
        let session = self.transport.approve_session(params).await?;
        self.sessions().insert(SessionContext::new(
            session.topic.clone(),
            Some(account),
            negotiated.network,
        ));
        info!(target: "wallet::session", topic = %session.topic, network = %negotiated.network, "session approved");
        Ok(session)
    }

    /// Routes a request and sends its response.
    ///
    /// A response the transport fails to deliver is logged and dropped, never resent.
    pub async fn on_request(&self, request: SessionRequest) {
        let topic = request.topic.clone();
        let response = self.router.route(request).await;
        let id = response.id().clone();
        if let Err(err) = self.transport.respond_request(&topic, response).await {
            error!(target: "rpc", %topic, %id, %err, "failed to deliver response");
        }
    }

    /// Forgets a deleted session. Requests on its topic are refused from now on.
    pub fn on_delete(&self, topic: &str) {
        match self.sessions().remove(topic) {
            Some(_) => info!(target: "wallet::session", topic, "session deleted"),
            None => debug!(target: "wallet::session", topic, "delete for unknown session"),
        }
        if let Some(observer) = &self.observer {
            observer.on_session_deleted(topic);
        }
    }

    pub async fn handle_event(&self, event: TransportEvent) -> Result<()> {
        match event {
            TransportEvent::Proposal(proposal) => {
                self.on_proposal(proposal).await?;
            }
            TransportEvent::Request(request) => self.on_request(request).await,
            TransportEvent::Delete { topic } => self.on_delete(&topic),
        }
        Ok(())
    }

    /// Handles events one at a time until the stream ends.
    ///
    /// Stops early only when a proposal fails and no observer is installed.
    pub async fn run<S>(&self, events: S) -> Result<()>
    where
        S: Stream<Item = TransportEvent> + Send,
    {
        let mut events = std::pin::pin!(events);
        while let Some(event) = events.next().await {
            self.handle_event(event).await?;
        }
        debug!(target: "wallet::session", "transport event stream ended");
        Ok(())
    }
}
