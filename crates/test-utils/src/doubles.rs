//! In-memory stand-ins for the wallet's external collaborators.

use async_trait::async_trait;
use dao_wallet::{
    GovernanceOracle, SessionObserver, SessionTransport, WalletSigner,
    core::{
        CallDescriptor, ContractIdentifier, Proposal, StacksAddress, WalletError,
        request::{SignMessageResult, SignTransactionResult, TxResult},
    },
    rpc::{request::Id, response::RpcResponse},
    signer::{SignMessageRequest, SignTransactionRequest, TransferRequest},
    transport::{ApproveSessionParams, Session},
};
use parking_lot::Mutex;
use std::{
    collections::{HashMap, HashSet},
    time::Duration,
};

/// A transport that approves every session and records every response.
#[derive(Debug, Default)]
pub struct MockTransport {
    approvals: Mutex<Vec<ApproveSessionParams>>,
    responses: Mutex<Vec<(String, RpcResponse)>>,
    rejection: Mutex<Option<String>>,
    undeliverable: Mutex<bool>,
}

impl MockTransport {
    /// Topic assigned to the session approved for proposal `id`.
    pub fn topic_for(id: u64) -> String {
        format!("topic-{id}")
    }

    /// Makes every following approval fail with `msg`.
    pub fn reject_approvals(&self, msg: &str) {
        *self.rejection.lock() = Some(msg.to_string());
    }

    /// Makes response delivery fail. Responses are still recorded.
    pub fn fail_deliveries(&self, fail: bool) {
        *self.undeliverable.lock() = fail;
    }

    pub fn approvals(&self) -> Vec<ApproveSessionParams> {
        self.approvals.lock().clone()
    }

    pub fn responses(&self) -> Vec<(String, RpcResponse)> {
        self.responses.lock().clone()
    }

    /// All responses sent for request `id`.
    pub fn responses_for(&self, id: &Id) -> Vec<RpcResponse> {
        self.responses.lock().iter().filter(|(_, r)| r.id() == id).map(|(_, r)| r.clone()).collect()
    }
}

#[async_trait]
impl SessionTransport for MockTransport {
    async fn approve_session(&self, params: ApproveSessionParams) -> eyre::Result<Session> {
        if let Some(msg) = self.rejection.lock().clone() {
            eyre::bail!(msg);
        }
        let session = Session { topic: Self::topic_for(params.id), namespaces: params.namespaces.clone() };
        self.approvals.lock().push(params);
        Ok(session)
    }

    async fn respond_request(&self, topic: &str, response: RpcResponse) -> eyre::Result<()> {
        self.responses.lock().push((topic.to_string(), response));
        if *self.undeliverable.lock() {
            eyre::bail!("relay connection closed");
        }
        Ok(())
    }
}

/// A signer that records what it is asked to sign and returns sequential txids.
#[derive(Debug, Default)]
pub struct MockSigner {
    transfers: Mutex<Vec<TransferRequest>>,
    calls: Mutex<Vec<CallDescriptor>>,
    transactions: Mutex<Vec<SignTransactionRequest>>,
    messages: Mutex<Vec<SignMessageRequest>>,
    failure: Mutex<Option<String>>,
    delay: Mutex<Option<Duration>>,
    nonce: Mutex<u64>,
}

impl MockSigner {
    pub fn fail_with(&self, msg: &str) {
        *self.failure.lock() = Some(msg.to_string());
    }

    /// Makes every following signature take `delay`.
    pub fn delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn transfers(&self) -> Vec<TransferRequest> {
        self.transfers.lock().clone()
    }

    pub fn calls(&self) -> Vec<CallDescriptor> {
        self.calls.lock().clone()
    }

    pub fn transactions(&self) -> Vec<SignTransactionRequest> {
        self.transactions.lock().clone()
    }

    pub fn messages(&self) -> Vec<SignMessageRequest> {
        self.messages.lock().clone()
    }

    async fn next_txid(&self) -> eyre::Result<String> {
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(msg) = self.failure.lock().clone() {
            eyre::bail!(msg);
        }
        let mut nonce = self.nonce.lock();
        *nonce += 1;
        Ok(format!("0x{:064x}", *nonce))
    }
}

#[async_trait]
impl WalletSigner for MockSigner {
    async fn transfer(&self, transfer: &TransferRequest) -> eyre::Result<TxResult> {
        let txid = self.next_txid().await?;
        self.transfers.lock().push(transfer.clone());
        Ok(TxResult { txid, transaction: "0x00".into() })
    }

    async fn call_contract(&self, call: &CallDescriptor) -> eyre::Result<TxResult> {
        let txid = self.next_txid().await?;
        self.calls.lock().push(call.clone());
        Ok(TxResult { txid, transaction: "0x00".into() })
    }

    async fn sign_transaction(
        &self,
        request: &SignTransactionRequest,
    ) -> eyre::Result<SignTransactionResult> {
        let txid = self.next_txid().await?;
        self.transactions.lock().push(request.clone());
        Ok(SignTransactionResult {
            signature: "0x01".into(),
            transaction: "0x00".into(),
            txid: request.broadcast.then_some(txid),
        })
    }

    async fn sign_message(&self, request: &SignMessageRequest) -> eyre::Result<SignMessageResult> {
        self.next_txid().await?;
        self.messages.lock().push(request.clone());
        Ok(SignMessageResult { signature: "0x02".into(), public_key: Some("0x03".into()) })
    }
}

/// Governance state held in memory.
#[derive(Debug, Default)]
pub struct MockOracle {
    proposals: Mutex<HashMap<u64, Proposal>>,
    members: Mutex<HashSet<StacksAddress>>,
    voting_power: Mutex<HashMap<StacksAddress, u64>>,
    treasury: Mutex<u128>,
    height: Mutex<u64>,
    failure: Mutex<Option<String>>,
}

impl MockOracle {
    pub fn insert_proposal(&self, proposal: Proposal) {
        self.proposals.lock().insert(proposal.id, proposal);
    }

    pub fn add_member(&self, member: StacksAddress, power: u64) {
        self.voting_power.lock().insert(member.clone(), power);
        self.members.lock().insert(member);
    }

    pub fn set_block_height(&self, height: u64) {
        *self.height.lock() = height;
    }

    pub fn set_treasury_balance(&self, micro_stx: u128) {
        *self.treasury.lock() = micro_stx;
    }

    pub fn fail_with(&self, msg: &str) {
        *self.failure.lock() = Some(msg.to_string());
    }

    fn check(&self) -> eyre::Result<()> {
        match self.failure.lock().clone() {
            Some(msg) => eyre::bail!(msg),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GovernanceOracle for MockOracle {
    async fn proposal(&self, _: &ContractIdentifier, id: u64) -> eyre::Result<Option<Proposal>> {
        self.check()?;
        Ok(self.proposals.lock().get(&id).cloned())
    }

    async fn is_member(&self, _: &ContractIdentifier, address: &StacksAddress) -> eyre::Result<bool> {
        self.check()?;
        Ok(self.members.lock().contains(address))
    }

    async fn voting_power(
        &self,
        _: &ContractIdentifier,
        address: &StacksAddress,
    ) -> eyre::Result<Option<u64>> {
        self.check()?;
        Ok(self.voting_power.lock().get(address).copied())
    }

    async fn treasury_balance(&self, _: &ContractIdentifier) -> eyre::Result<u128> {
        self.check()?;
        Ok(*self.treasury.lock())
    }

    async fn block_height(&self) -> eyre::Result<u64> {
        self.check()?;
        Ok(*self.height.lock())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObservedEvent {
    Approved(String),
    Rejected { id: u64, message: String },
    Deleted(String),
}

/// Records lifecycle callbacks in order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ObservedEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.lock().clone()
    }
}

impl SessionObserver for RecordingObserver {
    fn on_session_approved(&self, session: &Session) {
        self.events.lock().push(ObservedEvent::Approved(session.topic.clone()));
    }

    fn on_session_rejected(&self, proposal_id: u64, error: &WalletError) {
        self.events
            .lock()
            .push(ObservedEvent::Rejected { id: proposal_id, message: error.to_string() });
    }

    fn on_session_deleted(&self, topic: &str) {
        self.events.lock().push(ObservedEvent::Deleted(topic.to_string()));
    }
}
