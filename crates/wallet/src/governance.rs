//! Typed access to the DAO governance contract.

use crate::{oracle::GovernanceOracle, signer::WalletSigner};
use dao_wallet_core::{
    CallBuilder, CallDescriptor, ContractIdentifier, GovernanceCall, GovernanceError, Network,
    Proposal, StacksAddress, error::Result, request::TxResult,
};
use std::sync::Arc;

/// Builds, checks and submits governance calls on behalf of an account.
#[derive(Clone)]
pub struct GovernanceClient {
    builder: CallBuilder,
    oracle: Arc<dyn GovernanceOracle>,
    signer: Arc<dyn WalletSigner>,
    preflight: bool,
}

impl GovernanceClient {
    pub fn new(
        contract: ContractIdentifier,
        network: Network,
        oracle: Arc<dyn GovernanceOracle>,
        signer: Arc<dyn WalletSigner>,
    ) -> Self {
        Self { builder: CallBuilder::new(contract, network), oracle, signer, preflight: true }
    }

    /// Submits calls without consulting the oracle first.
    pub fn without_preflight(mut self) -> Self {
        self.preflight = false;
        self
    }

    pub fn contract(&self) -> &ContractIdentifier {
        self.builder.contract()
    }

    /// Builds the call descriptor without submitting it.
    pub fn build(
        &self,
        sender: Option<&StacksAddress>,
        call: &GovernanceCall,
    ) -> Result<CallDescriptor> {
        self.builder.build(sender, call)
    }

    /// Builds the call, checks it against on-chain state and hands it to the signer.
    pub async fn submit(
        &self,
        sender: Option<&StacksAddress>,
        call: &GovernanceCall,
    ) -> Result<TxResult> {
        let descriptor = self.build(sender, call)?;
        if self.preflight {
            self.preflight(&descriptor.sender, call).await?;
        }
        debug!(target: "wallet::governance", function = %descriptor.function_name, sender = %descriptor.sender, "submitting governance call");
        Ok(self.signer.call_contract(&descriptor).await?)
    }

    /// Checks the preconditions the contract would enforce, so doomed calls are not signed.
    pub async fn preflight(&self, sender: &StacksAddress, call: &GovernanceCall) -> Result<()> {
        match call {
            GovernanceCall::Vote { proposal_id, .. } => {
                let proposal = self.proposal(*proposal_id).await?;
                let height = self.oracle.block_height().await?;
                if !proposal.is_active(height) {
                    return Err(GovernanceError::ProposalNotActive(*proposal_id).into());
                }
                if !self.is_member(sender).await? {
                    return Err(GovernanceError::NotAMember(sender.clone()).into());
                }
            }
            GovernanceCall::ExecuteProposal { proposal_id } => {
                let proposal = self.proposal(*proposal_id).await?;
                if proposal.executed {
                    return Err(GovernanceError::AlreadyExecuted(*proposal_id).into());
                }
                let height = self.oracle.block_height().await?;
                if !proposal.has_passed(height) {
                    return Err(GovernanceError::ProposalNotPassed(*proposal_id).into());
                }
            }
            GovernanceCall::CancelProposal { proposal_id } => {
                let proposal = self.proposal(*proposal_id).await?;
                if proposal.executed {
                    return Err(GovernanceError::AlreadyExecuted(*proposal_id).into());
                }
            }
            GovernanceCall::CreateProposal { .. }
            | GovernanceCall::DepositTreasury { .. }
            | GovernanceCall::AddMember { .. }
            | GovernanceCall::RemoveMember { .. }
            | GovernanceCall::UpdateVotingPower { .. } => {}
        }
        trace!(target: "wallet::governance", operation = %call.operation(), "preflight passed");
        Ok(())
    }

    /// Fetches a proposal, failing if it does not exist.
    pub async fn proposal(&self, id: u64) -> Result<Proposal> {
        self.oracle
            .proposal(self.contract(), id)
            .await?
            .ok_or_else(|| GovernanceError::ProposalNotFound(id).into())
    }

    pub async fn is_member(&self, address: &StacksAddress) -> Result<bool> {
        Ok(self.oracle.is_member(self.contract(), address).await?)
    }

    /// Voting power of `address`, zero when none is recorded.
    pub async fn voting_power(&self, address: &StacksAddress) -> Result<u64> {
        Ok(self.oracle.voting_power(self.contract(), address).await?.unwrap_or_default())
    }

    /// Treasury balance in micro-STX.
    pub async fn treasury_balance(&self) -> Result<u128> {
        Ok(self.oracle.treasury_balance(self.contract()).await?)
    }
}
