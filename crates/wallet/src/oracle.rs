//! Read access to on-chain governance state.

use async_trait::async_trait;
use dao_wallet_core::{ContractIdentifier, Proposal, StacksAddress};

/// Answers read-only queries against a governance contract.
///
/// Lookups distinguish "not found" (`Ok(None)`) from a failed query (`Err`).
#[async_trait]
pub trait GovernanceOracle: Send + Sync {
    async fn proposal(
        &self,
        contract: &ContractIdentifier,
        id: u64,
    ) -> eyre::Result<Option<Proposal>>;

    async fn is_member(
        &self,
        contract: &ContractIdentifier,
        address: &StacksAddress,
    ) -> eyre::Result<bool>;

    /// Voting power of `address`, `None` if it has none recorded.
    async fn voting_power(
        &self,
        contract: &ContractIdentifier,
        address: &StacksAddress,
    ) -> eyre::Result<Option<u64>>;

    /// Treasury balance in micro-STX.
    async fn treasury_balance(&self, contract: &ContractIdentifier) -> eyre::Result<u128>;

    /// Current chain tip height.
    async fn block_height(&self) -> eyre::Result<u64>;
}
