use crate::address::StacksAddress;
use serde::{Deserialize, Serialize};

/// On-chain state of a governance proposal, as reported by the read oracle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: u64,
    pub proposer: StacksAddress,
    pub title: String,
    pub description: String,
    pub recipient: StacksAddress,
    /// Requested amount in micro-STX.
    #[serde(deserialize_with = "crate::serde_helpers::uint::deserialize")]
    pub amount: u128,
    pub votes_for: u64,
    pub votes_against: u64,
    pub start_block: u64,
    pub end_block: u64,
    #[serde(default)]
    pub executed: bool,
    #[serde(default)]
    pub cancelled: bool,
}

impl Proposal {
    /// Whether votes are accepted at `height`.
    pub fn is_active(&self, height: u64) -> bool {
        !self.executed && !self.cancelled && (self.start_block..self.end_block).contains(&height)
    }

    /// Whether voting has closed at `height` with a strict majority in favour.
    pub fn has_passed(&self, height: u64) -> bool {
        !self.cancelled && height >= self.end_block && self.votes_for > self.votes_against
    }

    /// Whether the proposal can still be executed at `height`.
    pub fn is_executable(&self, height: u64) -> bool {
        !self.executed && self.has_passed(height)
    }
}
