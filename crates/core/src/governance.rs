//! The governance contract's public functions.
//!
//! Function names and parameter schemas are part of the contract ABI: the kinds and order
//! below must match the deployed contract exactly.

use crate::{
    address::StacksAddress,
    clarity::{ArgKind, ArgMismatch, ArgSpec, ClarityValue, EncodedArg},
    error::{Result, WalletError},
    network::Network,
    units::StxAmount,
};
use serde::{Deserialize, Serialize};

/// Maximum length of a proposal title or description, in bytes.
pub const MAX_TEXT_LEN: usize = 256;

const CREATE_PROPOSAL: &[ArgSpec] = &[
    ArgSpec::string("title", ArgKind::AsciiString, MAX_TEXT_LEN),
    ArgSpec::string("description", ArgKind::AsciiString, MAX_TEXT_LEN),
    ArgSpec::new("recipient", ArgKind::Principal),
    ArgSpec::new("amount", ArgKind::Uint),
];
const VOTE: &[ArgSpec] =
    &[ArgSpec::new("proposal-id", ArgKind::Uint), ArgSpec::new("support", ArgKind::Bool)];
const PROPOSAL_ID: &[ArgSpec] = &[ArgSpec::new("proposal-id", ArgKind::Uint)];
const AMOUNT: &[ArgSpec] = &[ArgSpec::new("amount", ArgKind::Uint)];
const MEMBER: &[ArgSpec] = &[ArgSpec::new("member", ArgKind::Principal)];
const UPDATE_VOTING_POWER: &[ArgSpec] =
    &[ArgSpec::new("member", ArgKind::Principal), ArgSpec::new("new-power", ArgKind::Uint)];

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
#[strum(serialize_all = "kebab-case")]
pub enum GovernanceOperation {
    CreateProposal,
    Vote,
    ExecuteProposal,
    CancelProposal,
    #[strum(serialize = "deposit-to-treasury")]
    DepositTreasury,
    AddMember,
    RemoveMember,
    UpdateVotingPower,
}

impl GovernanceOperation {
    /// The contract function invoked for this operation.
    pub fn function_name(&self) -> &'static str {
        self.into()
    }

    /// Looks up the operation for a contract function name.
    pub fn from_function_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// The ordered parameter schema of the contract function.
    pub const fn schema(&self) -> &'static [ArgSpec] {
        match self {
            Self::CreateProposal => CREATE_PROPOSAL,
            Self::Vote => VOTE,
            Self::ExecuteProposal | Self::CancelProposal => PROPOSAL_ID,
            Self::DepositTreasury => AMOUNT,
            Self::AddMember | Self::RemoveMember => MEMBER,
            Self::UpdateVotingPower => UPDATE_VOTING_POWER,
        }
    }

    /// Checks decoded arguments against the schema, in count, kind and length.
    pub fn check_args(&self, args: &[ClarityValue]) -> Result<()> {
        let schema = self.schema();
        if args.len() != schema.len() {
            return Err(WalletError::invalid_arguments(
                self.function_name(),
                format!("expected {} arguments, got {}", schema.len(), args.len()),
            ));
        }
        for (spec, value) in schema.iter().zip(args) {
            spec.check(value).map_err(|err| match err {
                ArgMismatch::Encoding(err) => WalletError::Encoding(err),
                err => WalletError::invalid_arguments(self.function_name(), err),
            })?;
        }
        Ok(())
    }
}

/// A governance operation with its typed parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GovernanceCall {
    CreateProposal { title: String, description: String, recipient: String, amount: StxAmount },
    Vote { proposal_id: u64, support: bool },
    ExecuteProposal { proposal_id: u64 },
    CancelProposal { proposal_id: u64 },
    DepositTreasury { amount: StxAmount },
    AddMember { member: String },
    RemoveMember { member: String },
    UpdateVotingPower { member: String, new_power: u64 },
}

impl GovernanceCall {
    pub fn operation(&self) -> GovernanceOperation {
        match self {
            Self::CreateProposal { .. } => GovernanceOperation::CreateProposal,
            Self::Vote { .. } => GovernanceOperation::Vote,
            Self::ExecuteProposal { .. } => GovernanceOperation::ExecuteProposal,
            Self::CancelProposal { .. } => GovernanceOperation::CancelProposal,
            Self::DepositTreasury { .. } => GovernanceOperation::DepositTreasury,
            Self::AddMember { .. } => GovernanceOperation::AddMember,
            Self::RemoveMember { .. } => GovernanceOperation::RemoveMember,
            Self::UpdateVotingPower { .. } => GovernanceOperation::UpdateVotingPower,
        }
    }

    /// The proposal this call acts on, if any.
    pub fn proposal_id(&self) -> Option<u64> {
        match self {
            Self::Vote { proposal_id, .. }
            | Self::ExecuteProposal { proposal_id }
            | Self::CancelProposal { proposal_id } => Some(*proposal_id),
            _ => None,
        }
    }

    /// Validates the parameters and converts them into typed contract arguments.
    ///
    /// Amounts are converted from STX into micro-STX; addresses must belong to `network`.
    pub fn to_values(&self, network: Network) -> Result<Vec<ClarityValue>> {
        let principal = |s: &str| -> Result<ClarityValue> {
            Ok(ClarityValue::principal(&StacksAddress::parse_for(s, network)?))
        };
        let values = match self {
            Self::CreateProposal { title, description, recipient, amount } => vec![
                ClarityValue::AsciiString(title.clone()),
                ClarityValue::AsciiString(description.clone()),
                principal(recipient)?,
                ClarityValue::Uint(amount.to_micro()?),
            ],
            Self::Vote { proposal_id, support } => {
                vec![ClarityValue::Uint(*proposal_id as u128), ClarityValue::Bool(*support)]
            }
            Self::ExecuteProposal { proposal_id } | Self::CancelProposal { proposal_id } => {
                vec![ClarityValue::Uint(*proposal_id as u128)]
            }
            Self::DepositTreasury { amount } => vec![ClarityValue::Uint(amount.to_micro()?)],
            Self::AddMember { member } | Self::RemoveMember { member } => vec![principal(member)?],
            Self::UpdateVotingPower { member, new_power } => {
                vec![principal(member)?, ClarityValue::Uint(*new_power as u128)]
            }
        };
        self.operation().check_args(&values)?;
        Ok(values)
    }

    /// Encodes the parameters into the ordered literal argument list.
    pub fn encode_args(&self, network: Network) -> Result<Vec<EncodedArg>> {
        self.to_values(network)?
            .iter()
            .map(|value| value.encode().map_err(Into::into))
            .collect()
    }
}
