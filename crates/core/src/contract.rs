use crate::{address::StacksAddress, error::WalletError};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Separator between the deployer address and the contract name.
pub const CONTRACT_SEPARATOR: char = '.';

/// Maximum length of a Clarity contract name.
pub const MAX_CONTRACT_NAME_LEN: usize = 128;

/// Fully qualified contract identifier, `<address>.<contract-name>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContractIdentifier {
    address: StacksAddress,
    name: String,
}

impl ContractIdentifier {
    pub fn new(address: StacksAddress, name: impl Into<String>) -> Result<Self, WalletError> {
        let name = name.into();
        if !is_valid_contract_name(&name) {
            return Err(WalletError::MalformedIdentifier(format!("{address}.{name}")));
        }
        Ok(Self { address, name })
    }

    /// Parses `address.name`. Both segments must be non-empty, split on exactly one separator.
    pub fn parse(s: &str) -> Result<Self, WalletError> {
        let malformed = || WalletError::MalformedIdentifier(s.to_string());

        let mut parts = s.split(CONTRACT_SEPARATOR);
        let (Some(address), Some(name), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };
        if address.is_empty() || name.is_empty() {
            return Err(malformed());
        }
        let address = StacksAddress::parse(address).map_err(|_| malformed())?;
        Self::new(address, name).map_err(|_| malformed())
    }

    pub fn address(&self) -> &StacksAddress {
        &self.address
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Clarity names start with a letter and continue with letters, digits, `-` or `_`.
fn is_valid_contract_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else { return false };
    name.len() <= MAX_CONTRACT_NAME_LEN
        && first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl fmt::Display for ContractIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{CONTRACT_SEPARATOR}{}", self.address, self.name)
    }
}

impl FromStr for ContractIdentifier {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ContractIdentifier {
    type Error = WalletError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ContractIdentifier> for String {
    fn from(id: ContractIdentifier) -> Self {
        id.to_string()
    }
}
