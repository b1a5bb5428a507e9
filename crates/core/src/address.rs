use crate::network::Network;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Length of a single-sig Stacks address in its c32 text form.
pub const ADDRESS_LEN: usize = 41;

const MAINNET_PREFIX: &str = "SP";
const TESTNET_PREFIX: &str = "ST";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("invalid address `{address}`: expected {ADDRESS_LEN} characters, got {len}")]
    InvalidLength { address: String, len: usize },
    #[error("invalid address `{0}`: must start with {MAINNET_PREFIX} or {TESTNET_PREFIX}")]
    InvalidPrefix(String),
    #[error("invalid address `{0}`: contains non-alphanumeric characters")]
    InvalidCharacters(String),
    #[error("address `{address}` is not a {network} address")]
    WrongNetwork { address: String, network: Network },
}

/// A syntactically valid Stacks account address.
///
/// Validation is purely syntactic (prefix and length); the c32 checksum is not verified.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StacksAddress(String);

impl StacksAddress {
    /// Parses an address of any network.
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        if s.len() != ADDRESS_LEN {
            return Err(AddressError::InvalidLength { address: s.to_string(), len: s.len() });
        }
        if !s.starts_with(MAINNET_PREFIX) && !s.starts_with(TESTNET_PREFIX) {
            return Err(AddressError::InvalidPrefix(s.to_string()));
        }
        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(AddressError::InvalidCharacters(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Parses an address and checks that it belongs to `network`.
    pub fn parse_for(s: &str, network: Network) -> Result<Self, AddressError> {
        let address = Self::parse(s)?;
        address.ensure_network(network)?;
        Ok(address)
    }

    /// Fails if this address carries another network's prefix.
    pub fn ensure_network(&self, network: Network) -> Result<(), AddressError> {
        if self.0.starts_with(network.address_prefix()) {
            Ok(())
        } else {
            Err(AddressError::WrongNetwork { address: self.0.clone(), network })
        }
    }

    pub fn is_mainnet(&self) -> bool {
        self.0.starts_with(MAINNET_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StacksAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StacksAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StacksAddress {
    type Error = AddressError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<StacksAddress> for String {
    fn from(address: StacksAddress) -> Self {
        address.0
    }
}

impl AsRef<str> for StacksAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
