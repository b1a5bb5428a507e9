use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// The namespace key (CAIP-2 chain family) every session is negotiated under.
pub const STACKS_NAMESPACE: &str = "stacks";

/// One of the named Stacks environments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
    Devnet,
}

impl Network {
    /// Returns the environment name, e.g. `testnet`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
        }
    }

    /// Returns the chain identifier, e.g. `stacks:testnet`.
    pub fn chain_id(&self) -> String {
        format!("{STACKS_NAMESPACE}:{}", self.as_str())
    }

    /// The two letter prefix every single-sig address on this network starts with.
    pub const fn address_prefix(&self) -> &'static str {
        match self {
            Self::Mainnet => "SP",
            Self::Testnet | Self::Devnet => "ST",
        }
    }

    pub const fn is_mainnet(&self) -> bool {
        matches!(self, Self::Mainnet)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a network name is not one of the known environments.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown network `{0}`, expected one of mainnet, testnet, devnet")]
pub struct UnknownNetwork(pub String);

impl FromStr for Network {
    type Err = UnknownNetwork;

    /// Accepts both the bare environment name and the full chain id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("stacks:").unwrap_or(s);
        match name.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "devnet" => Ok(Self::Devnet),
            _ => Err(UnknownNetwork(s.to_string())),
        }
    }
}

impl Serialize for Network {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
