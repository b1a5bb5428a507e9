#![warn(unused_crate_dependencies, unreachable_pub)]

use dao_wallet::core::{ContractIdentifier, StacksAddress};

mod doubles;
pub use doubles::{MockOracle, MockSigner, MockTransport, ObservedEvent, RecordingObserver};

/// Devnet deployer account; the governance contract lives under it.
pub const DEPLOYER: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
pub const WALLET_1: &str = "ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG";
pub const WALLET_2: &str = "ST2JHG361ZXG51QTKY2NQCVBPPRRE2KZB1HR05NNC";
pub const WALLET_3: &str = "ST1SJ3DTE5DN7X54YDH5D64R3BCB6A2AG2ZQ8YPD5";
pub const MAINNET_ADDRESS: &str = "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7";

pub const GOVERNANCE_CONTRACT: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.dao-governance";

/// Initializes tracing for tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Parses one of the well-known addresses.
#[track_caller]
pub fn address(s: &str) -> StacksAddress {
    s.parse().unwrap()
}

#[track_caller]
pub fn governance_contract() -> ContractIdentifier {
    GOVERNANCE_CONTRACT.parse().unwrap()
}
