//! # dao-wallet-config
//!
//! Wallet configuration.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use dao_wallet_core::{ContractIdentifier, Network, StacksAddress};
use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map},
};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

pub mod error;
pub use error::ExtractConfigError;

/// Events approved for a session whose proposal names none.
pub const DEFAULT_EVENTS: &[&str] = &["stx_accountsChanged", "stx_chainChanged"];

/// Wallet configuration.
///
/// Values are layered, lowest priority first: defaults, `dao-wallet.toml` in the root
/// directory, then `DAO_WALLET_*` environment variables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Network used when a request or namespace does not name one.
    pub network: Network,
    /// The DAO governance contract, `<address>.<contract-name>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub governance_contract: Option<ContractIdentifier>,
    /// Account the wallet starts connected with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<StacksAddress>,
    /// Upper bound on a single request, in seconds. `0` disables it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// Events approved when a session proposal names none.
    pub events: Vec<String>,
}

impl WalletConfig {
    /// The default config file name.
    pub const FILE_NAME: &'static str = "dao-wallet.toml";

    /// Environment variables with this prefix override file settings.
    pub const ENV_PREFIX: &'static str = "DAO_WALLET_";

    /// Overrides the config file location.
    pub const CONFIG_PATH_ENV: &'static str = "DAO_WALLET_CONFIG";

    /// Loads the config from the current directory.
    pub fn load() -> Result<Self, ExtractConfigError> {
        Self::load_with_root(".")
    }

    /// Loads the config rooted at `root`.
    ///
    /// See [`figment_with_root`](Self::figment_with_root) for more details.
    pub fn load_with_root(root: impl AsRef<Path>) -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment_with_root(root))
    }

    /// Attempts to extract a `WalletConfig` from `provider`.
    pub fn try_from<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        trace!("load config with provider: {:?}", provider.metadata());
        let figment = Figment::from(provider);
        let config = figment.extract::<Self>().map_err(ExtractConfigError::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the figment layering defaults, `<root>/dao-wallet.toml` and the environment.
    pub fn figment_with_root(root: impl AsRef<Path>) -> Figment {
        Figment::from(Self::default())
            .merge(Toml::file(Self::config_path(root.as_ref())))
            .merge(Env::prefixed(Self::ENV_PREFIX).ignore(&["CONFIG"]))
    }

    fn config_path(root: &Path) -> PathBuf {
        std::env::var_os(Self::CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| root.join(Self::FILE_NAME))
    }

    /// Configured addresses must belong to the configured network.
    fn validate(&self) -> Result<(), ExtractConfigError> {
        let invalid = |setting: &str, err: &dyn std::fmt::Display| {
            let mut err = figment::Error::from(err.to_string());
            err.path = vec![setting.to_string()];
            ExtractConfigError::new(err)
        };
        if let Some(contract) = &self.governance_contract {
            contract
                .address()
                .ensure_network(self.network)
                .map_err(|err| invalid("governance_contract", &err))?;
        }
        if let Some(account) = &self.account {
            account.ensure_network(self.network).map_err(|err| invalid("account", &err))?;
        }
        Ok(())
    }

    /// The per-request timeout, if enabled.
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout.filter(|secs| *secs > 0).map(Duration::from_secs)
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            governance_contract: None,
            account: None,
            request_timeout: None,
            events: DEFAULT_EVENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Provider for WalletConfig {
    fn metadata(&self) -> Metadata {
        Metadata::named("dao-wallet config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}
