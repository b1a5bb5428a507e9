//! error handling for config extraction
use figment::providers::{Format, Toml};
use std::{collections::HashSet, error::Error, fmt};

/// The message shown when the config could not be extracted from the figment
pub const FAILED_TO_EXTRACT_CONFIG_MSG: &str = "failed to extract dao-wallet config:";

/// Represents a failed attempt to extract `WalletConfig` from a `Figment`
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractConfigError {
    /// error thrown when extracting the `WalletConfig`
    pub(crate) error: figment::Error,
}

impl ExtractConfigError {
    /// Wraps the figment error
    pub fn new(error: figment::Error) -> Self {
        Self { error }
    }

    /// The underlying figment errors, one per failing setting.
    pub fn errors(&self) -> impl Iterator<Item = figment::Error> {
        self.error.clone().into_iter()
    }
}

impl fmt::Display for ExtractConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut unique = HashSet::with_capacity(self.error.count());
        writeln!(f, "{FAILED_TO_EXTRACT_CONFIG_MSG}")?;
        for err in self.errors() {
            let err = if err.metadata.as_ref().is_some_and(|meta| meta.name.contains(Toml::NAME)) {
                ConfigError::Toml(err)
            } else {
                ConfigError::Other(err)
            };
            let msg = err.to_string();
            if unique.insert(msg.clone()) {
                writeln!(f, "{msg}")?;
            }
        }
        Ok(())
    }
}

impl Error for ExtractConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Error::source(&self.error)
    }
}

/// Represents an error that can occur when constructing the `WalletConfig`
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// An error thrown during toml parsing
    Toml(figment::Error),
    /// Any other error thrown when constructing the config's figment
    Other(figment::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_err = |err: &figment::Error, f: &mut fmt::Formatter<'_>| {
            write!(f, "{err}")?;
            if !err.path.is_empty() {
                // the path will contain the setting name like `["network"]`
                write!(f, " for setting `{}`", err.path.join("."))?;
            }
            Ok(())
        };

        match self {
            Self::Toml(err) => {
                f.write_str("dao-wallet.toml error: ")?;
                fmt_err(err, f)
            }
            Self::Other(err) => {
                f.write_str("dao-wallet config error: ")?;
                fmt_err(err, f)
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Other(error) | Self::Toml(error) => Error::source(error),
        }
    }
}
