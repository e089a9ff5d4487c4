//! Configuration for the signer list transactor.
//!
//! # Config File Format
//!
//! ```toml
//! [fees]
//! base = 10
//! reserve = 20000000
//! increment = 5000000
//!
//! [rules]
//! features = ["MultiSignReserve"]
//!
//! [directory]
//! max_entries_per_page = 32
//! max_pages = 262144
//!
//! [service]
//! halt_on_internal = true
//! ```
//!
//! Every key is optional.

use qc_ledger_state::{
    DirectoryLimits, Feature, Fees, InMemoryLedger, Rules, DIR_NODE_MAX_ENTRIES,
    DIR_NODE_MAX_PAGES,
};
use serde::{Deserialize, Serialize};
use shared_types::Drops;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Signer list configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerListConfig {
    pub base_fee: Drops,
    pub reserve_base: Drops,
    pub reserve_increment: Drops,
    /// Features enabled on ledgers built from this config.
    pub features: Vec<Feature>,
    pub max_entries_per_page: usize,
    pub max_pages: u64,
    /// Stop applying after a ledger consistency failure.
    pub halt_on_internal: bool,
}

impl Default for SignerListConfig {
    fn default() -> Self {
        let fees = Fees::default();
        Self {
            base_fee: fees.base,
            reserve_base: fees.reserve,
            reserve_increment: fees.increment,
            features: vec![Feature::MultiSignReserve],
            max_entries_per_page: DIR_NODE_MAX_ENTRIES,
            max_pages: DIR_NODE_MAX_PAGES,
            halt_on_internal: true,
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    fees: FeesFile,
    #[serde(default)]
    rules: RulesFile,
    #[serde(default)]
    directory: DirectoryFile,
    #[serde(default)]
    service: ServiceFile,
}

#[derive(Debug, Default, Deserialize)]
struct FeesFile {
    base: Option<Drops>,
    reserve: Option<Drops>,
    increment: Option<Drops>,
}

#[derive(Debug, Default, Deserialize)]
struct RulesFile {
    features: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct DirectoryFile {
    max_entries_per_page: Option<usize>,
    max_pages: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ServiceFile {
    halt_on_internal: Option<bool>,
}

impl SignerListConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed, or names an
    /// unknown feature.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let defaults = Self::default();

        let features = match file.rules.features {
            Some(names) => names
                .iter()
                .map(|name| {
                    name.parse::<Feature>()
                        .map_err(|_| ConfigError::UnknownFeature(name.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.features,
        };

        Ok(Self {
            base_fee: file.fees.base.unwrap_or(defaults.base_fee),
            reserve_base: file.fees.reserve.unwrap_or(defaults.reserve_base),
            reserve_increment: file.fees.increment.unwrap_or(defaults.reserve_increment),
            features,
            max_entries_per_page: file
                .directory
                .max_entries_per_page
                .unwrap_or(defaults.max_entries_per_page),
            max_pages: file.directory.max_pages.unwrap_or(defaults.max_pages),
            halt_on_internal: file
                .service
                .halt_on_internal
                .unwrap_or(defaults.halt_on_internal),
        })
    }

    pub fn fees(&self) -> Fees {
        Fees::new(self.base_fee, self.reserve_base, self.reserve_increment)
    }

    pub fn rules(&self) -> Rules {
        Rules::with_features(self.features.iter().copied())
    }

    pub fn directory_limits(&self) -> DirectoryLimits {
        DirectoryLimits {
            max_entries_per_page: self.max_entries_per_page,
            max_pages: self.max_pages,
        }
    }

    /// An empty in-memory ledger using these fees, rules and limits.
    pub fn build_ledger(&self) -> InMemoryLedger {
        InMemoryLedger::new(self.fees(), self.rules(), self.directory_limits())
    }
}

/// Errors that can occur during config loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Unknown feature in config: {0}")]
    UnknownFeature(String),
}
