//! Protocol feature gates active for a ledger version.

use super::errors::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Protocol amendments the apply layer consults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Feature {
    /// Signer lists cost one owner-count unit instead of `2 + entries`.
    MultiSignReserve,
}

impl Feature {
    pub const ALL: [Feature; 1] = [Feature::MultiSignReserve];

    pub fn name(self) -> &'static str {
        match self {
            Feature::MultiSignReserve => "MultiSignReserve",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| LedgerError::UnknownFeature(s.to_string()))
    }
}

/// Set of enabled features for one ledger version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    enabled: BTreeSet<Feature>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules with exactly `features` enabled.
    pub fn with_features<I: IntoIterator<Item = Feature>>(features: I) -> Self {
        Self {
            enabled: features.into_iter().collect(),
        }
    }

    pub fn enabled(&self, feature: Feature) -> bool {
        self.enabled.contains(&feature)
    }

    pub fn enable(&mut self, feature: Feature) {
        self.enabled.insert(feature);
    }

    pub fn disable(&mut self, feature: Feature) {
        self.enabled.remove(&feature);
    }

    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.enabled.iter().copied()
    }
}
