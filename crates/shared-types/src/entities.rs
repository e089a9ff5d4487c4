//! # Core Identifiers
//!
//! Primitive identifiers shared by the ledger state and the transactors that
//! mutate it.
//!
//! ## Type Decisions
//!
//! - `Drops = u64` - Native amounts never go negative on-ledger and the total
//!   supply fits comfortably in 64 bits.
//! - `AccountId` is a newtype rather than a bare `[u8; 20]` so that signer
//!   entries can be ordered and displayed without helper functions at every
//!   call site.

use crate::errors::IdentifierError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha512};
use std::fmt;
use std::str::FromStr;

/// A 32-byte ledger key or digest.
pub type Hash = [u8; 32];

/// Native currency amount in drops.
pub type Drops = u64;

/// Length of an account identifier in bytes.
pub const ACCOUNT_ID_LEN: usize = 20;

/// A 20-byte account identifier.
///
/// Ordering is lexicographic over the raw bytes. This is the canonical order
/// signer entries are stored in. Serialized as upper-case hex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(pub [u8; ACCOUNT_ID_LEN]);

impl AccountId {
    /// The all-zero account. Never a valid owner.
    pub const ZERO: AccountId = AccountId([0u8; ACCOUNT_ID_LEN]);

    pub fn new(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Build an identifier whose last eight bytes hold `value` big-endian.
    ///
    /// Handy for fixtures where only the relative order of accounts matters.
    pub fn from_low_u64_be(value: u64) -> Self {
        let mut bytes = [0u8; ACCOUNT_ID_LEN];
        bytes[ACCOUNT_ID_LEN - 8..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ACCOUNT_ID_LEN]
    }
}

impl From<[u8; ACCOUNT_ID_LEN]> for AccountId {
    fn from(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl FromStr for AccountId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = hex::decode(s).map_err(|e| IdentifierError::InvalidHex(e.to_string()))?;
        let bytes: [u8; ACCOUNT_ID_LEN] =
            raw.as_slice()
                .try_into()
                .map_err(|_| IdentifierError::InvalidLength {
                    expected: ACCOUNT_ID_LEN,
                    actual: raw.len(),
                })?;
        Ok(Self(bytes))
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// First half of a SHA-512 digest over the concatenation of `parts`.
///
/// All ledger keys are derived through this function.
pub fn sha512_half(parts: &[&[u8]]) -> Hash {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest[..32]);
    out
}
