//! Error types for signer list transactions.
//!
//! Rejections are split by who pays for them:
//!
//! - [`Malformed`]: detected without the ledger, no fee is claimed
//! - [`Claimed`]: the ledger was consulted and the fee is claimed, but the
//!   requested change is rolled back
//! - [`Internal`]: the ledger is inconsistent; further application of this
//!   ledger version should stop

use qc_ledger_state::LedgerError;
use serde::{Deserialize, Serialize};
use shared_types::AccountId;
use std::fmt;
use thiserror::Error;

/// Stable result code reported to the apply pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultCode {
    TesSuccess,
    TemMalformed,
    TemBadSigner,
    TemBadWeight,
    TemBadQuorum,
    TecInsufficientReserve,
    TecDirFull,
    TecNoAlternativeKey,
    TefInternal,
    TefBadLedger,
}

impl ResultCode {
    /// Wire token, e.g. `tecDIR_FULL`.
    pub fn token(self) -> &'static str {
        match self {
            ResultCode::TesSuccess => "tesSUCCESS",
            ResultCode::TemMalformed => "temMALFORMED",
            ResultCode::TemBadSigner => "temBAD_SIGNER",
            ResultCode::TemBadWeight => "temBAD_WEIGHT",
            ResultCode::TemBadQuorum => "temBAD_QUORUM",
            ResultCode::TecInsufficientReserve => "tecINSUFFICIENT_RESERVE",
            ResultCode::TecDirFull => "tecDIR_FULL",
            ResultCode::TecNoAlternativeKey => "tecNO_ALTERNATIVE_KEY",
            ResultCode::TefInternal => "tefINTERNAL",
            ResultCode::TefBadLedger => "tefBAD_LEDGER",
        }
    }

    pub fn is_success(self) -> bool {
        self == ResultCode::TesSuccess
    }

    pub fn is_malformed(self) -> bool {
        matches!(
            self,
            ResultCode::TemMalformed
                | ResultCode::TemBadSigner
                | ResultCode::TemBadWeight
                | ResultCode::TemBadQuorum
        )
    }

    /// True when the fee is charged even though nothing else is applied.
    pub fn claims_fee(self) -> bool {
        matches!(
            self,
            ResultCode::TecInsufficientReserve
                | ResultCode::TecDirFull
                | ResultCode::TecNoAlternativeKey
        )
    }

    pub fn is_internal(self) -> bool {
        matches!(self, ResultCode::TefInternal | ResultCode::TefBadLedger)
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Shape and content failures found without reading the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformed {
    /// Quorum and entries do not describe a set or a destroy.
    #[error("Signer list fields describe neither a set nor a destroy")]
    UnknownOperation,

    /// A raw signer entry is missing a required field.
    #[error("Invalid signer set list format at entry {index}")]
    SignerEntryFormat { index: usize },

    #[error("Too many or too few signers: {count} (allowed {min}..={max})")]
    SignerCount { count: usize, min: usize, max: usize },

    #[error("Duplicate signers: {account}")]
    DuplicateSigner { account: AccountId },

    #[error("Every signer must have a positive weight: {account}")]
    ZeroWeight { account: AccountId },

    #[error("A signer may not self reference account: {account}")]
    SelfReference { account: AccountId },

    #[error("Quorum is unreachable: quorum {quorum}, total weight {total_weight}")]
    QuorumUnreachable { quorum: u32, total_weight: u64 },
}

impl Malformed {
    pub fn code(&self) -> ResultCode {
        match self {
            Malformed::UnknownOperation
            | Malformed::SignerEntryFormat { .. }
            | Malformed::SignerCount { .. } => ResultCode::TemMalformed,
            Malformed::DuplicateSigner { .. } | Malformed::SelfReference { .. } => {
                ResultCode::TemBadSigner
            }
            Malformed::ZeroWeight { .. } => ResultCode::TemBadWeight,
            Malformed::QuorumUnreachable { .. } => ResultCode::TemBadQuorum,
        }
    }
}

/// Ledger-dependent rejections that still claim the fee.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Claimed {
    #[error("Insufficient reserve: balance {balance}, required {required}")]
    InsufficientReserve { balance: u64, required: u64 },

    #[error("Owner directory full for {account}")]
    DirectoryFull { account: AccountId },

    /// Destroying the list would leave the account with no way to sign.
    #[error("No alternative key for {account}: master disabled and no regular key")]
    NoAlternativeKey { account: AccountId },
}

impl Claimed {
    pub fn code(&self) -> ResultCode {
        match self {
            Claimed::InsufficientReserve { .. } => ResultCode::TecInsufficientReserve,
            Claimed::DirectoryFull { .. } => ResultCode::TecDirFull,
            Claimed::NoAlternativeKey { .. } => ResultCode::TecNoAlternativeKey,
        }
    }
}

/// Ledger consistency failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Internal {
    #[error("Account root missing for {account}")]
    AccountMissing { account: AccountId },

    #[error("Unable to delete SignerList from owner {account}: {source}")]
    DirectoryRemove {
        account: AccountId,
        #[source]
        source: LedgerError,
    },

    #[error("Ledger operation failed: {0}")]
    Ledger(#[from] LedgerError),
}

impl Internal {
    pub fn code(&self) -> ResultCode {
        match self {
            Internal::AccountMissing { .. } | Internal::Ledger(_) => ResultCode::TefInternal,
            Internal::DirectoryRemove { .. } => ResultCode::TefBadLedger,
        }
    }
}

/// Any rejection of a signer list transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxError {
    #[error(transparent)]
    Malformed(#[from] Malformed),

    #[error(transparent)]
    Claimed(#[from] Claimed),

    #[error(transparent)]
    Internal(#[from] Internal),
}

impl TxError {
    pub fn code(&self) -> ResultCode {
        match self {
            TxError::Malformed(e) => e.code(),
            TxError::Claimed(e) => e.code(),
            TxError::Internal(e) => e.code(),
        }
    }
}

impl From<LedgerError> for TxError {
    fn from(err: LedgerError) -> Self {
        TxError::Internal(Internal::Ledger(err))
    }
}
