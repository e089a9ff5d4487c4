//! # Reserve Accountant
//!
//! Owner-count cost of a signer list. The caller applies the sign: positive
//! when a list is created, negative when one is removed.

use qc_ledger_state::{AccountingMode, Feature, Rules};

/// Accounting mode for a list created under `rules`.
///
/// Only consulted on creation. Removal uses the mode stored on the list.
pub fn accounting_mode(rules: &Rules) -> AccountingMode {
    if rules.enabled(Feature::MultiSignReserve) {
        AccountingMode::Current
    } else {
        AccountingMode::Legacy
    }
}

/// Owner-count units charged for a list of `entry_count` signers.
pub fn owner_count_delta(entry_count: usize, mode: AccountingMode) -> u32 {
    match mode {
        AccountingMode::Legacy => {
            2u32.saturating_add(u32::try_from(entry_count).unwrap_or(u32::MAX))
        }
        AccountingMode::Current => 1,
    }
}
