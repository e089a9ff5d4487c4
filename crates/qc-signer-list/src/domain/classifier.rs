//! # Field Classifier
//!
//! Decides what a `SignerListSet` transaction asks for from its fields alone.
//!
//! | `SignerQuorum` | `SignerEntries` | Operation  |
//! |----------------|-----------------|------------|
//! | non-zero       | present         | `Set`      |
//! | zero           | absent          | `Destroy`  |
//! | anything else  |                 | `Invalid`  |
//!
//! Entries are deserialized before the operation is decided, so a malformed
//! entry is reported even when the field combination is also invalid.

use super::errors::Malformed;
use super::transaction::{RawSignerEntry, SetSignerListTx};
use qc_ledger_state::SignerEntry;
use tracing::trace;

/// The operation a transaction requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignerListOperation {
    /// Create or replace the signer list. `entries` are sorted by account.
    Set {
        quorum: u32,
        entries: Vec<SignerEntry>,
    },
    Destroy,
    /// The fields describe neither of the above.
    Invalid,
}

/// Classify `tx`.
///
/// Pure: depends on nothing but the transaction's fields, so it yields the
/// same answer at submission and at apply time.
pub fn classify(tx: &SetSignerListTx) -> Result<SignerListOperation, Malformed> {
    let entries = tx
        .signer_entries
        .as_deref()
        .map(deserialize_entries)
        .transpose()?;

    Ok(match (tx.signer_quorum, entries) {
        (quorum, Some(mut entries)) if quorum != 0 => {
            entries.sort_by_key(|entry| entry.account);
            SignerListOperation::Set { quorum, entries }
        }
        (0, None) => SignerListOperation::Destroy,
        _ => SignerListOperation::Invalid,
    })
}

fn deserialize_entries(raw: &[RawSignerEntry]) -> Result<Vec<SignerEntry>, Malformed> {
    raw.iter()
        .enumerate()
        .map(|(index, entry)| match (entry.account, entry.signer_weight) {
            (Some(account), Some(weight)) => Ok(SignerEntry::new(account, weight)),
            _ => {
                trace!(index, "Malformed transaction: Invalid signer set list format.");
                Err(Malformed::SignerEntryFormat { index })
            }
        })
        .collect()
}
