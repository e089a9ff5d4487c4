//! # Stateless Validator
//!
//! Structural checks on a signer list payload. No ledger access: a signer
//! account does not have to exist yet.
//!
//! Checks run in a fixed order and the first failure is reported:
//!
//! 1. entry count within [`MIN_MULTI_SIGNERS`]..=[`MAX_MULTI_SIGNERS`]
//! 2. no duplicate accounts
//! 3. every weight positive
//! 4. the owner is not among the signers
//! 5. quorum positive and reachable by the total weight

use super::errors::Malformed;
use qc_ledger_state::SignerEntry;
use shared_types::AccountId;
use tracing::trace;

pub const MIN_MULTI_SIGNERS: usize = 1;
pub const MAX_MULTI_SIGNERS: usize = 8;

pub fn validate(quorum: u32, entries: &[SignerEntry], owner: &AccountId) -> Result<(), Malformed> {
    check_count(entries)?;
    check_duplicates(entries)?;
    check_weights(entries)?;
    check_self_reference(entries, owner)?;
    check_quorum(quorum, entries)
}

fn check_count(entries: &[SignerEntry]) -> Result<(), Malformed> {
    let count = entries.len();
    if (MIN_MULTI_SIGNERS..=MAX_MULTI_SIGNERS).contains(&count) {
        return Ok(());
    }
    trace!(count, "Too many or too few signers in signer list.");
    Err(Malformed::SignerCount {
        count,
        min: MIN_MULTI_SIGNERS,
        max: MAX_MULTI_SIGNERS,
    })
}

// Entries normally arrive sorted from the classifier. Sorting a copy keeps
// the check correct for callers that skipped that step.
fn check_duplicates(entries: &[SignerEntry]) -> Result<(), Malformed> {
    let mut accounts: Vec<AccountId> = entries.iter().map(|e| e.account).collect();
    accounts.sort_unstable();
    match accounts.windows(2).find(|pair| pair[0] == pair[1]) {
        Some(pair) => {
            let account = pair[0];
            trace!(account = %account, "Duplicate signers in signer list");
            Err(Malformed::DuplicateSigner { account })
        }
        None => Ok(()),
    }
}

fn check_weights(entries: &[SignerEntry]) -> Result<(), Malformed> {
    match entries.iter().find(|e| e.weight == 0) {
        Some(entry) => {
            trace!(account = %entry.account, "Every signer must have a positive weight.");
            Err(Malformed::ZeroWeight {
                account: entry.account,
            })
        }
        None => Ok(()),
    }
}

fn check_self_reference(entries: &[SignerEntry], owner: &AccountId) -> Result<(), Malformed> {
    if entries.iter().any(|e| e.account == *owner) {
        trace!(account = %owner, "A signer may not self reference account.");
        return Err(Malformed::SelfReference { account: *owner });
    }
    Ok(())
}

fn check_quorum(quorum: u32, entries: &[SignerEntry]) -> Result<(), Malformed> {
    let total_weight: u64 = entries.iter().map(|e| u64::from(e.weight)).sum();
    if quorum == 0 || total_weight < u64::from(quorum) {
        trace!(quorum, total_weight, "Quorum is unreachable");
        return Err(Malformed::QuorumUnreachable {
            quorum,
            total_weight,
        });
    }
    Ok(())
}
