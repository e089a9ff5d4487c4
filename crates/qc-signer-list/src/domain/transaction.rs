//! The signer list transaction as received from the decoding layer.
//!
//! Fields stay optional here; deciding what a combination of fields means is
//! the classifier's job.

use qc_ledger_state::SignerEntry;
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, Drops};

/// One `SignerEntry` object as it appeared on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawSignerEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer_weight: Option<u16>,
}

impl RawSignerEntry {
    pub fn new(account: AccountId, weight: u16) -> Self {
        Self {
            account: Some(account),
            signer_weight: Some(weight),
        }
    }
}

impl From<SignerEntry> for RawSignerEntry {
    fn from(entry: SignerEntry) -> Self {
        Self::new(entry.account, entry.weight)
    }
}

/// A decoded `SignerListSet` transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetSignerListTx {
    /// Owning account.
    pub account: AccountId,
    #[serde(default)]
    pub signer_quorum: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer_entries: Option<Vec<RawSignerEntry>>,
    /// Balance of the owning account before this transaction's fee.
    #[serde(default)]
    pub prior_balance: Drops,
}

impl SetSignerListTx {
    /// Transaction that sets (creates or replaces) a signer list.
    pub fn set<I>(account: AccountId, quorum: u32, entries: I, prior_balance: Drops) -> Self
    where
        I: IntoIterator<Item = (AccountId, u16)>,
    {
        Self {
            account,
            signer_quorum: quorum,
            signer_entries: Some(
                entries
                    .into_iter()
                    .map(|(account, weight)| RawSignerEntry::new(account, weight))
                    .collect(),
            ),
            prior_balance,
        }
    }

    /// Transaction that destroys the account's signer list.
    pub fn destroy(account: AccountId, prior_balance: Drops) -> Self {
        Self {
            account,
            signer_quorum: 0,
            signer_entries: None,
            prior_balance,
        }
    }
}
