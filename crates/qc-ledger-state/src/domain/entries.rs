//! # Ledger Entries
//!
//! The ledger-resident records the apply layer reads and mutates.
//!
//! ## Ownership
//!
//! Entries are owned by the view they live in, keyed by their keylet hash.
//! Callers receive `&mut` handles that cannot outlive the borrow of the view,
//! so no handle survives past a single apply call.

use serde::{Deserialize, Serialize};
use shared_types::{AccountId, Drops, Hash};
use tracing::error;

/// Account flag: the master key may not sign for this account.
pub const LSF_DISABLE_MASTER: u32 = 0x0010_0000;

/// Signer list flag: the list was charged a single owner-count unit.
pub const LSF_ONE_OWNER_COUNT: u32 = 0x0001_0000;

/// Only one signer list per account exists today; its list id is always 0.
pub const DEFAULT_SIGNER_LIST_ID: u32 = 0;

/// Discriminant for the entry kinds stored in the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerEntryType {
    AccountRoot,
    DirectoryNode,
    SignerList,
}

/// An account's root record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRoot {
    pub account: AccountId,
    /// Current balance in drops.
    pub balance: Drops,
    /// Number of reserve-bearing units owned by the account.
    pub owner_count: u32,
    pub flags: u32,
    /// Alternate signing key, if one has been configured.
    pub regular_key: Option<AccountId>,
    pub sequence: u32,
}

impl AccountRoot {
    pub fn new(account: AccountId, balance: Drops) -> Self {
        Self {
            account,
            balance,
            owner_count: 0,
            flags: 0,
            regular_key: None,
            sequence: 1,
        }
    }

    /// Builder method to set account flags.
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Builder method to configure a regular key.
    pub fn with_regular_key(mut self, key: AccountId) -> Self {
        self.regular_key = Some(key);
        self
    }

    /// Builder method to set the owner count.
    pub fn with_owner_count(mut self, owner_count: u32) -> Self {
        self.owner_count = owner_count;
        self
    }

    pub fn is_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }

    pub fn is_master_disabled(&self) -> bool {
        self.is_flag(LSF_DISABLE_MASTER)
    }

    /// True when the account could still authorize a transaction without a
    /// signer list: either the master key is usable or a regular key is set.
    pub fn has_alternative_key(&self) -> bool {
        !self.is_master_disabled() || self.regular_key.is_some()
    }

    /// Apply a signed delta to the owner count, clamping at the `u32` bounds.
    ///
    /// Returns the new owner count. Going below zero means the ledger's
    /// accounting is already broken, so it is logged at error level.
    pub fn adjust_owner_count(&mut self, delta: i64) -> u32 {
        let adjusted = i64::from(self.owner_count).saturating_add(delta);
        self.owner_count = if adjusted < 0 {
            error!(
                account = %self.account,
                owner_count = self.owner_count,
                delta,
                "Account owner count set below 0!"
            );
            0
        } else if adjusted > i64::from(u32::MAX) {
            error!(
                account = %self.account,
                owner_count = self.owner_count,
                delta,
                "Account owner count exceeds max!"
            );
            u32::MAX
        } else {
            adjusted as u32
        };
        self.owner_count
    }
}

/// One co-signer authorized by a signer list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignerEntry {
    pub account: AccountId,
    pub weight: u16,
}

impl SignerEntry {
    pub fn new(account: AccountId, weight: u16) -> Self {
        Self { account, weight }
    }
}

/// Which owner-count rule was in force when a signer list was created.
///
/// Persisted on the list so that destruction refunds exactly what creation
/// charged, whatever rules are active at destruction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountingMode {
    /// Two units for the list plus one per entry.
    Legacy,
    /// One unit per list regardless of size.
    Current,
}

impl AccountingMode {
    /// Entry flags recording this mode.
    pub fn flags(self) -> u32 {
        match self {
            AccountingMode::Legacy => 0,
            AccountingMode::Current => LSF_ONE_OWNER_COUNT,
        }
    }

    /// Recover the mode from stored entry flags.
    pub fn from_flags(flags: u32) -> Self {
        if flags & LSF_ONE_OWNER_COUNT != 0 {
            AccountingMode::Current
        } else {
            AccountingMode::Legacy
        }
    }
}

/// A multi-signature signer list owned by one account.
///
/// Never edited in place: a replacement erases the old entry and inserts a
/// fresh one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerList {
    pub quorum: u32,
    pub list_id: u32,
    /// Sorted by account, no duplicates.
    pub entries: Vec<SignerEntry>,
    pub accounting: AccountingMode,
    /// Page of the owner directory holding this list's key.
    pub owner_node: u64,
}

impl SignerList {
    pub fn new(quorum: u32, entries: Vec<SignerEntry>, accounting: AccountingMode) -> Self {
        Self {
            quorum,
            list_id: DEFAULT_SIGNER_LIST_ID,
            entries,
            accounting,
            owner_node: 0,
        }
    }

    pub fn flags(&self) -> u32 {
        self.accounting.flags()
    }

    /// Sum of all entry weights.
    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.weight)).sum()
    }
}

/// One page of a directory.
///
/// Page 0 is the root. Pages form a circular doubly-linked list through the
/// root: the root's `index_previous` names the last page and the last page's
/// `index_next` is 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    /// Key of the root page of the directory this page belongs to.
    pub root_index: Hash,
    /// Owning account for owner directories.
    pub owner: Option<AccountId>,
    /// Keys of the entries listed on this page.
    pub indexes: Vec<Hash>,
    pub index_next: u64,
    pub index_previous: u64,
}

impl DirectoryNode {
    pub fn new(root_index: Hash) -> Self {
        Self {
            root_index,
            ..Default::default()
        }
    }
}

/// Any entry stored in the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEntry {
    AccountRoot(AccountRoot),
    DirectoryNode(DirectoryNode),
    SignerList(SignerList),
}

impl LedgerEntry {
    pub fn entry_type(&self) -> LedgerEntryType {
        match self {
            LedgerEntry::AccountRoot(_) => LedgerEntryType::AccountRoot,
            LedgerEntry::DirectoryNode(_) => LedgerEntryType::DirectoryNode,
            LedgerEntry::SignerList(_) => LedgerEntryType::SignerList,
        }
    }

    pub fn as_account_root(&self) -> Option<&AccountRoot> {
        match self {
            LedgerEntry::AccountRoot(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_account_root_mut(&mut self) -> Option<&mut AccountRoot> {
        match self {
            LedgerEntry::AccountRoot(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_directory(&self) -> Option<&DirectoryNode> {
        match self {
            LedgerEntry::DirectoryNode(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_directory_mut(&mut self) -> Option<&mut DirectoryNode> {
        match self {
            LedgerEntry::DirectoryNode(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_signer_list(&self) -> Option<&SignerList> {
        match self {
            LedgerEntry::SignerList(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_signer_list_mut(&mut self) -> Option<&mut SignerList> {
        match self {
            LedgerEntry::SignerList(s) => Some(s),
            _ => None,
        }
    }
}
