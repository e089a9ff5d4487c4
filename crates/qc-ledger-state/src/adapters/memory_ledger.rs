use super::delta::{EntryChange, LedgerDelta};
use crate::domain::{keylet, AccountRoot, DirectoryLimits, Fees, LedgerEntry, LedgerError, Rules};
use crate::ports::{ApplyView, ReadView};
use shared_types::Hash;
use std::collections::BTreeMap;
use tracing::debug;

/// In-memory ledger version.
///
/// Owns every entry by key. Transactions are applied through a [`Sandbox`]
/// so that a rejected transaction leaves this ledger untouched.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    entries: BTreeMap<Hash, LedgerEntry>,
    fees: Fees,
    rules: Rules,
    limits: DirectoryLimits,
}

impl InMemoryLedger {
    pub fn new(fees: Fees, rules: Rules, limits: DirectoryLimits) -> Self {
        Self {
            entries: BTreeMap::new(),
            fees,
            rules,
            limits,
        }
    }

    /// Insert or overwrite an account root. Intended for genesis and fixtures.
    pub fn put_account(&mut self, account: AccountRoot) {
        self.entries.insert(
            keylet::account(&account.account).key,
            LedgerEntry::AccountRoot(account),
        );
    }

    /// Replace the active rule set, e.g. when an amendment activates between
    /// ledger versions.
    pub fn set_rules(&mut self, rules: Rules) {
        self.rules = rules;
    }

    pub fn set_fees(&mut self, fees: Fees) {
        self.fees = fees;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Hash, &LedgerEntry)> {
        self.entries.iter()
    }

    /// Open a sandbox over this ledger. Nothing reaches the ledger until the
    /// sandbox is committed.
    pub fn sandbox(&mut self) -> Sandbox<'_> {
        Sandbox {
            base: self,
            delta: LedgerDelta::new(),
        }
    }
}

impl ReadView for InMemoryLedger {
    fn read(&self, key: &Hash) -> Option<&LedgerEntry> {
        self.entries.get(key)
    }

    fn fees(&self) -> &Fees {
        &self.fees
    }

    fn rules(&self) -> &Rules {
        &self.rules
    }

    fn directory_limits(&self) -> &DirectoryLimits {
        &self.limits
    }
}

impl ApplyView for InMemoryLedger {
    fn peek(&mut self, key: &Hash) -> Option<&mut LedgerEntry> {
        self.entries.get_mut(key)
    }

    fn insert(&mut self, key: Hash, entry: LedgerEntry) -> Result<(), LedgerError> {
        if self.entries.contains_key(&key) {
            return Err(LedgerError::EntryExists { key });
        }
        self.entries.insert(key, entry);
        Ok(())
    }

    fn erase(&mut self, key: &Hash) -> Result<LedgerEntry, LedgerError> {
        self.entries
            .remove(key)
            .ok_or(LedgerError::EntryNotFound { key: *key })
    }
}

/// Copy-on-write working view over an [`InMemoryLedger`].
///
/// Reads fall through to the base ledger; writes are recorded in a
/// [`LedgerDelta`]. Dropping the sandbox discards every pending change.
pub struct Sandbox<'a> {
    base: &'a mut InMemoryLedger,
    delta: LedgerDelta,
}

impl<'a> Sandbox<'a> {
    /// Pending changes relative to the base ledger.
    pub fn delta(&self) -> &LedgerDelta {
        &self.delta
    }

    /// Write every pending change into the base ledger.
    ///
    /// Returns the number of entries changed.
    pub fn commit(self) -> usize {
        let Sandbox { base, delta } = self;
        let mut applied = 0;
        for (key, change) in delta.into_changes() {
            match change {
                EntryChange::Created(entry) | EntryChange::Updated { current: entry, .. } => {
                    base.entries.insert(key, entry);
                }
                EntryChange::Deleted { .. } => {
                    base.entries.remove(&key);
                }
            }
            applied += 1;
        }
        debug!(changes = applied, "Sandbox committed");
        applied
    }

    /// Drop every pending change.
    pub fn discard(self) {
        debug!(changes = self.delta.len(), "Sandbox discarded");
    }
}

impl ReadView for Sandbox<'_> {
    fn read(&self, key: &Hash) -> Option<&LedgerEntry> {
        match self.delta.get(key) {
            Some(change) => change.current(),
            None => self.base.entries.get(key),
        }
    }

    fn fees(&self) -> &Fees {
        &self.base.fees
    }

    fn rules(&self) -> &Rules {
        &self.base.rules
    }

    fn directory_limits(&self) -> &DirectoryLimits {
        &self.base.limits
    }
}

impl ApplyView for Sandbox<'_> {
    fn peek(&mut self, key: &Hash) -> Option<&mut LedgerEntry> {
        self.delta.touch(key, self.base.entries.get(key))
    }

    fn insert(&mut self, key: Hash, entry: LedgerEntry) -> Result<(), LedgerError> {
        self.delta
            .record_insert(key, entry, self.base.entries.get(&key))
    }

    fn erase(&mut self, key: &Hash) -> Result<LedgerEntry, LedgerError> {
        self.delta.record_erase(key, self.base.entries.get(key))
    }
}
