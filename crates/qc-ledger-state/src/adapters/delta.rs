//! # Change Tracking
//!
//! Accumulates entry changes made through a [`Sandbox`](super::Sandbox).
//!
//! ## Coalescing
//!
//! Several operations on the same key collapse into the minimal diff against
//! the base ledger:
//!
//! - Create + Erase = no change
//! - Erase + Insert = Update (original previous, new current)
//! - Update + Update = Update (original previous, final current)
//! - Update + Erase = Delete (original previous)

use crate::domain::{LedgerEntry, LedgerError};
use shared_types::Hash;
use std::collections::BTreeMap;

/// A single change to a ledger entry relative to the base ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryChange {
    /// The key was empty in the base ledger.
    Created(LedgerEntry),
    /// The key held `previous` in the base ledger.
    Updated {
        previous: LedgerEntry,
        current: LedgerEntry,
    },
    /// The key held `previous` in the base ledger and is now empty.
    Deleted { previous: LedgerEntry },
}

impl EntryChange {
    pub fn current(&self) -> Option<&LedgerEntry> {
        match self {
            EntryChange::Created(entry) => Some(entry),
            EntryChange::Updated { current, .. } => Some(current),
            EntryChange::Deleted { .. } => None,
        }
    }

    pub fn current_mut(&mut self) -> Option<&mut LedgerEntry> {
        match self {
            EntryChange::Created(entry) => Some(entry),
            EntryChange::Updated { current, .. } => Some(current),
            EntryChange::Deleted { .. } => None,
        }
    }

    pub fn previous(&self) -> Option<&LedgerEntry> {
        match self {
            EntryChange::Created(_) => None,
            EntryChange::Updated { previous, .. } => Some(previous),
            EntryChange::Deleted { previous } => Some(previous),
        }
    }

    /// An update that left the entry unchanged.
    pub fn is_noop(&self) -> bool {
        matches!(self, EntryChange::Updated { previous, current } if previous == current)
    }
}

/// Ordered set of pending changes keyed by ledger key.
#[derive(Debug, Clone, Default)]
pub struct LedgerDelta {
    changes: BTreeMap<Hash, EntryChange>,
}

impl LedgerDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &Hash) -> Option<&EntryChange> {
        self.changes.get(key)
    }

    pub fn contains(&self, key: &Hash) -> bool {
        self.changes.contains_key(key)
    }

    /// Mutable handle to the current value at `key`. On first touch, `base`
    /// supplies the value from the underlying ledger.
    pub fn touch(&mut self, key: &Hash, base: Option<&LedgerEntry>) -> Option<&mut LedgerEntry> {
        if !self.changes.contains_key(key) {
            let entry = base?.clone();
            self.changes.insert(
                *key,
                EntryChange::Updated {
                    previous: entry.clone(),
                    current: entry,
                },
            );
        }
        self.changes.get_mut(key).and_then(EntryChange::current_mut)
    }

    /// Record an insertion. `base` is the value at `key` in the underlying
    /// ledger.
    pub fn record_insert(
        &mut self,
        key: Hash,
        entry: LedgerEntry,
        base: Option<&LedgerEntry>,
    ) -> Result<(), LedgerError> {
        let change = match self.changes.remove(&key) {
            Some(EntryChange::Deleted { previous }) => EntryChange::Updated {
                previous,
                current: entry,
            },
            Some(existing) => {
                self.changes.insert(key, existing);
                return Err(LedgerError::EntryExists { key });
            }
            None if base.is_some() => return Err(LedgerError::EntryExists { key }),
            None => EntryChange::Created(entry),
        };
        self.changes.insert(key, change);
        Ok(())
    }

    /// Record an erasure, returning the value that was live at `key`.
    pub fn record_erase(
        &mut self,
        key: &Hash,
        base: Option<&LedgerEntry>,
    ) -> Result<LedgerEntry, LedgerError> {
        match self.changes.remove(key) {
            Some(EntryChange::Created(entry)) => Ok(entry),
            Some(EntryChange::Updated { previous, current }) => {
                self.changes
                    .insert(*key, EntryChange::Deleted { previous });
                Ok(current)
            }
            Some(deleted @ EntryChange::Deleted { .. }) => {
                self.changes.insert(*key, deleted);
                Err(LedgerError::EntryNotFound { key: *key })
            }
            None => {
                let previous = base
                    .cloned()
                    .ok_or(LedgerError::EntryNotFound { key: *key })?;
                self.changes.insert(
                    *key,
                    EntryChange::Deleted {
                        previous: previous.clone(),
                    },
                );
                Ok(previous)
            }
        }
    }

    /// Changes that actually alter the base ledger, in key order.
    pub fn changes(&self) -> impl Iterator<Item = (&Hash, &EntryChange)> {
        self.changes.iter().filter(|(_, change)| !change.is_noop())
    }

    pub fn len(&self) -> usize {
        self.changes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn into_changes(self) -> impl Iterator<Item = (Hash, EntryChange)> {
        self.changes
            .into_iter()
            .filter(|(_, change)| !change.is_noop())
    }
}
