use crate::domain::{
    keylet, AccountRoot, DirectoryLimits, Fees, Keylet, LedgerEntry, LedgerError, Rules,
    SignerList,
};
use shared_types::{AccountId, Hash};

/// Read access to one ledger version.
pub trait ReadView {
    /// Entry stored at `key`, if any.
    fn read(&self, key: &Hash) -> Option<&LedgerEntry>;

    fn fees(&self) -> &Fees;

    fn rules(&self) -> &Rules;

    fn directory_limits(&self) -> &DirectoryLimits;

    fn exists(&self, key: &Hash) -> bool {
        self.read(key).is_some()
    }

    /// Entry at `keylet`, only if it has the keylet's type.
    fn read_keylet(&self, keylet: &Keylet) -> Option<&LedgerEntry> {
        self.read(&keylet.key)
            .filter(|entry| entry.entry_type() == keylet.entry_type)
    }

    fn read_account(&self, id: &AccountId) -> Option<&AccountRoot> {
        self.read_keylet(&keylet::account(id))
            .and_then(LedgerEntry::as_account_root)
    }

    fn read_signer_list(&self, id: &AccountId) -> Option<&SignerList> {
        self.read_keylet(&keylet::signers(id))
            .and_then(LedgerEntry::as_signer_list)
    }
}

/// Mutable access to one ledger version's working set.
///
/// Implementations own every entry. `peek` hands out a handle scoped to the
/// borrow of the view; mutations through it are part of the view's pending
/// changes.
pub trait ApplyView: ReadView {
    /// Exclusive handle to the entry at `key` for modification.
    fn peek(&mut self, key: &Hash) -> Option<&mut LedgerEntry>;

    /// Add a new entry. Fails if `key` is already occupied.
    fn insert(&mut self, key: Hash, entry: LedgerEntry) -> Result<(), LedgerError>;

    /// Remove the entry at `key`, returning it.
    fn erase(&mut self, key: &Hash) -> Result<LedgerEntry, LedgerError>;

    fn peek_keylet(&mut self, keylet: &Keylet) -> Option<&mut LedgerEntry> {
        let expected = keylet.entry_type;
        self.peek(&keylet.key)
            .filter(|entry| entry.entry_type() == expected)
    }

    fn peek_account(&mut self, id: &AccountId) -> Option<&mut AccountRoot> {
        self.peek_keylet(&keylet::account(id))
            .and_then(LedgerEntry::as_account_root_mut)
    }

    fn peek_signer_list(&mut self, id: &AccountId) -> Option<&mut SignerList> {
        self.peek_keylet(&keylet::signers(id))
            .and_then(LedgerEntry::as_signer_list_mut)
    }

    /// Apply `delta` to an account's owner count.
    ///
    /// Returns the new owner count.
    fn adjust_owner_count(&mut self, id: &AccountId, delta: i64) -> Result<u32, LedgerError> {
        let key = keylet::account(id).key;
        self.peek_account(id)
            .map(|root| root.adjust_owner_count(delta))
            .ok_or(LedgerError::EntryNotFound { key })
    }
}
