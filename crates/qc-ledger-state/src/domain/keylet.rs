//! # Keylets
//!
//! Deterministic ledger keys. Each key is the SHA-512 half of a two-byte
//! namespace tag followed by the key material, so distinct entry kinds can
//! never collide for the same account.

use super::entries::{LedgerEntryType, DEFAULT_SIGNER_LIST_ID};
use shared_types::{sha512_half, AccountId, Hash};

/// Page number of a directory's root page.
pub const ROOT_PAGE: u64 = 0;

mod space {
    pub const ACCOUNT: u16 = b'a' as u16;
    pub const DIR_NODE: u16 = b'd' as u16;
    pub const OWNER_DIR: u16 = b'O' as u16;
    pub const SIGNER_LIST: u16 = b'S' as u16;
}

/// A ledger key paired with the entry type expected at that key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keylet {
    pub entry_type: LedgerEntryType,
    pub key: Hash,
}

impl Keylet {
    pub fn new(entry_type: LedgerEntryType, key: Hash) -> Self {
        Self { entry_type, key }
    }
}

/// Key of an account's root record.
pub fn account(id: &AccountId) -> Keylet {
    Keylet::new(
        LedgerEntryType::AccountRoot,
        sha512_half(&[&space::ACCOUNT.to_be_bytes(), id.as_bytes()]),
    )
}

/// Key of the root page of an account's owner directory.
pub fn owner_dir(id: &AccountId) -> Keylet {
    Keylet::new(
        LedgerEntryType::DirectoryNode,
        sha512_half(&[&space::OWNER_DIR.to_be_bytes(), id.as_bytes()]),
    )
}

/// Key of an account's signer list.
pub fn signers(id: &AccountId) -> Keylet {
    Keylet::new(
        LedgerEntryType::SignerList,
        sha512_half(&[
            &space::SIGNER_LIST.to_be_bytes(),
            id.as_bytes(),
            &DEFAULT_SIGNER_LIST_ID.to_be_bytes(),
        ]),
    )
}

/// Key of page `index` of the directory rooted at `root`.
///
/// Page 0 is the root page itself.
pub fn page(root: &Hash, index: u64) -> Keylet {
    if index == ROOT_PAGE {
        return Keylet::new(LedgerEntryType::DirectoryNode, *root);
    }
    Keylet::new(
        LedgerEntryType::DirectoryNode,
        sha512_half(&[&space::DIR_NODE.to_be_bytes(), root, &index.to_be_bytes()]),
    )
}
