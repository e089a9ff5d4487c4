use super::entries::LedgerEntryType;
use shared_types::Hash;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Entry already exists: {}", hex::encode(.key))]
    EntryExists { key: Hash },

    #[error("Entry not found: {}", hex::encode(.key))]
    EntryNotFound { key: Hash },

    #[error("Entry {} has type {actual:?}, expected {expected:?}", hex::encode(.key))]
    EntryTypeMismatch {
        key: Hash,
        expected: LedgerEntryType,
        actual: LedgerEntryType,
    },

    #[error("Directory full: {}", hex::encode(.directory))]
    DirectoryFull { directory: Hash },

    #[error("Key {} not found on directory page {page}", hex::encode(.key))]
    DirectoryEntryMissing { page: u64, key: Hash },

    #[error("Broken directory link: page {page} of {}", hex::encode(.directory))]
    BrokenDirectoryLink { directory: Hash, page: u64 },

    #[error("Unknown feature: {0}")]
    UnknownFeature(String),
}
