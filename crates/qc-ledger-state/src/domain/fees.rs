//! Fee schedule, reserve function and directory limits for a ledger version.

use serde::{Deserialize, Serialize};
use shared_types::Drops;

/// Entries per directory page.
pub const DIR_NODE_MAX_ENTRIES: usize = 32;

/// Pages per directory.
pub const DIR_NODE_MAX_PAGES: u64 = 262_144;

/// Fee and reserve settings in force for one ledger version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fees {
    /// Reference transaction cost.
    pub base: Drops,
    /// Reserve every account must hold regardless of what it owns.
    pub reserve: Drops,
    /// Additional reserve per owner-count unit.
    pub increment: Drops,
}

impl Default for Fees {
    fn default() -> Self {
        Self {
            base: 10,
            reserve: 20_000_000,
            increment: 5_000_000,
        }
    }
}

impl Fees {
    pub fn new(base: Drops, reserve: Drops, increment: Drops) -> Self {
        Self {
            base,
            reserve,
            increment,
        }
    }

    /// Minimum balance for an account owning `owner_count` units.
    ///
    /// Monotonic in `owner_count`; saturates instead of overflowing.
    pub fn account_reserve(&self, owner_count: u32) -> Drops {
        self.reserve
            .saturating_add(self.increment.saturating_mul(u64::from(owner_count)))
    }
}

/// Size bounds on directories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryLimits {
    pub max_entries_per_page: usize,
    /// Page numbers must stay strictly below this value.
    pub max_pages: u64,
}

impl Default for DirectoryLimits {
    fn default() -> Self {
        Self {
            max_entries_per_page: DIR_NODE_MAX_ENTRIES,
            max_pages: DIR_NODE_MAX_PAGES,
        }
    }
}
