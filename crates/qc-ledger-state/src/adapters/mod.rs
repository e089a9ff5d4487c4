//! Adapters implementing the ledger view ports.

pub mod delta;
pub mod memory_ledger;

pub use delta::{EntryChange, LedgerDelta};
pub use memory_ledger::{InMemoryLedger, Sandbox};
