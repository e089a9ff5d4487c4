//! # qc-ledger-state
//!
//! Versioned ledger state as seen by transaction apply logic.
//!
//! ## Role in System
//!
//! - **Entry Model**: account roots, signer lists and directory pages keyed by
//!   deterministic keylets
//! - **Ledger View Port**: `ReadView` / `ApplyView`, the only surface apply
//!   logic touches
//! - **Owner Directory**: paged doubly-linked index of the entries each
//!   account owns
//! - **Sandbox**: copy-on-write working view with commit/discard, giving the
//!   apply pipeline whole-transaction rollback
//!
//! ## Apply Flow
//!
//! ```text
//! [InMemoryLedger] ──sandbox()──→ [Sandbox] ──ApplyView──→ [Transactor]
//!        ↑                            │
//!        └──────── commit() ──────────┤ (success)
//!                                     └── discard() (rejection)
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
