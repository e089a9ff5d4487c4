//! # Signer List Test Suite
//!
//! Cross-crate flows: transactions decoded from JSON, applied through the
//! service against a shared ledger, with ledger-wide invariants checked
//! after every step.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs       # scripted multi-account flows
//!     └── invariants.rs  # ledger-wide checks, random sequences
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p qc-tests integration::
//! ```

pub mod integration;
