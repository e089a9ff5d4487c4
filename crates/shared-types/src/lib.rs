//! # Shared Types Crate
//!
//! Primitive identifiers used across the ledger workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: account identifiers, ledger keys and native
//!   amounts are defined once here.
//! - **No Ledger Semantics**: nothing in this crate knows about ledger entry
//!   layouts or transaction rules.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
