//! Ports for ledger state access.
//!
//! The apply layer only ever sees these traits; the in-memory adapter is one
//! implementation of them.

pub mod view;

pub use view::{ApplyView, ReadView};
