//! # qc-signer-list
//!
//! Apply logic for `SignerListSet`: creating, replacing and destroying the
//! multi-signature signer list an account owns.
//!
//! ## Architecture
//!
//! - **Domain**: field classifier, stateless validator, reserve accountant,
//!   type-state apply stages, result taxonomy
//! - **Application**: apply engine over an `ApplyView`, and the service that
//!   runs it inside a sandbox
//! - **Ports**: inbound `SignerListApi`
//! - **Config**: TOML-loaded fees, rules, directory limits
//!
//! ## Result Classes
//!
//! ```text
//! tem*  malformed, found without the ledger, nothing charged
//! tec*  ledger consulted, fee claimed, change rolled back
//! tef*  ledger inconsistent, service halts
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::*;
pub use config::{ConfigError, SignerListConfig};
pub use domain::*;
pub use ports::SignerListApi;
