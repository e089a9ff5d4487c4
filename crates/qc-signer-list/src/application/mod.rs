pub mod engine;
pub mod service;

pub use engine::{
    apply, apply_validated, destroy_signer_list, remove_signer_list_from_ledger,
    replace_signer_list, Applied,
};
pub use service::{ApplyReport, ApplyStats, ServiceError, SignerListService};
