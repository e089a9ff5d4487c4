//! Inbound Ports (Driving Ports / API)

use crate::application::service::{ApplyReport, ServiceError};
use crate::domain::{SetSignerListTx, TxError};
use qc_ledger_state::InMemoryLedger;

/// Primary signer list API used by the apply pipeline.
pub trait SignerListApi {
    /// Submission-time check: classify and validate without the ledger.
    ///
    /// Only `TxError::Malformed` can come back from here.
    fn preflight(&self, tx: &SetSignerListTx) -> Result<(), TxError>;

    /// Apply `tx` to `ledger` as one atomic unit.
    ///
    /// Every transaction outcome, including rejections, is reported in the
    /// returned [`ApplyReport`]. `Err` means the service refused to run.
    fn apply(
        &mut self,
        ledger: &mut InMemoryLedger,
        tx: &SetSignerListTx,
    ) -> Result<ApplyReport, ServiceError>;
}
