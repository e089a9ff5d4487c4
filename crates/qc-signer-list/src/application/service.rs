//! Signer List Service
//!
//! Main service implementing SignerListApi.

use super::engine::{apply_validated, Applied};
use crate::config::SignerListConfig;
use crate::domain::{preflight, ResultCode, SetSignerListTx, TxError};
use crate::ports::inbound::SignerListApi;
use qc_ledger_state::InMemoryLedger;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

/// Errors raised by the service itself rather than by a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// An earlier apply hit a ledger consistency failure.
    #[error("Signer list service halted after internal failure: {code}")]
    Halted { code: ResultCode },
}

/// Outcome of one apply call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplyReport {
    pub code: ResultCode,
    /// Ledger effect, present only on success.
    pub applied: Option<Applied>,
    /// Entries written to the ledger on commit.
    pub changes: usize,
    /// Rejection reason, absent on success.
    pub error: Option<TxError>,
}

impl ApplyReport {
    fn committed(applied: Applied, changes: usize) -> Self {
        Self {
            code: ResultCode::TesSuccess,
            applied: Some(applied),
            changes,
            error: None,
        }
    }

    fn rejected(error: TxError) -> Self {
        Self {
            code: error.code(),
            applied: None,
            changes: 0,
            error: Some(error),
        }
    }
}

/// Running totals by result class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ApplyStats {
    pub applied: u64,
    pub malformed: u64,
    pub claimed: u64,
    pub internal: u64,
}

impl ApplyStats {
    fn record(&mut self, code: ResultCode) {
        if code.is_success() {
            self.applied += 1;
        } else if code.is_malformed() {
            self.malformed += 1;
        } else if code.is_internal() {
            self.internal += 1;
        } else {
            self.claimed += 1;
        }
    }
}

/// Signer List Service
///
/// Orchestrates one transaction:
/// 1. Classify and validate
/// 2. Open a sandbox over the ledger
/// 3. Run the apply engine
/// 4. Commit on success, discard otherwise
pub struct SignerListService {
    config: SignerListConfig,
    halted: Option<ResultCode>,
    stats: ApplyStats,
}

impl SignerListService {
    /// Create a new service with default config
    pub fn new() -> Self {
        Self::with_config(SignerListConfig::default())
    }

    /// Create a new service with custom config
    pub fn with_config(config: SignerListConfig) -> Self {
        Self {
            config,
            halted: None,
            stats: ApplyStats::default(),
        }
    }

    pub fn config(&self) -> &SignerListConfig {
        &self.config
    }

    pub fn stats(&self) -> ApplyStats {
        self.stats
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// Resume applying after the ledger has been repaired or replaced.
    pub fn reset_halt(&mut self) {
        if let Some(code) = self.halted.take() {
            info!(%code, "Signer list service resumed");
        }
    }

    fn finish(&mut self, report: ApplyReport) -> ApplyReport {
        self.stats.record(report.code);
        if report.code.is_internal() && self.config.halt_on_internal {
            error!(code = %report.code, "Ledger inconsistency, halting signer list service");
            self.halted = Some(report.code);
        }
        report
    }
}

impl Default for SignerListService {
    fn default() -> Self {
        Self::new()
    }
}

impl SignerListApi for SignerListService {
    fn preflight(&self, tx: &SetSignerListTx) -> Result<(), TxError> {
        preflight(tx)?;
        Ok(())
    }

    fn apply(
        &mut self,
        ledger: &mut InMemoryLedger,
        tx: &SetSignerListTx,
    ) -> Result<ApplyReport, ServiceError> {
        if let Some(code) = self.halted {
            return Err(ServiceError::Halted { code });
        }

        let validated = match preflight(tx) {
            Ok(validated) => validated,
            Err(err) => return Ok(self.finish(ApplyReport::rejected(err.into()))),
        };

        let mut sandbox = ledger.sandbox();
        let report = match apply_validated(&mut sandbox, validated) {
            Ok(applied) => {
                let changes = sandbox.commit();
                ApplyReport::committed(applied, changes)
            }
            Err(err) => {
                sandbox.discard();
                ApplyReport::rejected(err)
            }
        };

        debug!(
            account = %tx.account,
            code = %report.code,
            changes = report.changes,
            "Signer list transaction applied"
        );

        Ok(self.finish(report))
    }
}
