//! # Type-State Apply Stages
//!
//! A signer list transaction moves through the apply engine as
//!
//! ```text
//! [SetSignerListTx] ──classify──→ [Classified] ──validate──→ [Validated] ──apply──→ result
//!        │                             │
//!        └── Invalid / bad entry ──────┴── Malformed (no ledger access)
//! ```
//!
//! Each stage is a distinct type and transitions consume `self`, so the
//! engine cannot be handed a payload that skipped validation.

use super::classifier::{classify, SignerListOperation};
use super::errors::Malformed;
use super::transaction::SetSignerListTx;
use super::validator::validate;
use qc_ledger_state::SignerEntry;
use shared_types::{AccountId, Drops};
use std::marker::PhantomData;
use tracing::trace;

// =============================================================================
// STATE MARKERS (Zero-Sized Types)
// =============================================================================

/// Marker: the operation is known and entries are canonically ordered.
#[derive(Debug, Clone, Copy)]
pub struct Classified;

/// Marker: the payload passed every structural check.
#[derive(Debug, Clone, Copy)]
pub struct Validated;

// =============================================================================
// PAYLOAD
// =============================================================================

/// Quorum and signers of a list to be stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignerListPayload {
    pub quorum: u32,
    /// Sorted by account.
    pub entries: Vec<SignerEntry>,
}

/// What the engine will do to the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Replace(SignerListPayload),
    Destroy,
}

// =============================================================================
// TYPE-STATE TRANSACTION
// =============================================================================

#[derive(Debug, Clone)]
pub struct SignerListTx<S> {
    account: AccountId,
    prior_balance: Drops,
    action: Action,
    _state: PhantomData<S>,
}

impl<S> SignerListTx<S> {
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn prior_balance(&self) -> Drops {
        self.prior_balance
    }

    pub fn action(&self) -> &Action {
        &self.action
    }
}

impl SignerListTx<Classified> {
    /// Run the field classifier. An `Invalid` shape is rejected here.
    pub fn classify(tx: &SetSignerListTx) -> Result<Self, Malformed> {
        let action = match classify(tx)? {
            SignerListOperation::Set { quorum, entries } => {
                Action::Replace(SignerListPayload { quorum, entries })
            }
            SignerListOperation::Destroy => Action::Destroy,
            SignerListOperation::Invalid => {
                trace!(
                    account = %tx.account,
                    "Malformed transaction: Invalid signer set list format."
                );
                return Err(Malformed::UnknownOperation);
            }
        };

        Ok(Self {
            account: tx.account,
            prior_balance: tx.prior_balance,
            action,
            _state: PhantomData,
        })
    }

    /// Run the stateless validator. A destroy carries no payload to check.
    pub fn validate(self) -> Result<SignerListTx<Validated>, Malformed> {
        if let Action::Replace(payload) = &self.action {
            validate(payload.quorum, &payload.entries, &self.account)?;
        }

        Ok(SignerListTx {
            account: self.account,
            prior_balance: self.prior_balance,
            action: self.action,
            _state: PhantomData,
        })
    }
}

impl SignerListTx<Validated> {
    pub fn into_action(self) -> Action {
        self.action
    }
}

/// Classify and validate in one step. No ledger access.
pub fn preflight(tx: &SetSignerListTx) -> Result<SignerListTx<Validated>, Malformed> {
    SignerListTx::classify(tx)?.validate()
}
