//! # Apply Engine
//!
//! Applies a validated signer list transaction to an [`ApplyView`].
//!
//! ## Atomicity
//!
//! The engine performs no compensating undo. A replace removes the old list
//! before it checks the reserve, so on any `Err` the caller must discard
//! every change made through the view (see `Sandbox::discard`).
//!
//! ## Refunds
//!
//! Removing a list refunds what its stored [`AccountingMode`] says it was
//! charged, never what the current rules would charge.

use crate::domain::{
    accounting_mode, owner_count_delta, preflight, Action, Claimed, Internal, SetSignerListTx,
    SignerListPayload, SignerListTx, TxError, Validated,
};
use qc_ledger_state::{
    keylet, AccountingMode, ApplyView, LedgerEntry, LedgerError, OwnerDirectory, PageHint,
    SignerList,
};
use shared_types::{AccountId, Drops};
use tracing::{debug, error, warn};

/// Ledger effect of a successful apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// A list was stored, replacing any previous one.
    Replaced {
        accounting: AccountingMode,
        /// Owner-count units charged for the new list.
        charged: u32,
        /// Owner-count units refunded for the list it replaced.
        refunded: u32,
        page: PageHint,
        owner_count: u32,
    },
    /// The list was removed, or there was none.
    Destroyed { refunded: u32 },
}

/// Classify, validate and apply `tx` against `view`.
pub fn apply<V: ApplyView + ?Sized>(view: &mut V, tx: &SetSignerListTx) -> Result<Applied, TxError> {
    let validated = preflight(tx)?;
    apply_validated(view, validated)
}

/// Apply a transaction that already passed classification and validation.
pub fn apply_validated<V: ApplyView + ?Sized>(
    view: &mut V,
    tx: SignerListTx<Validated>,
) -> Result<Applied, TxError> {
    let account = *tx.account();
    let prior_balance = tx.prior_balance();
    match tx.into_action() {
        Action::Replace(payload) => replace_signer_list(view, &account, prior_balance, payload),
        Action::Destroy => destroy_signer_list(view, &account),
    }
}

/// Create or replace `account`'s signer list.
pub fn replace_signer_list<V: ApplyView + ?Sized>(
    view: &mut V,
    account: &AccountId,
    prior_balance: Drops,
    payload: SignerListPayload,
) -> Result<Applied, TxError> {
    // Removing the old list first can only lower the reserve required below.
    let refunded = remove_signer_list_from_ledger(view, account)?;

    let owner_count = view
        .read_account(account)
        .map(|root| root.owner_count)
        .ok_or(Internal::AccountMissing { account: *account })?;

    let accounting = accounting_mode(view.rules());
    let charged = owner_count_delta(payload.entries.len(), accounting);
    let required = view
        .fees()
        .account_reserve(owner_count.saturating_add(charged));

    if prior_balance < required {
        warn!(
            account = %account,
            balance = prior_balance,
            required,
            "Insufficient reserve to create signer list"
        );
        return Err(Claimed::InsufficientReserve {
            balance: prior_balance,
            required,
        }
        .into());
    }

    let key = keylet::signers(account).key;
    let page = OwnerDirectory::new(*account)
        .insert(view, key)
        .map_err(|err| match err {
            LedgerError::DirectoryFull { .. } => {
                warn!(account = %account, "Owner directory full, signer list not created");
                TxError::from(Claimed::DirectoryFull { account: *account })
            }
            other => TxError::from(other),
        })?;

    let mut list = SignerList::new(payload.quorum, payload.entries, accounting);
    list.owner_node = page;
    let entry_count = list.entries.len();
    view.insert(key, LedgerEntry::SignerList(list))?;

    let owner_count = view
        .adjust_owner_count(account, i64::from(charged))
        .map_err(|_| Internal::AccountMissing { account: *account })?;

    debug!(
        account = %account,
        entries = entry_count,
        ?accounting,
        charged,
        refunded,
        owner_count,
        "Signer list set"
    );

    Ok(Applied::Replaced {
        accounting,
        charged,
        refunded,
        page,
        owner_count,
    })
}

/// Destroy `account`'s signer list, if any.
///
/// Refused when the account would be left with no usable signing key.
pub fn destroy_signer_list<V: ApplyView + ?Sized>(
    view: &mut V,
    account: &AccountId,
) -> Result<Applied, TxError> {
    let root = view
        .read_account(account)
        .ok_or(Internal::AccountMissing { account: *account })?;

    if !root.has_alternative_key() {
        warn!(
            account = %account,
            "Signer list destroy refused: master key disabled and no regular key"
        );
        return Err(Claimed::NoAlternativeKey { account: *account }.into());
    }

    let refunded = remove_signer_list_from_ledger(view, account)?;
    debug!(account = %account, refunded, "Signer list destroyed");
    Ok(Applied::Destroyed { refunded })
}

/// Remove `account`'s signer list from the ledger.
///
/// Succeeds with a refund of 0 when there is no list. Used by the destroy
/// and replace paths and by other transactors that tear down an account.
pub fn remove_signer_list_from_ledger<V: ApplyView + ?Sized>(
    view: &mut V,
    account: &AccountId,
) -> Result<u32, TxError> {
    let key = keylet::signers(account).key;
    let (hint, refund) = match view.read_signer_list(account) {
        Some(list) => (
            list.owner_node,
            owner_count_delta(list.entries.len(), list.accounting),
        ),
        None => return Ok(0),
    };

    OwnerDirectory::new(*account)
        .remove(view, hint, &key)
        .map_err(|source| {
            error!(
                account = %account,
                page = hint,
                %source,
                "Unable to delete SignerList from owner."
            );
            Internal::DirectoryRemove {
                account: *account,
                source,
            }
        })?;

    view.adjust_owner_count(account, -i64::from(refund))
        .map_err(|_| Internal::AccountMissing { account: *account })?;

    view.erase(&key)?;

    Ok(refund)
}
