//! # Signer List Properties
//!
//! Universally quantified checks over generated payloads.

use proptest::prelude::*;
use qc_ledger_state::{AccountRoot, AccountingMode, Fees, ReadView, SignerEntry};
use qc_signer_list::{
    classify, owner_count_delta, preflight, validate, Malformed, ResultCode, SetSignerListTx,
    SignerListApi, SignerListConfig, SignerListService, MAX_MULTI_SIGNERS,
};
use shared_types::AccountId;

const OWNER: u64 = 1_000;

fn owner() -> AccountId {
    AccountId::from_low_u64_be(OWNER)
}

/// Up to eight signers with distinct accounts, none of them the owner.
fn signers() -> impl Strategy<Value = Vec<SignerEntry>> {
    proptest::collection::btree_map(1u64..OWNER, 1u16..=u16::MAX, 1..=MAX_MULTI_SIGNERS).prop_map(
        |map| {
            map.into_iter()
                .map(|(n, w)| SignerEntry::new(AccountId::from_low_u64_be(n), w))
                .collect()
        },
    )
}

fn total_weight(entries: &[SignerEntry]) -> u64 {
    entries.iter().map(|e| u64::from(e.weight)).sum()
}

fn tx(quorum: u32, entries: &[SignerEntry], balance: u64) -> SetSignerListTx {
    SetSignerListTx::set(
        owner(),
        quorum,
        entries.iter().map(|e| (e.account, e.weight)),
        balance,
    )
}

proptest! {
    #[test]
    fn accepted_payloads_reach_quorum(entries in signers(), pick in 1u64..=u64::MAX) {
        let total = total_weight(&entries);
        let quorum = u32::try_from(1 + pick % total).unwrap();
        prop_assert_eq!(validate(quorum, &entries, &owner()), Ok(()));

        if let Ok(one_over) = u32::try_from(total + 1) {
            prop_assert_eq!(
                validate(one_over, &entries, &owner()),
                Err(Malformed::QuorumUnreachable { quorum: one_over, total_weight: total })
            );
        }
    }

    #[test]
    fn self_reference_always_rejected(
        mut entries in proptest::collection::btree_map(1u64..OWNER, 1u16..=u16::MAX, 0..MAX_MULTI_SIGNERS)
            .prop_map(|map| map.into_iter()
                .map(|(n, w)| SignerEntry::new(AccountId::from_low_u64_be(n), w))
                .collect::<Vec<_>>()),
        weight in 1u16..=u16::MAX,
        quorum in 1u32..1_000,
    ) {
        entries.push(SignerEntry::new(owner(), weight));
        let err = preflight(&tx(quorum, &entries, 0)).unwrap_err();
        prop_assert_eq!(err, Malformed::SelfReference { account: owner() });
    }

    #[test]
    fn duplicates_always_rejected(w1 in 0u16..=u16::MAX, w2 in 0u16..=u16::MAX, quorum in 1u32..=u32::MAX) {
        let a = AccountId::from_low_u64_be(7);
        let err = preflight(&SetSignerListTx::set(owner(), quorum, [(a, w1), (a, w2)], 0)).unwrap_err();
        prop_assert_eq!(err.code(), ResultCode::TemBadSigner);
        prop_assert_eq!(err, Malformed::DuplicateSigner { account: a });
    }

    #[test]
    fn classification_ignores_entry_order(entries in signers(), quorum in 1u32..100) {
        let forward = classify(&tx(quorum, &entries, 0)).unwrap();
        let mut reversed = entries.clone();
        reversed.reverse();
        prop_assert_eq!(forward, classify(&tx(quorum, &reversed, 0)).unwrap());
    }

    #[test]
    fn reserve_non_decreasing_in_entry_count(base in 0u64..1_000_000, inc in 0u64..1_000_000, owned in 0u32..1_000) {
        let fees = Fees::new(10, base, inc);
        for mode in [AccountingMode::Legacy, AccountingMode::Current] {
            for n in 1..MAX_MULTI_SIGNERS {
                let smaller = fees.account_reserve(owned + owner_count_delta(n, mode));
                let larger = fees.account_reserve(owned + owner_count_delta(n + 1, mode));
                prop_assert!(smaller <= larger);
            }
        }
    }

    #[test]
    fn reserve_boundary_is_exact(entries in signers(), legacy in any::<bool>()) {
        let config = SignerListConfig {
            features: if legacy { vec![] } else { SignerListConfig::default().features },
            ..SignerListConfig::default()
        };
        let mode = if legacy { AccountingMode::Legacy } else { AccountingMode::Current };
        let required = config.fees().account_reserve(owner_count_delta(entries.len(), mode));
        let quorum = 1;

        let mut service = SignerListService::with_config(config.clone());

        let mut ledger = config.build_ledger();
        ledger.put_account(AccountRoot::new(owner(), required));
        let report = service.apply(&mut ledger, &tx(quorum, &entries, required)).unwrap();
        prop_assert_eq!(report.code, ResultCode::TesSuccess);

        let mut ledger = config.build_ledger();
        ledger.put_account(AccountRoot::new(owner(), required - 1));
        let report = service.apply(&mut ledger, &tx(quorum, &entries, required - 1)).unwrap();
        prop_assert_eq!(report.code, ResultCode::TecInsufficientReserve);
        prop_assert_eq!(ledger.read_account(&owner()).unwrap().owner_count, 0);
    }
}
