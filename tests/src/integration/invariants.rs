//! # Ledger Audit
//!
//! Ledger-wide consistency checks for signer lists and owner directories,
//! run after every step of the integration flows.
//!
//! ## Checked
//!
//! - owner count equals what the account's signer list was charged
//! - each signer list key is in its owner's directory exactly once
//! - the list's stored page hint names the page holding its key
//! - every directory key names a live entry
//! - stored signers are strictly sorted by account

use qc_ledger_state::{
    keylet, InMemoryLedger, LedgerEntry, LedgerError, OwnerDirectory, ReadView,
};
use qc_signer_list::owner_count_delta;
use shared_types::{AccountId, Hash};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    OwnerCountMismatch {
        account: AccountId,
        expected: u32,
        actual: u32,
    },
    DirectoryEntryCount {
        account: AccountId,
        occurrences: usize,
    },
    WrongPageHint {
        account: AccountId,
        page: u64,
    },
    DanglingDirectoryEntry {
        account: AccountId,
        key: Hash,
    },
    UnsortedSigners {
        account: AccountId,
    },
    UnreadableDirectory {
        account: AccountId,
        error: LedgerError,
    },
}

/// Audit every account in `ledger`. Assumes accounts own nothing but their
/// signer list.
pub fn audit(ledger: &InMemoryLedger) -> Vec<Violation> {
    let accounts: Vec<(AccountId, u32)> = ledger
        .iter()
        .filter_map(|(_, entry)| entry.as_account_root())
        .map(|root| (root.account, root.owner_count))
        .collect();

    let mut violations = Vec::new();
    for (account, owner_count) in accounts {
        audit_account(ledger, &account, owner_count, &mut violations);
    }
    for violation in &violations {
        warn!(?violation, "Ledger audit failed");
    }
    violations
}

fn audit_account(
    ledger: &InMemoryLedger,
    account: &AccountId,
    owner_count: u32,
    violations: &mut Vec<Violation>,
) {
    let list = ledger.read_signer_list(account);
    let expected = list
        .map(|l| owner_count_delta(l.entries.len(), l.accounting))
        .unwrap_or(0);
    if expected != owner_count {
        violations.push(Violation::OwnerCountMismatch {
            account: *account,
            expected,
            actual: owner_count,
        });
    }

    let directory = OwnerDirectory::new(*account);
    let keys = match directory.entries(ledger) {
        Ok(keys) => keys,
        Err(error) => {
            violations.push(Violation::UnreadableDirectory {
                account: *account,
                error,
            });
            return;
        }
    };

    for key in keys.iter().filter(|key| !ledger.exists(key)) {
        violations.push(Violation::DanglingDirectoryEntry {
            account: *account,
            key: *key,
        });
    }

    let Some(list) = list else {
        return;
    };

    let list_key = keylet::signers(account).key;
    let occurrences = keys.iter().filter(|key| **key == list_key).count();
    if occurrences != 1 {
        violations.push(Violation::DirectoryEntryCount {
            account: *account,
            occurrences,
        });
    }

    let hinted = ledger
        .read(&keylet::page(&directory.keylet().key, list.owner_node).key)
        .and_then(LedgerEntry::as_directory)
        .is_some_and(|page| page.indexes.contains(&list_key));
    if !hinted {
        violations.push(Violation::WrongPageHint {
            account: *account,
            page: list.owner_node,
        });
    }

    if list.entries.windows(2).any(|w| w[0].account >= w[1].account) {
        violations.push(Violation::UnsortedSigners { account: *account });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use qc_ledger_state::{AccountRoot, ApplyView, Feature, Rules};
    use qc_signer_list::{SetSignerListTx, SignerListApi, SignerListConfig, SignerListService};

    fn id(n: u64) -> AccountId {
        AccountId::from_low_u64_be(n)
    }

    #[test]
    fn test_audit_flags_tampered_owner_count() {
        let mut ledger = SignerListConfig::default().build_ledger();
        ledger.put_account(AccountRoot::new(id(1), 1_000_000_000));
        let mut service = SignerListService::new();
        service
            .apply(
                &mut ledger,
                &SetSignerListTx::set(id(1), 1, [(id(2), 1)], 1_000_000_000),
            )
            .unwrap();
        assert!(audit(&ledger).is_empty());

        ledger.peek_account(&id(1)).unwrap().owner_count = 7;
        assert_eq!(
            audit(&ledger),
            vec![Violation::OwnerCountMismatch {
                account: id(1),
                expected: 1,
                actual: 7
            }]
        );
    }

    #[test]
    fn test_audit_flags_bad_hint() {
        let mut ledger = SignerListConfig::default().build_ledger();
        ledger.put_account(AccountRoot::new(id(1), 1_000_000_000));
        SignerListService::new()
            .apply(
                &mut ledger,
                &SetSignerListTx::set(id(1), 1, [(id(2), 1)], 1_000_000_000),
            )
            .unwrap();

        ledger.peek_signer_list(&id(1)).unwrap().owner_node = 3;
        assert_eq!(
            audit(&ledger),
            vec![Violation::WrongPageHint {
                account: id(1),
                page: 3
            }]
        );
    }

    // =========================================================================
    // RANDOM SEQUENCES
    // =========================================================================

    #[derive(Debug, Clone)]
    enum Step {
        Set {
            owner: u64,
            quorum: u32,
            signers: Vec<(u64, u16)>,
            balance: u64,
        },
        Destroy {
            owner: u64,
        },
        Upgrade,
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            4 => (
                1u64..4,
                0u32..6,
                proptest::collection::vec((1u64..12, 0u16..4), 0..10),
                prop_oneof![Just(0u64), Just(40_000_000u64), Just(1_000_000_000u64)],
            )
                .prop_map(|(owner, quorum, signers, balance)| Step::Set {
                    owner,
                    quorum,
                    signers,
                    balance,
                }),
            2 => (1u64..4).prop_map(|owner| Step::Destroy { owner }),
            1 => Just(Step::Upgrade),
        ]
    }

    proptest! {
        #[test]
        fn random_sequences_keep_ledger_consistent(steps in proptest::collection::vec(step(), 1..40)) {
            let config = SignerListConfig {
                features: vec![],
                ..SignerListConfig::default()
            };
            let mut ledger = config.build_ledger();
            for n in 1..4 {
                ledger.put_account(AccountRoot::new(id(n), 0));
            }
            let mut service = SignerListService::with_config(config);

            for step in steps {
                let before = ledger.clone();
                let tx = match step {
                    Step::Set { owner, quorum, signers, balance } => SetSignerListTx::set(
                        id(owner),
                        quorum,
                        signers.into_iter().map(|(n, w)| (id(n), w)),
                        balance,
                    ),
                    Step::Destroy { owner } => SetSignerListTx::destroy(id(owner), 0),
                    Step::Upgrade => {
                        ledger.set_rules(Rules::with_features([Feature::MultiSignReserve]));
                        continue;
                    }
                };

                let report = service.apply(&mut ledger, &tx).unwrap();
                prop_assert!(!report.code.is_internal(), "internal failure: {:?}", report);
                if !report.code.is_success() {
                    prop_assert_eq!(
                        ledger.iter().collect::<Vec<_>>(),
                        before.iter().collect::<Vec<_>>()
                    );
                }
                prop_assert_eq!(audit(&ledger), Vec::<Violation>::new());
            }
        }
    }
}
