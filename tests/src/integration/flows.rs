//! # Integration Test Flows
//!
//! Scripted flows across `qc-ledger-state` and `qc-signer-list`:
//!
//! 1. **Decode → preflight → apply**: transactions arrive as JSON, are
//!    shape-checked without the ledger, then applied through the service
//! 2. **Shared directories**: several accounts' lists living in one ledger
//! 3. **Amendment activation**: rules change between applies; refunds follow
//!    the mode stored on each list
//! 4. **Account teardown**: another transactor removing a list through the
//!    external removal entry point

#[cfg(test)]
mod tests {
    use crate::integration::invariants::audit;
    use qc_ledger_state::{
        keylet, AccountRoot, AccountingMode, Feature, InMemoryLedger, OwnerDirectory, ReadView,
        Rules,
    };
    use qc_signer_list::{
        remove_signer_list_from_ledger, ResultCode, SetSignerListTx, SignerListApi,
        SignerListConfig, SignerListService, TxError,
    };
    use shared_types::AccountId;
    use tracing_subscriber::EnvFilter;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    const FUNDED: u64 = 1_000_000_000;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn id(n: u64) -> AccountId {
        AccountId::from_low_u64_be(n)
    }

    fn genesis(config: &SignerListConfig, accounts: &[u64]) -> InMemoryLedger {
        let mut ledger = config.build_ledger();
        for n in accounts {
            ledger.put_account(AccountRoot::new(id(*n), FUNDED));
        }
        ledger
    }

    fn decode(json: &str) -> SetSignerListTx {
        serde_json::from_str(json).unwrap()
    }

    // =========================================================================
    // DECODE → PREFLIGHT → APPLY
    // =========================================================================

    #[test]
    fn test_json_transaction_flow() {
        init_tracing();
        let config = SignerListConfig::default();
        let mut ledger = genesis(&config, &[1]);
        let mut service = SignerListService::with_config(config);

        let tx = decode(&format!(
            r#"{{
                "Account": "{}",
                "SignerQuorum": 3,
                "SignerEntries": [
                    {{"Account": "{}", "SignerWeight": 2}},
                    {{"Account": "{}", "SignerWeight": 1}}
                ],
                "PriorBalance": {FUNDED}
            }}"#,
            id(1),
            id(3),
            id(2)
        ));

        service.preflight(&tx).unwrap();
        let report = service.apply(&mut ledger, &tx).unwrap();
        assert_eq!(report.code, ResultCode::TesSuccess);

        let list = ledger.read_signer_list(&id(1)).unwrap();
        assert_eq!(list.entries[0].account, id(2));
        assert_eq!(list.entries[1].account, id(3));
        assert!(audit(&ledger).is_empty());
    }

    #[test]
    fn test_entry_missing_weight_is_malformed_at_both_stages() {
        let config = SignerListConfig::default();
        let mut ledger = genesis(&config, &[1]);
        let mut service = SignerListService::with_config(config);

        let tx = decode(&format!(
            r#"{{"Account": "{}", "SignerQuorum": 1, "SignerEntries": [{{"Account": "{}"}}]}}"#,
            id(1),
            id(2)
        ));

        let err = service.preflight(&tx).unwrap_err();
        assert!(matches!(err, TxError::Malformed(_)));
        assert_eq!(err.code(), ResultCode::TemMalformed);

        let report = service.apply(&mut ledger, &tx).unwrap();
        assert_eq!(report.code, ResultCode::TemMalformed);
        assert_eq!(report.changes, 0);
    }

    // =========================================================================
    // SHARED DIRECTORIES
    // =========================================================================

    #[test]
    fn test_many_accounts_keep_separate_directories() {
        init_tracing();
        let config = SignerListConfig::default();
        let mut ledger = genesis(&config, &[1, 2, 3, 4]);
        let mut service = SignerListService::with_config(config);

        for owner in 1..=4u64 {
            let signers = (1..=4u64).filter(|n| *n != owner).map(|n| (id(n), 1));
            let report = service
                .apply(&mut ledger, &SetSignerListTx::set(id(owner), 2, signers, FUNDED))
                .unwrap();
            assert!(report.code.is_success());
        }

        for owner in 1..=4u64 {
            assert_eq!(
                OwnerDirectory::new(id(owner)).entries(&ledger).unwrap(),
                vec![keylet::signers(&id(owner)).key]
            );
        }

        service
            .apply(&mut ledger, &SetSignerListTx::destroy(id(2), FUNDED))
            .unwrap();
        assert!(ledger.read_signer_list(&id(2)).is_none());
        assert!(ledger.read_signer_list(&id(3)).is_some());
        assert!(audit(&ledger).is_empty());
        assert_eq!(service.stats().applied, 5);
    }

    // =========================================================================
    // AMENDMENT ACTIVATION
    // =========================================================================

    #[test]
    fn test_amendment_activation_between_applies() {
        let config = SignerListConfig {
            features: vec![],
            ..SignerListConfig::default()
        };
        let mut ledger = genesis(&config, &[1, 2]);
        let mut service = SignerListService::with_config(config);

        let three_signers = |owner: u64| {
            SetSignerListTx::set(
                id(owner),
                1,
                [(id(10), 1), (id(11), 1), (id(12), 1)],
                FUNDED,
            )
        };

        service.apply(&mut ledger, &three_signers(1)).unwrap();
        ledger.set_rules(Rules::with_features([Feature::MultiSignReserve]));
        service.apply(&mut ledger, &three_signers(2)).unwrap();

        assert_eq!(
            ledger.read_signer_list(&id(1)).unwrap().accounting,
            AccountingMode::Legacy
        );
        assert_eq!(ledger.read_account(&id(1)).unwrap().owner_count, 5);
        assert_eq!(
            ledger.read_signer_list(&id(2)).unwrap().accounting,
            AccountingMode::Current
        );
        assert_eq!(ledger.read_account(&id(2)).unwrap().owner_count, 1);

        // Replacing the legacy list under the new rules re-prices it.
        service.apply(&mut ledger, &three_signers(1)).unwrap();
        assert_eq!(ledger.read_account(&id(1)).unwrap().owner_count, 1);
        assert!(audit(&ledger).is_empty());
    }

    // =========================================================================
    // ACCOUNT TEARDOWN
    // =========================================================================

    #[test]
    fn test_external_removal_through_sandbox() {
        let config = SignerListConfig::default();
        let mut ledger = genesis(&config, &[1]);
        let mut service = SignerListService::with_config(config);
        service
            .apply(
                &mut ledger,
                &SetSignerListTx::set(id(1), 1, [(id(2), 1)], FUNDED),
            )
            .unwrap();

        let mut sandbox = ledger.sandbox();
        assert_eq!(remove_signer_list_from_ledger(&mut sandbox, &id(1)), Ok(1));
        assert_eq!(remove_signer_list_from_ledger(&mut sandbox, &id(1)), Ok(0));
        sandbox.commit();

        assert!(ledger.read_signer_list(&id(1)).is_none());
        assert!(!ledger.exists(&keylet::owner_dir(&id(1)).key));
        assert_eq!(ledger.read_account(&id(1)).unwrap().owner_count, 0);
    }
}
