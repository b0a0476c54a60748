//! # Ledger Properties
//!
//! Checks that must hold after any sequence of transactions:
//!
//! - a request never holds more responses than `min_idp`
//! - a finished request refuses every further change
//! - a rejected transaction leaves stored bytes untouched
//! - at most one first-IdP lease blocks a hash id at any height
//! - identical transaction sequences produce identical app hashes

#[cfg(test)]
mod tests {
    use il_01_state_store::StateKey;
    use il_04_identity::MsqDestination;
    use serde_json::{json, Value};
    use shared_types::LedgerError;

    use crate::integration::harness::*;

    fn make_open_request(ledger: &Ledger, request_id: &str, min_idp: u32) {
        ledger.ok(
            RP,
            "CreateRequest",
            json!({
                "request_id": request_id,
                "mode": 1,
                "min_idp": min_idp,
                "min_ial": 1.1,
                "min_aal": 1.0,
                "request_timeout": 300,
                "request_message_hash": "h",
                "data_request_list": [{"service_id": SERVICE, "as_id_list": ["as1"], "min_as": 1}],
            }),
        );
        ledger.commit();
    }

    // =========================================================================
    // REQUESTS
    // =========================================================================

    #[test]
    fn test_response_list_never_exceeds_min_idp() {
        let ledger = make_network();
        make_open_request(&ledger, "R1", 2);

        for idp in IDPS {
            let _ = accept(&ledger, idp, "R1");
            ledger.commit();
            let detail = ledger.request_detail("R1");
            let responses = detail["response_list"].as_array().unwrap().len();
            assert!(responses <= 2, "{responses} responses after {idp}");
        }
    }

    #[test]
    fn test_finished_request_is_frozen() {
        for finish in ["CloseRequest", "TimeOutRequest"] {
            let ledger = make_network();
            make_open_request(&ledger, "R1", 2);
            assert!(accept(&ledger, "idp1", "R1").is_ok());
            ledger.ok(RP, finish, json!({"request_id": "R1"}));
            ledger.commit();
            let frozen = ledger.request_detail("R1");

            let attempts: [(&str, &str, Value); 5] = [
                ("idp2", "CreateIdpResponse", json!({"request_id": "R1", "ial": 2.3, "aal": 3.0, "status": "accept"})),
                ("as1", "SignData", json!({"request_id": "R1", "service_id": SERVICE, "signature": "s"})),
                (RP, "CloseRequest", json!({"request_id": "R1"})),
                (RP, "TimeOutRequest", json!({"request_id": "R1"})),
                ("idp2", "DeclareIdentityProof", json!({"request_id": "R1", "identity_proof": "p"})),
            ];
            for (caller, method, params) in attempts {
                let resp = ledger.tx(caller, method, params);
                assert!(!resp.is_ok(), "{method} accepted after {finish}");
            }
            ledger.commit();
            assert_eq!(ledger.request_detail("R1"), frozen, "after {finish}");
        }
    }

    #[test]
    fn test_closed_then_timeout_reports_closed() {
        let ledger = make_network();
        make_open_request(&ledger, "R1", 1);
        ledger.ok(RP, "CloseRequest", json!({"request_id": "R1"}));
        ledger.rejects(
            RP,
            "TimeOutRequest",
            json!({"request_id": "R1"}),
            LedgerError::RequestIsClosed("R1".into()),
        );
    }

    // =========================================================================
    // ATOMICITY
    // =========================================================================

    #[test]
    fn test_duplicate_create_identity_changes_nothing() {
        let ledger = make_network();
        let params = json!({
            "accessor_id": "acc1",
            "accessor_type": "RSA",
            "accessor_public_key": "k1",
            "accessor_group_id": "grp1",
        });
        ledger.ok("idp1", "CreateIdentity", params);
        ledger.commit();

        let accessor_key = StateKey::Accessor("acc1".into());
        let group_key = StateKey::AccessorInGroup("grp1".into());
        let accessor_before = ledger.raw(&accessor_key);
        let group_before = ledger.raw(&group_key);
        assert!(accessor_before.is_some());

        ledger.rejects(
            "idp2",
            "CreateIdentity",
            json!({
                "accessor_id": "acc1",
                "accessor_type": "RSA",
                "accessor_public_key": "k2",
                "accessor_group_id": "grp2",
            }),
            LedgerError::DuplicateAccessorId("acc1".into()),
        );
        ledger.commit();

        assert_eq!(ledger.raw(&accessor_key), accessor_before);
        assert_eq!(ledger.raw(&group_key), group_before);
        assert_eq!(ledger.raw(&StateKey::AccessorGroup("grp2".into())), None);
    }

    // =========================================================================
    // REGISTRATION LEASE
    // =========================================================================

    #[test]
    fn test_single_lease_holder_per_height() {
        let ledger = make_network_on(Ledger::with_lease(3));
        let start = ledger.height();
        let first = json!({"users": [{"hash_id": "H1", "ial": 2.3, "first": true}]});

        ledger.ok("idp1", "RegisterIdentity", first.clone());
        ledger.commit();
        for _ in 0..5 {
            let _ = ledger.tx("idp2", "RegisterIdentity", first.clone());
            let _ = ledger.tx("idp3", "RegisterIdentity", first.clone());
            ledger.commit();
        }

        let store = ledger.app().store();
        let key = StateKey::MsqDestination("H1".into());
        for height in start + 1..=ledger.height() {
            let ctx = store.snapshot(height).unwrap();
            let entries: Vec<MsqDestination> = ctx.get(&key).unwrap().unwrap_or_default();
            let holders = entries
                .iter()
                .filter(|e| e.first && e.holds_lease_at(height))
                .count();
            assert!(holders <= 1, "{holders} lease holders at height {height}");
        }

        let ctx = store.snapshot(0).unwrap();
        let entries: Vec<MsqDestination> = ctx.get(&key).unwrap().unwrap_or_default();
        assert_eq!(entries[0].node_id, "idp1");
        assert!(entries.iter().any(|e| e.node_id == "idp2"));
    }

    // =========================================================================
    // DETERMINISM
    // =========================================================================

    #[test]
    fn test_same_history_same_app_hash() {
        let build = || {
            let ledger = make_network();
            make_open_request(&ledger, "R1", 1);
            let _ = accept(&ledger, "idp1", "R1");
            let _ = ledger.tx("as1", "SignData", json!({"request_id": "R1", "service_id": SERVICE, "signature": "s"}));
            ledger.commit();
            ledger.app().info()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_rejection_does_not_change_app_hash() {
        let with_noise = make_network();
        let without = make_network();

        let _ = with_noise.tx(RP, "AddNamespace", json!({"namespace": "citizen_id"}));
        let _ = with_noise.tx("ghost", "UpdateNode", json!({"public_key": "x"}));
        with_noise.commit();
        without.commit();

        assert_eq!(with_noise.app().info(), without.app().info());
    }
}
