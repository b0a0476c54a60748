//! # Protocol Scenarios
//!
//! End-to-end flows across the registry, request protocol and identity
//! subsystems:
//!
//! 1. **Verification**: RP request answered by enough IdPs, extra answers refused
//! 2. **Data**: AS signs once per (service, request), owner acknowledges receipt
//! 3. **Registration lease**: a first IdP blocks others until its lease ends

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shared_types::LedgerError;

    use crate::integration::harness::*;

    fn make_request(ledger: &Ledger, request_id: &str, min_idp: u32) {
        ledger.ok(
            RP,
            "CreateRequest",
            json!({
                "request_id": request_id,
                "mode": 1,
                "min_idp": min_idp,
                "min_ial": 1.1,
                "min_aal": 1.0,
                "request_timeout": 600,
                "request_message_hash": "hash-of-message",
                "data_request_list": [{
                    "service_id": SERVICE,
                    "as_id_list": ASES,
                    "min_as": 1,
                    "request_params_hash": "params-hash",
                }],
            }),
        );
    }

    // =========================================================================
    // VERIFICATION
    // =========================================================================

    #[test]
    fn test_scenario_a_extra_response_is_refused() {
        let ledger = make_network();
        make_request(&ledger, "R1", 2);

        assert!(accept(&ledger, "idp1", "R1").is_ok());
        assert!(accept(&ledger, "idp2", "R1").is_ok());
        let third = accept(&ledger, "idp3", "R1");
        assert_eq!(third.code, LedgerError::RequestIsCompleted("R1".into()).code());
        ledger.commit();

        let detail = ledger.request_detail("R1");
        let responders: Vec<&str> = detail["response_list"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["idp_id"].as_str().unwrap())
            .collect();
        assert_eq!(responders, ["idp1", "idp2"]);
        assert_eq!(detail["special"], false);
    }

    #[test]
    fn test_full_verification_round() {
        let ledger = make_network();
        let created = ledger.ok(RP, "CreateRequest", json!({
            "request_id": "R2",
            "mode": 1,
            "min_idp": 1,
            "idp_id_list": ["idp1"],
            "data_request_list": [{"service_id": SERVICE, "min_as": 1}],
        }));
        assert_eq!(created.data, b"R2");

        ledger.rejects(
            "idp2",
            "CreateIdpResponse",
            json!({"request_id": "R2", "ial": 2.3, "aal": 3.0, "status": "accept"}),
            LedgerError::NotInIdpList("idp2".into()),
        );
        assert!(accept(&ledger, "idp1", "R2").is_ok());
        ledger.ok("as1", "SignData", json!({"request_id": "R2", "service_id": SERVICE, "signature": "as1-sig"}));
        ledger.ok(RP, "SetDataReceived", json!({"request_id": "R2", "service_id": SERVICE, "as_id": "as1"}));
        close_valid(&ledger, RP, "R2", &["idp1"]);
        ledger.commit();

        let detail = ledger.request_detail("R2");
        assert_eq!(detail["closed"], true);
        assert_eq!(detail["response_list"][0]["valid_signature"], true);
        assert_eq!(detail["data_request_list"][0]["answered_as_id_list"], json!(["as1"]));
        assert_eq!(detail["data_request_list"][0]["received_data_from_list"], json!(["as1"]));

        let (summary, _) = ledger.query("GetRequest", json!({"request_id": "R2"}));
        assert_eq!(summary["closed"], true);
        assert_eq!(summary["timed_out"], false);
    }

    #[test]
    fn test_only_owner_finishes_request() {
        let ledger = make_network();
        make_request(&ledger, "R3", 1);
        ledger.rejects(
            "idp1",
            "TimeOutRequest",
            json!({"request_id": "R3"}),
            LedgerError::NotRequestOwner { request_id: "R3".into(), node_id: "idp1".into() },
        );
        ledger.ok(RP, "TimeOutRequest", json!({"request_id": "R3"}));
        ledger.commit();
        assert_eq!(ledger.request_detail("R3")["timed_out"], true);
    }

    // =========================================================================
    // DATA
    // =========================================================================

    #[test]
    fn test_scenario_b_as_signs_once() {
        let ledger = make_network();
        make_request(&ledger, "R1", 1);
        let sign = json!({"request_id": "R1", "service_id": SERVICE, "signature": "as1-sig"});

        ledger.ok("as1", "SignData", sign.clone());
        ledger.rejects("as1", "SignData", sign, LedgerError::DuplicateAnsweredAsIdList("as1".into()));
        ledger.rejects(
            "as2",
            "SignData",
            json!({"request_id": "R1", "service_id": SERVICE, "signature": "as2-sig"}),
            LedgerError::DataRequestIsCompleted(SERVICE.into()),
        );
        ledger.commit();

        let (signature, log) = ledger.query(
            "GetDataSignature",
            json!({"node_id": "as1", "service_id": SERVICE, "request_id": "R1"}),
        );
        assert_eq!(log, "success");
        assert_eq!(signature["signature"], "as1-sig");
    }

    #[test]
    fn test_receipt_requires_answer() {
        let ledger = make_network();
        make_request(&ledger, "R1", 1);
        ledger.rejects(
            RP,
            "SetDataReceived",
            json!({"request_id": "R1", "service_id": SERVICE, "as_id": "as2"}),
            LedgerError::AsIdIsNotExistInAnsweredAsList("as2".into()),
        );
        ledger.ok("as2", "SignData", json!({"request_id": "R1", "service_id": SERVICE, "signature": "s"}));
        let receipt = json!({"request_id": "R1", "service_id": SERVICE, "as_id": "as2"});
        ledger.ok(RP, "SetDataReceived", receipt.clone());
        ledger.rejects(RP, "SetDataReceived", receipt, LedgerError::DuplicateAsInDataRequest("as2".into()));
    }

    #[test]
    fn test_disabled_approval_stops_signing() {
        let ledger = make_network();
        make_request(&ledger, "R1", 1);
        ledger.ok(
            NDID,
            "DisableServiceDestinationByNDID",
            json!({"service_id": SERVICE, "node_id": "as1"}),
        );
        ledger.rejects(
            "as1",
            "SignData",
            json!({"request_id": "R1", "service_id": SERVICE, "signature": "s"}),
            LedgerError::ServiceDestinationIsNotApproved { service_id: SERVICE.into(), node_id: "as1".into() },
        );
    }

    // =========================================================================
    // REGISTRATION LEASE
    // =========================================================================

    fn register_first(ledger: &Ledger, idp: &str, hash_id: &str) -> shared_types::TxResponse {
        ledger.tx(
            idp,
            "RegisterIdentity",
            json!({"users": [{"hash_id": hash_id, "ial": 2.3, "first": true}]}),
        )
    }

    #[test]
    fn test_scenario_c_first_idp_lease() {
        let ledger = make_network();
        let registered_at = ledger.next_height();
        assert!(register_first(&ledger, "idp1", "H1").is_ok());
        ledger.commit();
        let lease_end = registered_at + 500;

        let early = register_first(&ledger, "idp2", "H1");
        assert_eq!(early.code, LedgerError::NotFirstIdp("H1".into()).code());

        // One block before expiry the lease still holds.
        ledger.advance_to(lease_end - 2);
        assert_eq!(ledger.next_height(), lease_end - 1);
        let last_chance = register_first(&ledger, "idp2", "H1");
        assert_eq!(last_chance.code, LedgerError::NotFirstIdp("H1".into()).code());

        ledger.advance_to(lease_end - 1);
        assert!(register_first(&ledger, "idp2", "H1").is_ok());
        ledger.commit();

        let (nodes, _) = ledger.query("GetIdpNodes", json!({"hash_id": "H1"}));
        assert_eq!(nodes["node"][0]["node_id"], "idp2");
        assert_eq!(nodes["node"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_lease_length_set_by_ndid() {
        let ledger = make_network();
        ledger.ok(NDID, "SetTimeOutBlockRegisterIdentity", json!({"timeout_block": 3}));
        ledger.commit();
        let registered_at = ledger.next_height();
        assert!(register_first(&ledger, "idp1", "H1").is_ok());
        ledger.commit();

        ledger.advance_to(registered_at + 2);
        assert!(register_first(&ledger, "idp2", "H1").is_ok());
    }

    #[test]
    fn test_cleared_lease_lets_others_register() {
        let ledger = make_network();
        assert!(register_first(&ledger, "idp1", "H1").is_ok());
        ledger.ok("idp1", "ClearRegisterIdentityTimeout", json!({"hash_id": "H1"}));
        ledger.commit();

        assert!(register_first(&ledger, "idp2", "H1").is_ok());
        ledger.commit();
        let (exist, _) = ledger.query("CheckExistingIdentity", json!({"hash_id": "H1"}));
        assert_eq!(exist["exist"], true);
    }
}
