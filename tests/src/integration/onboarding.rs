//! # Accessor Onboarding
//!
//! Accessor groups are created directly by an IdP; adding or revoking
//! accessors later needs a closed, fully accepted mode-3 request that an IdP
//! created for that purpose, and each such request is good for one use.

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use shared_types::LedgerError;

    use crate::integration::harness::*;

    fn accessor(accessor_id: &str, group: &str) -> Value {
        json!({
            "accessor_id": accessor_id,
            "accessor_type": "RSA",
            "accessor_public_key": format!("{accessor_id}-key"),
            "accessor_group_id": group,
        })
    }

    fn with_request(mut params: Value, request_id: &str) -> Value {
        params["request_id"] = json!(request_id);
        params
    }

    fn make_group(ledger: &Ledger) {
        ledger.ok("idp1", "CreateIdentity", accessor("acc1", "grp1"));
        ledger.commit();
    }

    // =========================================================================
    // ADD
    // =========================================================================

    #[test]
    fn test_add_accessor_through_onboarding_request() {
        let ledger = make_network();
        make_group(&ledger);
        make_onboarding_request(&ledger, "idp1", "onboard-1", "AddAccessor", &["idp2"]);

        ledger.ok("idp1", "AddAccessorMethod", with_request(accessor("acc2", "grp1"), "onboard-1"));
        ledger.commit();

        let (group, log) = ledger.query("GetAccessorsInGroup", json!({"accessor_group_id": "grp1"}));
        assert_eq!(log, "success");
        assert_eq!(group["accessor_id_list"], json!(["acc1", "acc2"]));
        let (group_id, _) = ledger.query("GetAccessorGroupID", json!({"accessor_id": "acc2"}));
        assert_eq!(group_id["accessor_group_id"], "grp1");
        assert_eq!(ledger.request_detail("onboard-1")["use_count"], 1);
    }

    #[test]
    fn test_scenario_d_consumed_request_is_not_special() {
        let ledger = make_network();
        make_group(&ledger);
        make_onboarding_request(&ledger, "idp1", "onboard-1", "AddAccessor", &["idp2"]);
        ledger.ok("idp1", "AddAccessorMethod", with_request(accessor("acc2", "grp1"), "onboard-1"));
        ledger.commit();

        ledger.rejects(
            "idp1",
            "AddAccessorMethod",
            with_request(accessor("acc3", "grp1"), "onboard-1"),
            LedgerError::RequestIsNotSpecial("onboard-1".into()),
        );
    }

    #[test]
    fn test_rp_request_cannot_onboard() {
        let ledger = make_network();
        make_group(&ledger);
        make_onboarding_request(&ledger, RP, "rp-onboard", "AddAccessor", &["idp2"]);
        assert_eq!(ledger.request_detail("rp-onboard")["special"], false);

        ledger.rejects(
            "idp1",
            "AddAccessorMethod",
            with_request(accessor("acc2", "grp1"), "rp-onboard"),
            LedgerError::RequestIsNotSpecial("rp-onboard".into()),
        );
    }

    #[test]
    fn test_wrong_purpose_is_refused() {
        let ledger = make_network();
        make_group(&ledger);
        make_onboarding_request(&ledger, "idp1", "revoke-1", "RevokeAccessor", &["idp1"]);

        let resp = ledger.tx(
            "idp1",
            "AddAccessorMethod",
            with_request(accessor("acc2", "grp1"), "revoke-1"),
        );
        assert!(!resp.is_ok());
        assert!(resp.log.contains("AddAccessor"), "{}", resp.log);
    }

    #[test]
    fn test_add_to_unknown_group() {
        let ledger = make_network();
        make_onboarding_request(&ledger, "idp1", "onboard-1", "AddAccessor", &["idp2"]);
        ledger.rejects(
            "idp1",
            "AddAccessorMethod",
            with_request(accessor("acc2", "nope"), "onboard-1"),
            LedgerError::AccessorGroupIdNotFound("nope".into()),
        );
        assert_eq!(ledger.request_detail("onboard-1")["use_count"], 0);
    }

    // =========================================================================
    // REVOKE
    // =========================================================================

    #[test]
    fn test_revoke_own_accessor() {
        let ledger = make_network();
        make_group(&ledger);
        make_onboarding_request(&ledger, "idp1", "revoke-1", "RevokeAccessor", &["idp1"]);

        ledger.ok(
            "idp1",
            "RevokeAccessorMethod",
            json!({"accessor_id_list": ["acc1"], "request_id": "revoke-1"}),
        );
        ledger.commit();

        let (key, _) = ledger.query("GetAccessorKey", json!({"accessor_id": "acc1"}));
        assert_eq!(key["active"], false);
        let (group, _) = ledger.query("GetAccessorsInGroup", json!({"accessor_group_id": "grp1"}));
        assert_eq!(group["accessor_id_list"], json!([]));
        assert_eq!(group["revoked_accessor_id_list"], json!(["acc1"]));
    }

    #[test]
    fn test_revoke_needs_own_responses() {
        let ledger = make_network();
        make_group(&ledger);
        make_onboarding_request(&ledger, "idp1", "revoke-1", "RevokeAccessor", &["idp2"]);

        let resp = ledger.tx(
            "idp1",
            "RevokeAccessorMethod",
            json!({"accessor_id_list": ["acc1"], "request_id": "revoke-1"}),
        );
        assert!(!resp.is_ok());
        ledger.commit();
        let (key, _) = ledger.query("GetAccessorKey", json!({"accessor_id": "acc1"}));
        assert_eq!(key["active"], true);
    }

    #[test]
    fn test_other_idp_cannot_revoke() {
        let ledger = make_network();
        make_group(&ledger);
        make_onboarding_request(&ledger, "idp2", "revoke-2", "RevokeAccessor", &["idp2"]);

        ledger.rejects(
            "idp2",
            "RevokeAccessorMethod",
            json!({"accessor_id_list": ["acc1"], "request_id": "revoke-2"}),
            LedgerError::NotOwnerOfAccessor { accessor_id: "acc1".into(), node_id: "idp2".into() },
        );
    }
}
