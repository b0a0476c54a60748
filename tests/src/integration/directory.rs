//! # Directory
//!
//! NDID-administered lookups driven through the full transaction path:
//! proxies, namespaces, services, tokens, and reads pinned to past heights.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shared_types::LedgerError;

    use crate::integration::harness::*;

    fn make_proxied_network() -> Ledger {
        let ledger = make_network();
        ledger.ok(PROXY, "SetMqAddresses", json!({"addresses": [{"ip": "10.0.0.9", "port": 7000}]}));
        ledger.ok("idp1", "SetMqAddresses", json!({"addresses": [{"ip": "10.0.0.1", "port": 5000}]}));
        ledger.ok(
            NDID,
            "AddNodeToProxyNode",
            json!({"node_id": "idp1", "proxy_node_id": PROXY, "config": "KEY_ON_PROXY"}),
        );
        ledger.commit();
        ledger
    }

    // =========================================================================
    // PROXIES
    // =========================================================================

    #[test]
    fn test_proxied_node_is_reached_through_proxy() {
        let ledger = make_proxied_network();

        let (info, _) = ledger.query("GetNodeInfo", json!({"node_id": "idp1"}));
        assert!(info.get("mq").is_none());
        assert_eq!(info["proxy"]["node_id"], PROXY);
        assert_eq!(info["proxy"]["config"], "KEY_ON_PROXY");
        assert_eq!(info["proxy"]["mq"], json!([{"ip": "10.0.0.9", "port": 7000}]));
        assert_eq!(info["public_key"], "idp1-pk");

        let (mq, _) = ledger.query("GetMqAddresses", json!({"node_id": "idp1"}));
        assert_eq!(mq, json!([{"ip": "10.0.0.9", "port": 7000}]));

        let (behind, _) = ledger.query("GetNodesBehindProxyNode", json!({"proxy_node_id": PROXY}));
        assert_eq!(behind["nodes"][0]["node_id"], "idp1");
        assert_eq!(behind["nodes"][0]["role"], "IdP");
    }

    #[test]
    fn test_removed_node_uses_own_addresses_again() {
        let ledger = make_proxied_network();
        ledger.ok(NDID, "RemoveNodeFromProxyNode", json!({"node_id": "idp1"}));
        ledger.commit();

        let (mq, _) = ledger.query("GetMqAddresses", json!({"node_id": "idp1"}));
        assert_eq!(mq, json!([{"ip": "10.0.0.1", "port": 5000}]));
        let (behind, _) = ledger.query("GetNodesBehindProxyNode", json!({"proxy_node_id": PROXY}));
        assert_eq!(behind["nodes"], json!([]));
    }

    #[test]
    fn test_proxy_cannot_sit_behind_proxy() {
        let ledger = make_network();
        ledger.ok(
            NDID,
            "RegisterNode",
            json!({"node_id": "proxy2", "public_key": "p2", "role": "Proxy"}),
        );
        ledger.rejects(
            NDID,
            "AddNodeToProxyNode",
            json!({"node_id": "proxy2", "proxy_node_id": PROXY}),
            LedgerError::NodeIsProxy("proxy2".into()),
        );
        ledger.rejects(
            NDID,
            "AddNodeToProxyNode",
            json!({"node_id": "idp2", "proxy_node_id": RP}),
            LedgerError::NodeIsNotProxy(RP.into()),
        );
    }

    // =========================================================================
    // NAMESPACES / SERVICES
    // =========================================================================

    #[test]
    fn test_namespace_list_shows_active_only() {
        let ledger = make_network();
        ledger.ok(NDID, "AddNamespace", json!({"namespace": "citizen_id", "description": "Citizen ID"}));
        ledger.ok(NDID, "AddNamespace", json!({"namespace": "passport"}));
        ledger.ok(NDID, "DisableNamespace", json!({"namespace": "passport"}));
        ledger.commit();

        let (list, _) = ledger.query("GetNamespaceList", json!(null));
        assert_eq!(
            list,
            json!([{"namespace": "citizen_id", "description": "Citizen ID", "active": true}])
        );
    }

    #[test]
    fn test_disabled_service_leaves_list() {
        let ledger = make_network();
        ledger.ok(NDID, "AddService", json!({"service_id": "svc2", "service_name": "Credit score"}));
        ledger.ok(NDID, "DisableService", json!({"service_id": SERVICE}));
        ledger.commit();

        let (list, _) = ledger.query("GetServiceList", json!(null));
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["service_id"], "svc2");

        let (detail, log) = ledger.query("GetServiceDetail", json!({"service_id": SERVICE}));
        assert_eq!(log, "success");
        assert_eq!(detail["active"], false);
    }

    // =========================================================================
    // TOKENS
    // =========================================================================

    #[test]
    fn test_token_balance_through_ledger() {
        let ledger = make_network();
        ledger.ok(NDID, "SetNodeToken", json!({"node_id": RP, "amount": 100}));
        ledger.ok(NDID, "AddNodeToken", json!({"node_id": RP, "amount": 20}));
        ledger.ok(NDID, "ReduceNodeToken", json!({"node_id": RP, "amount": 70}));
        ledger.rejects(
            NDID,
            "ReduceNodeToken",
            json!({"node_id": RP, "amount": 51}),
            LedgerError::TokenNotEnough { balance: 50, requested: 51 },
        );
        ledger.rejects(
            RP,
            "AddNodeToken",
            json!({"node_id": RP, "amount": 1}),
            LedgerError::NotNdid(RP.into()),
        );
        ledger.commit();

        let (token, _) = ledger.query("GetNodeToken", json!({"node_id": RP}));
        assert_eq!(token["amount"], 50);
    }

    // =========================================================================
    // HEIGHT-PINNED READS
    // =========================================================================

    #[test]
    fn test_reads_at_past_height() {
        let ledger = make_network();
        let before = ledger.height();
        ledger.ok(NDID, "UpdateNodeByNDID", json!({"node_id": "idp1", "node_name": "renamed"}));
        ledger.ok("idp1", "UpdateNode", json!({"public_key": "idp1-pk-2"}));
        let after = ledger.commit();

        let old = ledger.query_at("GetNodePublicKey", json!({"node_id": "idp1"}), before);
        assert_eq!(old.height, before);
        let old: serde_json::Value = serde_json::from_slice(&old.value).unwrap();
        assert_eq!(old["public_key"], "idp1-pk");

        let (new, _) = ledger.query("GetNodePublicKey", json!({"node_id": "idp1"}));
        assert_eq!(new["public_key"], "idp1-pk-2");
        let (info, _) = ledger.query("GetNodeInfo", json!({"node_id": "idp1"}));
        assert_eq!(info["node_name"], "renamed");

        let future = ledger.query_at("GetNodeInfo", json!({"node_id": "idp1"}), after + 1);
        assert!(future.value.is_empty());
        assert_ne!(future.log, "success");
    }
}
