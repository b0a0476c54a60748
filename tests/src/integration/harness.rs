//! Ledger wrapper and the standard test network.

use il_01_state_store::{StateKey, StateStore};
use node_runtime::container::LedgerConfig;
use node_runtime::IdentityLedgerApp;
use serde_json::{json, Value};
use shared_types::{Height, LedgerError, QueryResponse, TxResponse};

pub const NDID: &str = "ndid";
pub const RP: &str = "rp1";
pub const IDPS: [&str; 3] = ["idp1", "idp2", "idp3"];
pub const ASES: [&str; 2] = ["as1", "as2"];
pub const PROXY: &str = "proxy1";
pub const SERVICE: &str = "svc1";

pub struct Ledger {
    app: IdentityLedgerApp,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            app: IdentityLedgerApp::in_memory(),
        }
    }

    /// Ledger whose registration lease defaults to `blocks`.
    pub fn with_lease(blocks: u64) -> Self {
        let config = LedgerConfig {
            default_register_identity_timeout: blocks,
            ..LedgerConfig::default()
        };
        let store = StateStore::in_memory(config.key_prefix.clone());
        Self {
            app: IdentityLedgerApp::new(store, config),
        }
    }

    pub fn app(&self) -> &IdentityLedgerApp {
        &self.app
    }

    pub fn tx(&self, caller: &str, method: &str, params: Value) -> TxResponse {
        self.app.apply(method, params.to_string().as_bytes(), caller)
    }

    /// Apply and require success.
    pub fn ok(&self, caller: &str, method: &str, params: Value) -> TxResponse {
        let resp = self.tx(caller, method, params);
        assert!(resp.is_ok(), "{method} by {caller} failed: {}", resp.log);
        resp
    }

    /// Apply and require rejection with the same code as `expected`.
    pub fn rejects(&self, caller: &str, method: &str, params: Value, expected: LedgerError) {
        let resp = self.tx(caller, method, params);
        assert_eq!(
            resp.code,
            expected.code(),
            "{method} by {caller}: expected {expected}, got {}",
            resp.log
        );
    }

    pub fn commit(&self) -> Height {
        self.app.commit().expect("commit").height
    }

    /// Commit empty blocks until `height` is the latest committed height.
    pub fn advance_to(&self, height: Height) {
        while self.height() < height {
            self.commit();
        }
    }

    pub fn height(&self) -> Height {
        self.app.info().last_height
    }

    /// Height the next applied transaction executes at.
    pub fn next_height(&self) -> Height {
        self.height() + 1
    }

    pub fn query_at(&self, method: &str, params: Value, height: Height) -> QueryResponse {
        self.app.query(method, params.to_string().as_bytes(), height)
    }

    /// Query the latest committed state; returns the decoded value and the
    /// status log.
    pub fn query(&self, method: &str, params: Value) -> (Value, String) {
        let resp = self.query_at(method, params, 0);
        let value = serde_json::from_slice(&resp.value).unwrap_or(Value::Null);
        (value, resp.log)
    }

    pub fn request_detail(&self, request_id: &str) -> Value {
        let (value, log) = self.query("GetRequestDetail", json!({ "request_id": request_id }));
        assert_eq!(log, "success", "request {request_id}");
        value
    }

    /// Stored bytes of `key` at the latest committed height.
    pub fn raw(&self, key: &StateKey) -> Option<Vec<u8>> {
        let store = self.app.store();
        let ctx = store.snapshot(0).expect("snapshot");
        ctx.read(key).expect("read").into_option()
    }
}

// =============================================================================
// STANDARD NETWORK
// =============================================================================

/// NDID, one RP, three IdPs (max 3.0 / 3.0), two ASes approved for and
/// serving `svc1`, and an idle proxy. Committed.
pub fn make_network() -> Ledger {
    make_network_on(Ledger::new())
}

pub fn make_network_on(ledger: Ledger) -> Ledger {
    ledger.ok(
        NDID,
        "InitNDID",
        json!({"node_id": NDID, "public_key": "ndid-pk", "master_public_key": "ndid-mpk"}),
    );
    register(&ledger, RP, "RP");
    for idp in IDPS {
        register(&ledger, idp, "IdP");
    }
    for as_id in ASES {
        register(&ledger, as_id, "AS");
    }
    register(&ledger, PROXY, "Proxy");

    ledger.ok(
        NDID,
        "AddService",
        json!({"service_id": SERVICE, "service_name": "Bank statement"}),
    );
    for as_id in ASES {
        ledger.ok(
            NDID,
            "RegisterServiceDestinationByNDID",
            json!({"service_id": SERVICE, "node_id": as_id}),
        );
        ledger.ok(
            as_id,
            "RegisterServiceDestination",
            json!({"service_id": SERVICE, "min_ial": 1.1, "min_aal": 1.0}),
        );
    }
    ledger.commit();
    ledger
}

fn register(ledger: &Ledger, node_id: &str, role: &str) {
    ledger.ok(
        NDID,
        "RegisterNode",
        json!({
            "node_id": node_id,
            "public_key": format!("{node_id}-pk"),
            "master_public_key": format!("{node_id}-mpk"),
            "node_name": format!("{node_id} node"),
            "role": role,
            "max_ial": 3.0,
            "max_aal": 3.0,
        }),
    );
}

// =============================================================================
// REQUEST HELPERS
// =============================================================================

pub fn accept(ledger: &Ledger, idp: &str, request_id: &str) -> TxResponse {
    ledger.tx(
        idp,
        "CreateIdpResponse",
        json!({
            "request_id": request_id,
            "ial": 2.3,
            "aal": 3.0,
            "status": "accept",
            "signature": format!("{idp}-sig"),
        }),
    )
}

/// Declare `proof` and answer with it, as mode 3 requires.
pub fn accept_with_proof(ledger: &Ledger, idp: &str, request_id: &str) {
    ledger.ok(
        idp,
        "DeclareIdentityProof",
        json!({"request_id": request_id, "identity_proof": format!("{idp}-proof")}),
    );
    ledger.ok(
        idp,
        "CreateIdpResponse",
        json!({
            "request_id": request_id,
            "ial": 2.3,
            "aal": 3.0,
            "status": "accept",
            "signature": format!("{idp}-sig"),
            "identity_proof": format!("{idp}-proof"),
            "private_proof_hash": "pph",
        }),
    );
}

/// Close `request_id`, judging every listed IdP's response valid.
pub fn close_valid(ledger: &Ledger, owner: &str, request_id: &str, idps: &[&str]) {
    let verdicts: Vec<Value> = idps
        .iter()
        .map(|idp| {
            json!({"idp_id": idp, "valid_proof": true, "valid_ial": true, "valid_signature": true})
        })
        .collect();
    ledger.ok(
        owner,
        "CloseRequest",
        json!({"request_id": request_id, "response_valid_list": verdicts}),
    );
}

/// A closed, fully accepted mode-3 request created by `owner` for
/// `purpose`, answered by `responders`. Committed.
pub fn make_onboarding_request(
    ledger: &Ledger,
    owner: &str,
    request_id: &str,
    purpose: &str,
    responders: &[&str],
) {
    ledger.ok(
        owner,
        "CreateRequest",
        json!({
            "request_id": request_id,
            "mode": 3,
            "min_idp": responders.len(),
            "min_ial": 1.1,
            "min_aal": 1.0,
            "request_timeout": 3600,
            "request_message_hash": "msg",
            "purpose": purpose,
        }),
    );
    for idp in responders {
        accept_with_proof(ledger, idp, request_id);
    }
    close_valid(ledger, owner, request_id, responders);
    ledger.commit();
}
