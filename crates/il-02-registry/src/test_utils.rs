//! Fixtures for handler tests in this and downstream crates.

use il_01_state_store::{StateKey, StateStore, TxContext};
use shared_types::LedgerResult;

use crate::domain::{
    InitNdidParams, RegisterNodeParams, ServiceApprovalParams, ServiceDestinationParams,
    ServiceParams,
};
use crate::service::{
    add_service, init_ndid, register_node, register_service_destination,
    register_service_destination_by_ndid,
};

pub const NDID_ID: &str = "ndid";
pub const TEST_PREFIX: &str = "test:";

/// Run `f` as one transaction by `caller`, staging its writes only on success.
pub fn run<T>(
    store: &StateStore,
    caller: &str,
    f: impl FnOnce(&mut TxContext<'_>) -> LedgerResult<T>,
) -> LedgerResult<T> {
    let mut tx = store.begin(caller);
    let out = f(&mut tx)?;
    store.apply(tx)?;
    Ok(out)
}

/// In-memory store with NDID initialized and committed at height 1.
pub fn bootstrap() -> StateStore {
    let store = StateStore::in_memory(TEST_PREFIX);
    run(&store, NDID_ID, |ctx| {
        init_ndid(
            ctx,
            InitNdidParams {
                node_id: NDID_ID.to_string(),
                public_key: "ndid-pk".to_string(),
                master_public_key: "ndid-master-pk".to_string(),
            },
        )
    })
    .expect("init ndid");
    store.commit().expect("commit");
    store
}

/// Register a node as NDID.
pub fn seed_node(store: &StateStore, node_id: &str, role: &str, max_ial: f64, max_aal: f64) {
    run(store, NDID_ID, |ctx| {
        register_node(
            ctx,
            RegisterNodeParams {
                node_id: node_id.to_string(),
                public_key: format!("{node_id}-pk"),
                master_public_key: format!("{node_id}-master-pk"),
                node_name: format!("{node_id} name"),
                role: role.to_string(),
                max_ial,
                max_aal,
            },
        )
    })
    .expect("seed node");
}

/// Add `service_id`, approve `as_id` for it and register the destination.
pub fn seed_service_with_as(store: &StateStore, service_id: &str, as_id: &str) {
    run(store, NDID_ID, |ctx| {
        if !ctx.exists(&StateKey::Service(service_id.to_string()))? {
            add_service(
                ctx,
                ServiceParams {
                    service_id: service_id.to_string(),
                    service_name: format!("{service_id} service"),
                },
            )?;
        }
        register_service_destination_by_ndid(
            ctx,
            ServiceApprovalParams {
                service_id: service_id.to_string(),
                node_id: as_id.to_string(),
            },
        )
    })
    .expect("seed service");
    run(store, as_id, |ctx| {
        register_service_destination(
            ctx,
            ServiceDestinationParams {
                service_id: service_id.to_string(),
                min_ial: 1.1,
                min_aal: 1.0,
            },
        )
    })
    .expect("seed service destination");
}
