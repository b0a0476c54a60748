//! Existence and activity checks shared by every subsystem.

use il_01_state_store::{StateKey, TxContext};
use shared_types::{LedgerError, LedgerResult, Role};

use crate::domain::{NodeDetail, ServiceDetail};

/// Node id recorded by `InitNDID`, if any.
pub fn master_ndid(ctx: &TxContext<'_>) -> LedgerResult<Option<String>> {
    ctx.get(&StateKey::MasterNdid)
}

pub fn load_node(ctx: &TxContext<'_>, node_id: &str) -> LedgerResult<NodeDetail> {
    ctx.get(&StateKey::node(node_id))?
        .ok_or_else(|| LedgerError::NodeIdNotFound(node_id.to_string()))
}

pub fn load_service(ctx: &TxContext<'_>, service_id: &str) -> LedgerResult<ServiceDetail> {
    ctx.get(&StateKey::Service(service_id.to_string()))?
        .ok_or_else(|| LedgerError::ServiceIdNotFound(service_id.to_string()))
}

/// The service, provided it exists and is active.
pub fn require_active_service(ctx: &TxContext<'_>, service_id: &str) -> LedgerResult<ServiceDetail> {
    let service = load_service(ctx, service_id)?;
    if !service.active {
        return Err(LedgerError::ServiceIsNotActive(service_id.to_string()));
    }
    Ok(service)
}

/// Append-only id list of one role.
pub fn node_ids(ctx: &TxContext<'_>, role: Role) -> LedgerResult<Vec<String>> {
    Ok(ctx.get(&StateKey::NodeList(role))?.unwrap_or_default())
}

pub(crate) fn append_unique(list: &mut Vec<String>, id: &str) {
    if !list.iter().any(|existing| existing == id) {
        list.push(id.to_string());
    }
}
