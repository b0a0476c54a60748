//! Services, NDID approvals and AS service destinations.

use il_01_state_store::{StateKey, TxContext};
use shared_types::{LedgerError, LedgerResult, Role};
use tracing::debug;

use crate::domain::{
    Approval, ServiceApprovalParams, ServiceDestination, ServiceDestinationParams, ServiceDetail,
    ServiceIdParams, ServiceParams,
};
use crate::service::lookups::{load_node, load_service, require_active_service};

// =============================================================================
// SERVICES (NDID)
// =============================================================================

fn all_services(ctx: &TxContext<'_>) -> LedgerResult<Vec<ServiceDetail>> {
    Ok(ctx.get(&StateKey::AllService)?.unwrap_or_default())
}

/// Write the service record and its mirror in `AllService`.
fn store_service(ctx: &mut TxContext<'_>, service: ServiceDetail) -> LedgerResult<()> {
    let mut all = all_services(ctx)?;
    match all.iter_mut().find(|s| s.service_id == service.service_id) {
        Some(entry) => *entry = service.clone(),
        None => all.push(service.clone()),
    }
    ctx.put(&StateKey::AllService, &all)?;
    ctx.put(&StateKey::Service(service.service_id.clone()), &service)
}

pub fn add_service(ctx: &mut TxContext<'_>, params: ServiceParams) -> LedgerResult<()> {
    if ctx.exists(&StateKey::Service(params.service_id.clone()))? {
        return Err(LedgerError::DuplicateServiceId(params.service_id));
    }
    debug!(service_id = %params.service_id, "[il-02] service added");
    store_service(
        ctx,
        ServiceDetail {
            service_id: params.service_id,
            service_name: params.service_name,
            active: true,
        },
    )
}

pub fn update_service(ctx: &mut TxContext<'_>, params: ServiceParams) -> LedgerResult<()> {
    let mut service = load_service(ctx, &params.service_id)?;
    if !params.service_name.is_empty() {
        service.service_name = params.service_name;
    }
    store_service(ctx, service)
}

pub fn disable_service(ctx: &mut TxContext<'_>, params: ServiceIdParams) -> LedgerResult<()> {
    set_service_active(ctx, &params.service_id, false)
}

pub fn enable_service(ctx: &mut TxContext<'_>, params: ServiceIdParams) -> LedgerResult<()> {
    set_service_active(ctx, &params.service_id, true)
}

fn set_service_active(ctx: &mut TxContext<'_>, service_id: &str, active: bool) -> LedgerResult<()> {
    let mut service = load_service(ctx, service_id)?;
    service.active = active;
    store_service(ctx, service)
}

// =============================================================================
// APPROVALS (NDID)
// =============================================================================

pub fn load_approval(
    ctx: &TxContext<'_>,
    service_id: &str,
    node_id: &str,
) -> LedgerResult<Option<Approval>> {
    ctx.get(&StateKey::approve(service_id, node_id))
}

/// Grant an AS permission to serve `service_id`. Both must exist now; either
/// may be deactivated later without touching the approval.
pub fn register_service_destination_by_ndid(
    ctx: &mut TxContext<'_>,
    params: ServiceApprovalParams,
) -> LedgerResult<()> {
    load_service(ctx, &params.service_id)?;
    let node = load_node(ctx, &params.node_id)?;
    if node.role != Role::As {
        return Err(LedgerError::WrongRole(node.role.to_string()));
    }
    ctx.put(
        &StateKey::approve(&params.service_id, &params.node_id),
        &Approval { active: true },
    )?;
    debug!(service_id = %params.service_id, node_id = %params.node_id, "[il-02] AS approved for service");
    Ok(())
}

pub fn disable_service_destination_by_ndid(
    ctx: &mut TxContext<'_>,
    params: ServiceApprovalParams,
) -> LedgerResult<()> {
    set_approval_active(ctx, params, false)
}

pub fn enable_service_destination_by_ndid(
    ctx: &mut TxContext<'_>,
    params: ServiceApprovalParams,
) -> LedgerResult<()> {
    set_approval_active(ctx, params, true)
}

fn set_approval_active(
    ctx: &mut TxContext<'_>,
    params: ServiceApprovalParams,
    active: bool,
) -> LedgerResult<()> {
    load_service(ctx, &params.service_id)?;
    let mut approval = load_approval(ctx, &params.service_id, &params.node_id)?.ok_or_else(|| {
        LedgerError::ApprovalNotFound {
            service_id: params.service_id.clone(),
            node_id: params.node_id.clone(),
        }
    })?;
    approval.active = active;
    ctx.put(&StateKey::approve(&params.service_id, &params.node_id), &approval)
}

// =============================================================================
// SERVICE DESTINATIONS (AS)
// =============================================================================

/// Every AS registered for `service_id`, in registration order.
pub fn service_destinations(
    ctx: &TxContext<'_>,
    service_id: &str,
) -> LedgerResult<Vec<ServiceDestination>> {
    Ok(ctx
        .get(&StateKey::ServiceDestination(service_id.to_string()))?
        .unwrap_or_default())
}

/// Service ids the AS has registered for.
pub fn provided_services(ctx: &TxContext<'_>, as_id: &str) -> LedgerResult<Vec<String>> {
    Ok(ctx
        .get(&StateKey::ProvideService(as_id.to_string()))?
        .unwrap_or_default())
}

pub fn register_service_destination(
    ctx: &mut TxContext<'_>,
    params: ServiceDestinationParams,
) -> LedgerResult<()> {
    let node_id = ctx.caller();
    require_active_service(ctx, &params.service_id)?;

    let mut provided = provided_services(ctx, node_id)?;
    if provided.contains(&params.service_id) {
        return Err(LedgerError::DuplicateServiceId(params.service_id));
    }
    match load_approval(ctx, &params.service_id, node_id)? {
        Some(approval) if approval.active => {}
        _ => {
            return Err(LedgerError::NoPermissionForRegisterServiceDestination {
                service_id: params.service_id,
                node_id: node_id.to_string(),
            })
        }
    }
    let mut destinations = service_destinations(ctx, &params.service_id)?;
    if destinations.iter().any(|d| d.node_id == node_id) {
        return Err(LedgerError::DuplicateNodeId(node_id.to_string()));
    }

    destinations.push(ServiceDestination {
        node_id: node_id.to_string(),
        min_ial: params.min_ial,
        min_aal: params.min_aal,
        active: true,
    });
    provided.push(params.service_id.clone());
    ctx.put(&StateKey::ServiceDestination(params.service_id.clone()), &destinations)?;
    ctx.put(&StateKey::ProvideService(node_id.to_string()), &provided)?;

    debug!(service_id = %params.service_id, node_id, "[il-02] service destination registered");
    Ok(())
}

/// Apply `update` to the caller's own destination entry for `service_id`.
fn modify_own_destination(
    ctx: &mut TxContext<'_>,
    service_id: &str,
    update: impl FnOnce(&mut ServiceDestination),
) -> LedgerResult<()> {
    let node_id = ctx.caller();
    load_service(ctx, service_id)?;
    let mut destinations = service_destinations(ctx, service_id)?;
    let entry = destinations
        .iter_mut()
        .find(|d| d.node_id == node_id)
        .ok_or_else(|| LedgerError::ServiceDestinationNotFound {
            service_id: service_id.to_string(),
            node_id: node_id.to_string(),
        })?;
    update(entry);
    ctx.put(&StateKey::ServiceDestination(service_id.to_string()), &destinations)
}

/// Assurance minimums change only when positive.
pub fn update_service_destination(
    ctx: &mut TxContext<'_>,
    params: ServiceDestinationParams,
) -> LedgerResult<()> {
    modify_own_destination(ctx, &params.service_id, |entry| {
        if params.min_ial > 0.0 {
            entry.min_ial = params.min_ial;
        }
        if params.min_aal > 0.0 {
            entry.min_aal = params.min_aal;
        }
    })
}

pub fn disable_service_destination(
    ctx: &mut TxContext<'_>,
    params: ServiceIdParams,
) -> LedgerResult<()> {
    modify_own_destination(ctx, &params.service_id, |entry| entry.active = false)
}

pub fn enable_service_destination(
    ctx: &mut TxContext<'_>,
    params: ServiceIdParams,
) -> LedgerResult<()> {
    modify_own_destination(ctx, &params.service_id, |entry| entry.active = true)
}
