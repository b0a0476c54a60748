//! Node lifecycle.

use il_01_state_store::{StateKey, TxContext};
use shared_types::{LedgerError, LedgerResult, Role};
use tracing::{debug, info};

use crate::domain::{
    InitNdidParams, NodeDetail, NodeIdParams, RegisterNodeParams, SetMqAddressesParams,
    TokenAccount, UpdateNodeByNdidParams, UpdateNodeParams,
};
use crate::service::lookups::{append_unique, load_node, master_ndid};

/// Bootstrap the root authority. Only valid once.
pub fn init_ndid(ctx: &mut TxContext<'_>, params: InitNdidParams) -> LedgerResult<()> {
    if master_ndid(ctx)?.is_some() {
        return Err(LedgerError::NdidAlreadyInitialized);
    }
    let key = StateKey::node(&params.node_id);
    if ctx.exists(&key)? {
        return Err(LedgerError::DuplicateNodeId(params.node_id));
    }

    let detail = NodeDetail {
        public_key: params.public_key,
        master_public_key: params.master_public_key,
        node_name: "NDID".to_string(),
        role: Role::Ndid,
        active: true,
        max_ial: 0.0,
        max_aal: 0.0,
        mq: Vec::new(),
    };
    ctx.put(&key, &detail)?;
    ctx.put(&StateKey::MasterNdid, &params.node_id)?;
    ctx.put(&StateKey::NodeList(Role::Ndid), &vec![params.node_id.clone()])?;

    info!(node_id = %params.node_id, "[il-02] NDID initialized");
    Ok(())
}

pub fn register_node(ctx: &mut TxContext<'_>, params: RegisterNodeParams) -> LedgerResult<()> {
    let key = StateKey::node(&params.node_id);
    if ctx.exists(&key)? {
        return Err(LedgerError::DuplicateNodeId(params.node_id));
    }
    let role: Role = params.role.parse()?;
    if !role.is_registrable() {
        return Err(LedgerError::WrongRole(params.role));
    }

    let (max_ial, max_aal) = if role == Role::Idp {
        (params.max_ial, params.max_aal)
    } else {
        (0.0, 0.0)
    };
    let detail = NodeDetail {
        public_key: params.public_key,
        master_public_key: params.master_public_key,
        node_name: params.node_name,
        role,
        active: true,
        max_ial,
        max_aal,
        mq: Vec::new(),
    };
    ctx.put(&key, &detail)?;

    for list_key in [StateKey::NodeList(role), StateKey::AllNodes] {
        let mut ids: Vec<String> = ctx.get(&list_key)?.unwrap_or_default();
        append_unique(&mut ids, &params.node_id);
        ctx.put(&list_key, &ids)?;
    }
    ctx.put(
        &StateKey::Token(params.node_id.clone()),
        &TokenAccount::default(),
    )?;

    debug!(node_id = %params.node_id, role = %role, "[il-02] node registered");
    Ok(())
}

/// Key rotation by the node itself. Empty fields are left unchanged.
pub fn update_node(ctx: &mut TxContext<'_>, params: UpdateNodeParams) -> LedgerResult<()> {
    let node_id = ctx.caller();
    let mut detail = load_node(ctx, node_id)?;
    if !params.public_key.is_empty() {
        detail.public_key = params.public_key;
    }
    if !params.master_public_key.is_empty() {
        detail.master_public_key = params.master_public_key;
    }
    ctx.put(&StateKey::node(node_id), &detail)?;
    debug!(node_id, "[il-02] node keys updated");
    Ok(())
}

/// NDID update. The name changes when non-empty; IdP assurance limits change
/// when positive. The role is never touched.
pub fn update_node_by_ndid(
    ctx: &mut TxContext<'_>,
    params: UpdateNodeByNdidParams,
) -> LedgerResult<()> {
    let mut detail = load_node(ctx, &params.node_id)?;
    if !params.node_name.is_empty() {
        detail.node_name = params.node_name;
    }
    if detail.role == Role::Idp {
        if params.max_ial > 0.0 {
            detail.max_ial = params.max_ial;
        }
        if params.max_aal > 0.0 {
            detail.max_aal = params.max_aal;
        }
    }
    ctx.put(&StateKey::node(&params.node_id), &detail)
}

pub fn disable_node(ctx: &mut TxContext<'_>, params: NodeIdParams) -> LedgerResult<()> {
    set_node_active(ctx, &params.node_id, false)
}

pub fn enable_node(ctx: &mut TxContext<'_>, params: NodeIdParams) -> LedgerResult<()> {
    set_node_active(ctx, &params.node_id, true)
}

fn set_node_active(ctx: &mut TxContext<'_>, node_id: &str, active: bool) -> LedgerResult<()> {
    let mut detail = load_node(ctx, node_id)?;
    detail.active = active;
    ctx.put(&StateKey::node(node_id), &detail)?;
    debug!(node_id, active, "[il-02] node activity changed");
    Ok(())
}

/// Replace the caller's published message-queue addresses.
pub fn set_mq_addresses(ctx: &mut TxContext<'_>, params: SetMqAddressesParams) -> LedgerResult<()> {
    let node_id = ctx.caller();
    let mut detail = load_node(ctx, node_id)?;
    detail.mq = params.addresses;
    ctx.put(&StateKey::node(node_id), &detail)
}
