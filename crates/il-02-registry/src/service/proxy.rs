//! Proxy associations.
//!
//! `Proxy|<node>` and `BehindProxyNode|<proxy>` are always written in the
//! same transaction, so a node is listed under exactly the proxy its own
//! record names.

use il_01_state_store::{StateKey, TxContext};
use shared_types::{LedgerError, LedgerResult};
use tracing::debug;

use crate::domain::{
    AddNodeToProxyNodeParams, NodeDetail, NodeIdParams, ProxyLink, UpdateNodeProxyNodeParams,
};
use crate::service::lookups::{append_unique, load_node};

pub fn load_proxy_link(ctx: &TxContext<'_>, node_id: &str) -> LedgerResult<Option<ProxyLink>> {
    ctx.get(&StateKey::Proxy(node_id.to_string()))
}

/// Ids of the nodes behind `proxy_node_id`, in order of association.
pub fn nodes_behind(ctx: &TxContext<'_>, proxy_node_id: &str) -> LedgerResult<Vec<String>> {
    Ok(ctx
        .get(&StateKey::BehindProxyNode(proxy_node_id.to_string()))?
        .unwrap_or_default())
}

/// The target must exist and must not itself be a proxy.
fn require_proxiable_node(ctx: &TxContext<'_>, node_id: &str) -> LedgerResult<()> {
    let node = load_node(ctx, node_id)?;
    if node.is_proxy() {
        return Err(LedgerError::NodeIsProxy(node_id.to_string()));
    }
    Ok(())
}

fn require_proxy_node(ctx: &TxContext<'_>, proxy_node_id: &str) -> LedgerResult<()> {
    let proxy = ctx
        .get::<NodeDetail>(&StateKey::node(proxy_node_id))?
        .ok_or_else(|| LedgerError::ProxyNodeNotFound(proxy_node_id.to_string()))?;
    if !proxy.is_proxy() {
        return Err(LedgerError::NodeIsNotProxy(proxy_node_id.to_string()));
    }
    Ok(())
}

fn attach(ctx: &mut TxContext<'_>, proxy_node_id: &str, node_id: &str) -> LedgerResult<()> {
    let mut behind = nodes_behind(ctx, proxy_node_id)?;
    append_unique(&mut behind, node_id);
    ctx.put(&StateKey::BehindProxyNode(proxy_node_id.to_string()), &behind)
}

fn detach(ctx: &mut TxContext<'_>, proxy_node_id: &str, node_id: &str) -> LedgerResult<()> {
    let mut behind = nodes_behind(ctx, proxy_node_id)?;
    behind.retain(|id| id != node_id);
    ctx.put(&StateKey::BehindProxyNode(proxy_node_id.to_string()), &behind)
}

pub fn add_node_to_proxy_node(
    ctx: &mut TxContext<'_>,
    params: AddNodeToProxyNodeParams,
) -> LedgerResult<()> {
    load_node(ctx, &params.node_id)?;
    require_proxy_node(ctx, &params.proxy_node_id)?;
    require_proxiable_node(ctx, &params.node_id)?;
    if load_proxy_link(ctx, &params.node_id)?.is_some() {
        return Err(LedgerError::NodeIsAlreadyBehindProxy(params.node_id));
    }

    ctx.put(
        &StateKey::Proxy(params.node_id.clone()),
        &ProxyLink {
            proxy_node_id: params.proxy_node_id.clone(),
            config: params.config,
        },
    )?;
    attach(ctx, &params.proxy_node_id, &params.node_id)?;

    debug!(node_id = %params.node_id, proxy = %params.proxy_node_id, "[il-02] node attached to proxy");
    Ok(())
}

/// Move a node to another proxy (or just change its config). The old
/// reverse index loses the node in the same transaction the new one gains it.
pub fn update_node_proxy_node(
    ctx: &mut TxContext<'_>,
    params: UpdateNodeProxyNodeParams,
) -> LedgerResult<()> {
    load_node(ctx, &params.node_id)?;
    let current = load_proxy_link(ctx, &params.node_id)?
        .ok_or_else(|| LedgerError::NodeIsNotBehindProxy(params.node_id.clone()))?;
    require_proxy_node(ctx, &params.proxy_node_id)?;

    if current.proxy_node_id != params.proxy_node_id {
        detach(ctx, &current.proxy_node_id, &params.node_id)?;
        attach(ctx, &params.proxy_node_id, &params.node_id)?;
    }
    ctx.put(
        &StateKey::Proxy(params.node_id.clone()),
        &ProxyLink {
            proxy_node_id: params.proxy_node_id.clone(),
            config: params.config.unwrap_or(current.config),
        },
    )?;

    debug!(
        node_id = %params.node_id,
        from = %current.proxy_node_id,
        to = %params.proxy_node_id,
        "[il-02] node proxy updated"
    );
    Ok(())
}

pub fn remove_node_from_proxy_node(ctx: &mut TxContext<'_>, params: NodeIdParams) -> LedgerResult<()> {
    load_node(ctx, &params.node_id)?;
    let current = load_proxy_link(ctx, &params.node_id)?
        .ok_or_else(|| LedgerError::NodeIsNotBehindProxy(params.node_id.clone()))?;

    detach(ctx, &current.proxy_node_id, &params.node_id)?;
    ctx.delete(&StateKey::Proxy(params.node_id.clone()));

    debug!(node_id = %params.node_id, proxy = %current.proxy_node_id, "[il-02] node detached from proxy");
    Ok(())
}
