//! Identifier namespaces.

use il_01_state_store::{StateKey, TxContext};
use shared_types::{LedgerError, LedgerResult};
use tracing::debug;

use crate::domain::{Namespace, NamespaceParams};

pub fn all_namespaces(ctx: &TxContext<'_>) -> LedgerResult<Vec<Namespace>> {
    Ok(ctx.get(&StateKey::AllNamespace)?.unwrap_or_default())
}

pub fn add_namespace(ctx: &mut TxContext<'_>, params: NamespaceParams) -> LedgerResult<()> {
    let mut all = all_namespaces(ctx)?;
    if all.iter().any(|ns| ns.namespace == params.namespace) {
        return Err(LedgerError::DuplicateNamespace(params.namespace));
    }
    debug!(namespace = %params.namespace, "[il-02] namespace added");
    all.push(Namespace {
        namespace: params.namespace,
        description: params.description,
        active: true,
    });
    ctx.put(&StateKey::AllNamespace, &all)
}

pub fn disable_namespace(ctx: &mut TxContext<'_>, params: NamespaceParams) -> LedgerResult<()> {
    set_namespace_active(ctx, &params.namespace, false)
}

pub fn enable_namespace(ctx: &mut TxContext<'_>, params: NamespaceParams) -> LedgerResult<()> {
    set_namespace_active(ctx, &params.namespace, true)
}

fn set_namespace_active(ctx: &mut TxContext<'_>, namespace: &str, active: bool) -> LedgerResult<()> {
    let mut all = all_namespaces(ctx)?;
    let entry = all
        .iter_mut()
        .find(|ns| ns.namespace == namespace)
        .ok_or_else(|| LedgerError::NamespaceNotFound(namespace.to_string()))?;
    entry.active = active;
    ctx.put(&StateKey::AllNamespace, &all)
}
