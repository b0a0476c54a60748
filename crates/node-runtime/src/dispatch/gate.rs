//! Caller authorization, checked before a handler touches state.

use il_01_state_store::{StateKey, TxContext};
use il_02_registry::{master_ndid, NodeDetail};
use shared_types::{LedgerError, LedgerResult};

use super::transaction::{MethodGate, Transaction};

/// Reject `tx` unless the caller may submit it.
///
/// NDID methods compare the caller against `MasterNDID` and read nothing
/// else. `InitNDID` passes through; the handler refuses it once an NDID
/// exists.
pub fn authorize(ctx: &TxContext<'_>, tx: &Transaction) -> LedgerResult<()> {
    let caller = ctx.caller();
    match tx.gate() {
        MethodGate::Bootstrap => Ok(()),
        MethodGate::Ndid => match master_ndid(ctx)? {
            Some(ndid) if ndid == caller => Ok(()),
            _ => Err(LedgerError::NotNdid(caller.to_string())),
        },
        MethodGate::AnyNode => active_caller(ctx).map(|_| ()),
        MethodGate::Roles(roles) => {
            let node = active_caller(ctx)?;
            if roles.contains(&node.role) {
                Ok(())
            } else {
                Err(LedgerError::RoleNotAllowed {
                    role: node.role.to_string(),
                    method: tx.method().to_string(),
                })
            }
        }
    }
}

fn active_caller(ctx: &TxContext<'_>) -> LedgerResult<NodeDetail> {
    let caller = ctx.caller();
    let node: NodeDetail = ctx
        .get(&StateKey::node(caller))?
        .ok_or_else(|| LedgerError::UnknownCaller(caller.to_string()))?;
    if !node.active {
        return Err(LedgerError::NodeIsNotActive(caller.to_string()));
    }
    Ok(node)
}
