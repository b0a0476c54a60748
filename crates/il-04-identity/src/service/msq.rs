//! Identity registrations and their first-IdP leases.

use il_01_state_store::{StateKey, TxContext};
use il_02_registry::{load_node, register_identity_timeout};
use shared_types::{LedgerError, LedgerResult};
use tracing::debug;

use crate::domain::{HashIdParams, MsqDestination, RegisterIdentityParams, UpdateIdentityParams};

/// Every IdP registration of `hash_id`, in registration order.
pub fn msq_destinations(ctx: &TxContext<'_>, hash_id: &str) -> LedgerResult<Vec<MsqDestination>> {
    Ok(ctx
        .get(&StateKey::MsqDestination(hash_id.to_string()))?
        .unwrap_or_default())
}

fn ial_above_max(ial: f64, max_ial: f64) -> LedgerError {
    LedgerError::IalError(format!("IAL {ial} exceeds the node maximum {max_ial}"))
}

/// Register the caller as a holder of each identity. A `first`
/// registration takes a lease of `register_identity_timeout` blocks.
pub fn register_identity(
    ctx: &mut TxContext<'_>,
    params: RegisterIdentityParams,
    default_lease_blocks: u64,
) -> LedgerResult<()> {
    let node_id = ctx.caller();
    let node = load_node(ctx, node_id)?;
    let current = ctx.current_height();
    let lease = register_identity_timeout(ctx, default_lease_blocks)?;

    for user in params.users {
        if user.ial > node.max_ial {
            return Err(ial_above_max(user.ial, node.max_ial));
        }

        let mut entries = msq_destinations(ctx, &user.hash_id)?;
        if user.first && entries.iter().any(|e| e.holds_lease_at(current)) {
            return Err(LedgerError::NotFirstIdp(user.hash_id));
        }
        if entries.iter().any(|e| e.node_id == node_id) {
            return Err(LedgerError::DuplicateIdentityRegistration {
                hash_id: user.hash_id,
                node_id: node_id.to_string(),
            });
        }

        let timeout_block = if user.first {
            current
                .checked_add(lease)
                .ok_or(LedgerError::TimeOutBlockIsTooLarge {
                    height: current,
                    lease,
                })?
        } else {
            0
        };
        entries.push(MsqDestination {
            node_id: node_id.to_string(),
            ial: user.ial,
            active: true,
            first: user.first,
            timeout_block,
        });
        ctx.put(&StateKey::MsqDestination(user.hash_id.clone()), &entries)?;

        debug!(hash_id = %user.hash_id, node_id, first = user.first, timeout_block, "[il-04] identity registered");
    }
    Ok(())
}

/// Release the caller's lease early. An expired lease stays expired.
pub fn clear_register_identity_timeout(
    ctx: &mut TxContext<'_>,
    params: HashIdParams,
) -> LedgerResult<()> {
    let node_id = ctx.caller();
    let current = ctx.current_height();
    let mut entries = msq_destinations(ctx, &params.hash_id)?;

    let entry = entries
        .iter_mut()
        .find(|e| e.node_id == node_id)
        .ok_or_else(|| LedgerError::HashIdNotFound(params.hash_id.clone()))?;
    if entry.timeout_block <= current {
        return Err(LedgerError::MsqDestinationIsTimedOut(params.hash_id));
    }
    entry.timeout_block = 0;
    ctx.put(&StateKey::MsqDestination(params.hash_id.clone()), &entries)?;

    debug!(hash_id = %params.hash_id, node_id, "[il-04] registration lease cleared");
    Ok(())
}

/// Change the IAL of the caller's own entry. Other entries are untouched.
pub fn update_identity(ctx: &mut TxContext<'_>, params: UpdateIdentityParams) -> LedgerResult<()> {
    let node_id = ctx.caller();
    let node = load_node(ctx, node_id)?;
    if params.ial > node.max_ial {
        return Err(ial_above_max(params.ial, node.max_ial));
    }

    let mut entries = msq_destinations(ctx, &params.hash_id)?;
    let entry = entries
        .iter_mut()
        .find(|e| e.node_id == node_id)
        .ok_or_else(|| LedgerError::HashIdNotFound(params.hash_id.clone()))?;
    if params.ial > 0.0 {
        entry.ial = params.ial;
    }
    ctx.put(&StateKey::MsqDestination(params.hash_id), &entries)
}
