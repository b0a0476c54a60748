//! Global parameters set by NDID.

use il_01_state_store::{StateKey, TxContext};
use shared_types::{LedgerError, LedgerResult};
use tracing::info;

use crate::domain::TimeOutBlockParams;

/// Lease length, in blocks, of a first-IdP identity registration.
pub fn register_identity_timeout(ctx: &TxContext<'_>, default_blocks: u64) -> LedgerResult<u64> {
    Ok(ctx
        .get(&StateKey::TimeOutBlockRegisterIdentity)?
        .unwrap_or(default_blocks))
}

pub fn set_timeout_block_register_identity(
    ctx: &mut TxContext<'_>,
    params: TimeOutBlockParams,
) -> LedgerResult<()> {
    if params.timeout_block == 0 {
        return Err(LedgerError::TimeOutBlockIsMustGreaterThanZero);
    }
    info!(timeout_block = params.timeout_block, "[il-02] identity registration lease changed");
    ctx.put(&StateKey::TimeOutBlockRegisterIdentity, &params.timeout_block)
}
