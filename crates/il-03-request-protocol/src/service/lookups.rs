use il_01_state_store::{StateKey, TxContext};
use shared_types::{LedgerError, LedgerResult};

use crate::domain::Request;

pub fn load_request(ctx: &TxContext<'_>, request_id: &str) -> LedgerResult<Request> {
    ctx.get(&StateKey::request(request_id))?
        .ok_or_else(|| LedgerError::RequestIdNotFound(request_id.to_string()))
}

pub fn store_request(ctx: &mut TxContext<'_>, request: &Request) -> LedgerResult<()> {
    ctx.put(&StateKey::request(&request.request_id), request)
}

/// Rejects closed and timed-out requests.
pub fn require_open(request: &Request) -> LedgerResult<()> {
    if request.closed {
        return Err(LedgerError::RequestIsClosed(request.request_id.clone()));
    }
    if request.timed_out {
        return Err(LedgerError::RequestIsTimedOut(request.request_id.clone()));
    }
    Ok(())
}
