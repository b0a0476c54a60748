//! Request creation and the two terminal transitions.

use std::collections::BTreeSet;

use il_01_state_store::{StateKey, TxContext};
use il_02_registry::load_node;
use shared_types::{LedgerError, LedgerResult, Role, Verdict};
use tracing::debug;

use crate::domain::{
    CreateRequestParams, DataRequest, FinishRequestParams, Request, ResponseValid, SUPPORTED_MODES,
};
use crate::service::lookups::{load_request, store_request};

/// Create a request owned by the caller. Returns the request id.
pub fn create_request(ctx: &mut TxContext<'_>, params: CreateRequestParams) -> LedgerResult<String> {
    if !SUPPORTED_MODES.contains(&params.mode) {
        return Err(LedgerError::InvalidMode(params.mode));
    }
    let mut seen = BTreeSet::new();
    for dr in &params.data_request_list {
        if !seen.insert(dr.service_id.as_str()) {
            return Err(LedgerError::DuplicateServiceIdInDataRequest(dr.service_id.clone()));
        }
    }
    if ctx.exists(&StateKey::request(&params.request_id))? {
        return Err(LedgerError::DuplicateRequestId(params.request_id));
    }

    let owner = ctx.caller();
    let can_add_accessor = load_node(ctx, owner)?.role == Role::Idp;

    let request = Request {
        request_id: params.request_id,
        owner: owner.to_string(),
        mode: params.mode,
        min_idp: params.min_idp,
        min_ial: params.min_ial,
        min_aal: params.min_aal,
        request_timeout: params.request_timeout,
        idp_id_list: params.idp_id_list,
        data_request_list: params
            .data_request_list
            .into_iter()
            .map(|dr| DataRequest {
                service_id: dr.service_id,
                as_id_list: dr.as_id_list,
                min_as: dr.min_as,
                request_params_hash: dr.request_params_hash,
                answered_as_id_list: Vec::new(),
                received_data_from_list: Vec::new(),
            })
            .collect(),
        request_message_hash: params.request_message_hash,
        response_list: Vec::new(),
        closed: false,
        timed_out: false,
        can_add_accessor,
        use_count: 0,
        purpose: params.purpose,
    };
    store_request(ctx, &request)?;

    debug!(
        request_id = %request.request_id,
        owner,
        mode = request.mode,
        min_idp = request.min_idp,
        "[il-03] request created"
    );
    Ok(request.request_id)
}

fn require_owner(ctx: &TxContext<'_>, request: &Request) -> LedgerResult<()> {
    if request.owner != ctx.caller() {
        return Err(LedgerError::NotRequestOwner {
            request_id: request.request_id.clone(),
            node_id: ctx.caller().to_string(),
        });
    }
    Ok(())
}

/// Copy the owner's verdicts onto the matching responses. Unknown IdPs are
/// ignored; unset verdicts leave the stored value alone.
fn apply_verdicts(request: &mut Request, verdicts: &[ResponseValid]) {
    for verdict in verdicts {
        let Some(response) = request
            .response_list
            .iter_mut()
            .find(|r| r.idp_id == verdict.idp_id)
        else {
            continue;
        };
        for (slot, value) in [
            (&mut response.valid_proof, verdict.valid_proof),
            (&mut response.valid_ial, verdict.valid_ial),
            (&mut response.valid_signature, verdict.valid_signature),
        ] {
            if value != Verdict::Unset {
                *slot = value;
            }
        }
    }
}

pub fn close_request(ctx: &mut TxContext<'_>, params: FinishRequestParams) -> LedgerResult<()> {
    let mut request = load_request(ctx, &params.request_id)?;
    if request.closed {
        return Err(LedgerError::RequestIsClosed(request.request_id));
    }
    if request.timed_out {
        return Err(LedgerError::RequestIsTimedOut(request.request_id));
    }
    require_owner(ctx, &request)?;

    apply_verdicts(&mut request, &params.response_valid_list);
    request.closed = true;
    store_request(ctx, &request)?;

    debug!(request_id = %request.request_id, "[il-03] request closed");
    Ok(())
}

pub fn timeout_request(ctx: &mut TxContext<'_>, params: FinishRequestParams) -> LedgerResult<()> {
    let mut request = load_request(ctx, &params.request_id)?;
    if request.timed_out {
        return Err(LedgerError::RequestIsTimedOut(request.request_id));
    }
    if request.closed {
        return Err(LedgerError::RequestIsClosed(request.request_id));
    }
    require_owner(ctx, &request)?;

    apply_verdicts(&mut request, &params.response_valid_list);
    request.timed_out = true;
    store_request(ctx, &request)?;

    debug!(request_id = %request.request_id, "[il-03] request timed out");
    Ok(())
}
