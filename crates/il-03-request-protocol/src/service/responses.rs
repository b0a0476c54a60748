//! IdP side of a request: identity proof declaration and responses.

use il_01_state_store::{StateKey, TxContext};
use il_02_registry::load_node;
use shared_types::{LedgerError, LedgerResult, Verdict};
use tracing::debug;

use crate::domain::{
    CreateIdpResponseParams, DeclareIdentityProofParams, IdentityProofRecord, Response,
    MODE_IDENTITY_PROOF,
};
use crate::service::lookups::{load_request, require_open, store_request};

/// Record the caller's identity proof for a mode-3 request, once.
pub fn declare_identity_proof(
    ctx: &mut TxContext<'_>,
    params: DeclareIdentityProofParams,
) -> LedgerResult<()> {
    let request = load_request(ctx, &params.request_id)?;
    if request.mode != MODE_IDENTITY_PROOF {
        return Err(LedgerError::InvalidMode(request.mode));
    }
    if request.has_enough_responses() {
        return Err(LedgerError::RequestIsCompleted(request.request_id));
    }
    require_open(&request)?;

    let idp_id = ctx.caller();
    let key = StateKey::identity_proof(&params.request_id, idp_id);
    if ctx.exists(&key)? {
        return Err(LedgerError::DuplicateIdentityProof {
            request_id: params.request_id,
            idp_id: idp_id.to_string(),
        });
    }
    ctx.put(
        &key,
        &IdentityProofRecord {
            identity_proof: params.identity_proof,
        },
    )?;

    debug!(request_id = %params.request_id, idp_id, "[il-03] identity proof declared");
    Ok(())
}

/// Append the caller's response. This is the only path that grows
/// `response_list`, and it never grows it past `min_idp`.
pub fn create_idp_response(
    ctx: &mut TxContext<'_>,
    params: CreateIdpResponseParams,
) -> LedgerResult<()> {
    let idp_id = ctx.caller();
    let mut request = load_request(ctx, &params.request_id)?;
    require_open(&request)?;

    if params.aal < request.min_aal {
        return Err(LedgerError::AalError(format!(
            "response AAL {} is below the request minimum {}",
            params.aal, request.min_aal
        )));
    }
    if params.ial < request.min_ial {
        return Err(LedgerError::IalError(format!(
            "response IAL {} is below the request minimum {}",
            params.ial, request.min_ial
        )));
    }
    let node = load_node(ctx, idp_id)?;
    if params.aal > node.max_aal {
        return Err(LedgerError::AalError(format!(
            "response AAL {} exceeds the node maximum {}",
            params.aal, node.max_aal
        )));
    }
    if params.ial > node.max_ial {
        return Err(LedgerError::IalError(format!(
            "response IAL {} exceeds the node maximum {}",
            params.ial, node.max_ial
        )));
    }

    if request.has_enough_responses() {
        return Err(LedgerError::RequestIsCompleted(request.request_id));
    }
    if !request.idp_id_list.is_empty() && !request.idp_id_list.iter().any(|id| id == idp_id) {
        return Err(LedgerError::NotInIdpList(idp_id.to_string()));
    }
    if request.response_list.iter().any(|r| r.idp_id == idp_id) {
        return Err(LedgerError::DuplicateResponse(idp_id.to_string()));
    }

    if request.mode == MODE_IDENTITY_PROOF {
        let declared: Option<IdentityProofRecord> =
            ctx.get(&StateKey::identity_proof(&params.request_id, idp_id))?;
        match declared {
            Some(record) if record.identity_proof == params.identity_proof => {}
            _ => return Err(LedgerError::WrongIdentityProof(idp_id.to_string())),
        }
    }

    request.response_list.push(Response {
        idp_id: idp_id.to_string(),
        ial: params.ial,
        aal: params.aal,
        status: params.status,
        signature: params.signature,
        identity_proof: params.identity_proof,
        private_proof_hash: params.private_proof_hash,
        valid_proof: Verdict::Unset,
        valid_ial: Verdict::Unset,
        valid_signature: Verdict::Unset,
    });
    store_request(ctx, &request)?;

    debug!(
        request_id = %request.request_id,
        idp_id,
        responses = request.response_list.len(),
        min_idp = request.min_idp,
        "[il-03] IdP response recorded"
    );
    Ok(())
}
