//! Request, signature and identity-proof queries.

use il_01_state_store::{QueryContext, StateKey};
use il_03_request_protocol::{IdentityProofRecord, Request, SignedData};
use shared_types::LedgerResult;

use crate::domain::{
    DataSignatureQuery, IdentityProofQuery, IdentityProofView, RequestDetailView, RequestIdQuery,
    RequestSummaryView, SignatureView,
};
use crate::service::answer::Answer;

fn load_request(ctx: &QueryContext<'_>, request_id: &str) -> LedgerResult<Option<Request>> {
    ctx.get(&StateKey::request(request_id))
}

pub fn get_request(ctx: &QueryContext<'_>, q: &RequestIdQuery) -> LedgerResult<Answer> {
    match load_request(ctx, &q.request_id)? {
        Some(request) => Answer::success(&RequestSummaryView {
            closed: request.closed,
            timed_out: request.timed_out,
            mode: request.mode,
            request_message_hash: request.request_message_hash,
        }),
        None => Ok(Answer::not_found_empty()),
    }
}

pub fn get_request_detail(ctx: &QueryContext<'_>, q: &RequestIdQuery) -> LedgerResult<Answer> {
    let Some(request) = load_request(ctx, &q.request_id)? else {
        return Ok(Answer::not_found_empty());
    };
    Answer::success(&RequestDetailView {
        request_id: request.request_id,
        requester_node_id: request.owner,
        mode: request.mode,
        min_idp: request.min_idp,
        min_ial: request.min_ial,
        min_aal: request.min_aal,
        request_timeout: request.request_timeout,
        idp_id_list: request.idp_id_list,
        data_request_list: request.data_request_list,
        request_message_hash: request.request_message_hash,
        response_list: request.response_list,
        closed: request.closed,
        timed_out: request.timed_out,
        // Set at creation from the owner's role, which never changes.
        special: request.can_add_accessor,
        use_count: request.use_count,
        purpose: request.purpose,
    })
}

pub fn get_data_signature(ctx: &QueryContext<'_>, q: &DataSignatureQuery) -> LedgerResult<Answer> {
    let key = StateKey::sign_data(&q.node_id, &q.service_id, &q.request_id);
    match ctx.get::<SignedData>(&key)? {
        Some(signed) => Answer::success(&SignatureView {
            signature: signed.signature,
        }),
        None => Ok(Answer::not_found_empty()),
    }
}

pub fn get_identity_proof(ctx: &QueryContext<'_>, q: &IdentityProofQuery) -> LedgerResult<Answer> {
    let key = StateKey::identity_proof(&q.request_id, &q.idp_id);
    match ctx.get::<IdentityProofRecord>(&key)? {
        Some(record) => Answer::success(&IdentityProofView {
            identity_proof: record.identity_proof,
        }),
        None => Ok(Answer::not_found_empty()),
    }
}
