//! AS side of a request: signing data and the owner's receipt.

use il_01_state_store::{StateKey, TxContext};
use il_02_registry::{load_approval, require_active_service, service_destinations};
use shared_types::{LedgerError, LedgerResult};
use tracing::debug;

use crate::domain::{SetDataReceivedParams, SignDataParams, SignedData};
use crate::service::lookups::{load_request, require_open, store_request};

/// Record that the calling AS answered `service_id` on the request and
/// store its signature.
pub fn sign_data(ctx: &mut TxContext<'_>, params: SignDataParams) -> LedgerResult<()> {
    let as_id = ctx.caller();
    let mut request = load_request(ctx, &params.request_id)?;
    require_open(&request)?;
    require_active_service(ctx, &params.service_id)?;

    match load_approval(ctx, &params.service_id, as_id)? {
        Some(approval) if approval.active => {}
        _ => {
            return Err(LedgerError::ServiceDestinationIsNotApproved {
                service_id: params.service_id,
                node_id: as_id.to_string(),
            })
        }
    }
    let destination = service_destinations(ctx, &params.service_id)?
        .into_iter()
        .find(|d| d.node_id == as_id)
        .ok_or_else(|| LedgerError::ServiceDestinationNotFound {
            service_id: params.service_id.clone(),
            node_id: as_id.to_string(),
        })?;
    if !destination.active {
        return Err(LedgerError::ServiceDestinationIsNotActive {
            service_id: params.service_id,
            node_id: as_id.to_string(),
        });
    }

    let request_id = request.request_id.clone();
    let data_request = request.data_request_mut(&params.service_id).ok_or_else(|| {
        LedgerError::ServiceIdNotFoundInRequest {
            request_id: request_id.clone(),
            service_id: params.service_id.clone(),
        }
    })?;
    if !data_request.is_open_to(as_id) {
        return Err(LedgerError::NodeIdIsNotExistInAsList(as_id.to_string()));
    }
    if data_request.answered_as_id_list.iter().any(|id| id == as_id) {
        return Err(LedgerError::DuplicateAnsweredAsIdList(as_id.to_string()));
    }
    if data_request.answered_as_id_list.len() >= data_request.min_as as usize {
        return Err(LedgerError::DataRequestIsCompleted(params.service_id));
    }
    data_request.answered_as_id_list.push(as_id.to_string());

    store_request(ctx, &request)?;
    ctx.put(
        &StateKey::sign_data(as_id, &params.service_id, &request_id),
        &SignedData {
            signature: params.signature,
        },
    )?;

    debug!(request_id = %request_id, service_id = %params.service_id, as_id, "[il-03] data signed");
    Ok(())
}

/// Owner acknowledges that data from `as_id` arrived off-ledger.
pub fn set_data_received(ctx: &mut TxContext<'_>, params: SetDataReceivedParams) -> LedgerResult<()> {
    let mut request = load_request(ctx, &params.request_id)?;
    if request.owner != ctx.caller() {
        return Err(LedgerError::NotRequestOwner {
            request_id: request.request_id,
            node_id: ctx.caller().to_string(),
        });
    }

    let request_id = request.request_id.clone();
    let data_request = request.data_request_mut(&params.service_id).ok_or_else(|| {
        LedgerError::ServiceIdNotFoundInRequest {
            request_id: request_id.clone(),
            service_id: params.service_id.clone(),
        }
    })?;
    if !data_request.answered_as_id_list.contains(&params.as_id) {
        return Err(LedgerError::AsIdIsNotExistInAnsweredAsList(params.as_id));
    }
    if data_request.received_data_from_list.contains(&params.as_id) {
        return Err(LedgerError::DuplicateAsInDataRequest(params.as_id));
    }
    data_request.received_data_from_list.push(params.as_id.clone());
    store_request(ctx, &request)?;

    debug!(request_id = %request_id, as_id = %params.as_id, "[il-03] data receipt acknowledged");
    Ok(())
}
