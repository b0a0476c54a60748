//! Accessor groups, onboarding and revocation.

use il_01_state_store::{StateKey, TxContext};
use il_03_request_protocol::{load_request, store_request, Request, RequestPurpose, MODE_IDENTITY_PROOF};
use shared_types::{LedgerError, LedgerResult};
use tracing::{debug, info};

use crate::domain::{
    Accessor, AddAccessorMethodParams, CreateIdentityParams, RevokeAccessorMethodParams,
};

pub fn load_accessor(ctx: &TxContext<'_>, accessor_id: &str) -> LedgerResult<Accessor> {
    ctx.get(&StateKey::Accessor(accessor_id.to_string()))?
        .ok_or_else(|| LedgerError::AccessorIdNotFound(accessor_id.to_string()))
}

/// Active accessor ids of a group, in order of addition.
pub fn accessors_in_group(ctx: &TxContext<'_>, group_id: &str) -> LedgerResult<Vec<String>> {
    Ok(ctx
        .get(&StateKey::AccessorInGroup(group_id.to_string()))?
        .unwrap_or_default())
}

pub fn revoked_accessors_in_group(ctx: &TxContext<'_>, group_id: &str) -> LedgerResult<Vec<String>> {
    Ok(ctx
        .get(&StateKey::RevokedAccessorInGroup(group_id.to_string()))?
        .unwrap_or_default())
}

fn require_new_accessor(ctx: &TxContext<'_>, accessor_id: &str) -> LedgerResult<()> {
    if ctx.exists(&StateKey::Accessor(accessor_id.to_string()))? {
        return Err(LedgerError::DuplicateAccessorId(accessor_id.to_string()));
    }
    Ok(())
}

/// Write an active accessor owned by the caller and list it in its group.
fn insert_accessor(
    ctx: &mut TxContext<'_>,
    accessor_id: String,
    accessor_type: String,
    accessor_public_key: String,
    accessor_group_id: String,
) -> LedgerResult<()> {
    let owner = ctx.caller().to_string();
    let mut in_group = accessors_in_group(ctx, &accessor_group_id)?;
    in_group.push(accessor_id.clone());
    ctx.put(&StateKey::AccessorInGroup(accessor_group_id.clone()), &in_group)?;
    ctx.put(
        &StateKey::Accessor(accessor_id),
        &Accessor {
            accessor_type,
            accessor_public_key,
            accessor_group_id,
            active: true,
            owner,
        },
    )
}

/// Create a new accessor group with its first accessor.
pub fn create_identity(ctx: &mut TxContext<'_>, params: CreateIdentityParams) -> LedgerResult<()> {
    require_new_accessor(ctx, &params.accessor_id)?;
    let group_key = StateKey::AccessorGroup(params.accessor_group_id.clone());
    if ctx.exists(&group_key)? {
        return Err(LedgerError::DuplicateAccessorGroupId(params.accessor_group_id));
    }
    ctx.put(&group_key, &true)?;

    debug!(
        accessor_id = %params.accessor_id,
        group = %params.accessor_group_id,
        "[il-04] accessor group created"
    );
    insert_accessor(
        ctx,
        params.accessor_id,
        params.accessor_type,
        params.accessor_public_key,
        params.accessor_group_id,
    )
}

// =============================================================================
// ONBOARDING REQUEST GATES
// =============================================================================

/// Closed request of `purpose` whose valid accepts reach `min_idp`.
fn load_completed_request(
    ctx: &TxContext<'_>,
    request_id: &str,
    purpose: RequestPurpose,
) -> LedgerResult<Request> {
    let request = load_request(ctx, request_id)?;
    if !request.closed {
        return Err(LedgerError::RequestIsNotClosed(request.request_id));
    }
    if request.purpose != purpose {
        return Err(LedgerError::InvalidPurpose {
            expected: purpose.as_str().to_string(),
        });
    }
    let accepted = request.valid_accepts().count();
    if accepted < request.min_idp as usize {
        return Err(LedgerError::RequestIsNotCompleted {
            accepted,
            min_idp: request.min_idp,
        });
    }
    Ok(request)
}

/// Mode 3, at least one IdP, IdP-created and never consumed.
fn require_unused_onboarding(request: &Request) -> LedgerResult<()> {
    if request.mode != MODE_IDENTITY_PROOF {
        return Err(LedgerError::InvalidMode(request.mode));
    }
    if request.min_idp < 1 {
        return Err(LedgerError::InvalidMinIdp(request.min_idp));
    }
    if !request.is_special_and_unused() {
        return Err(LedgerError::RequestIsNotSpecial(request.request_id.clone()));
    }
    Ok(())
}

fn consume(ctx: &mut TxContext<'_>, mut request: Request) -> LedgerResult<()> {
    request.use_count += 1;
    store_request(ctx, &request)
}

// =============================================================================
// ADD / REVOKE
// =============================================================================

/// Add an accessor to an existing group, consuming an `AddAccessor` request.
pub fn add_accessor_method(
    ctx: &mut TxContext<'_>,
    params: AddAccessorMethodParams,
) -> LedgerResult<()> {
    if !ctx.exists(&StateKey::AccessorGroup(params.accessor_group_id.clone()))? {
        return Err(LedgerError::AccessorGroupIdNotFound(params.accessor_group_id));
    }
    require_new_accessor(ctx, &params.accessor_id)?;

    let request = load_completed_request(ctx, &params.request_id, RequestPurpose::AddAccessor)?;
    require_unused_onboarding(&request)?;
    consume(ctx, request)?;

    info!(
        accessor_id = %params.accessor_id,
        group = %params.accessor_group_id,
        request_id = %params.request_id,
        "[il-04] accessor added"
    );
    insert_accessor(
        ctx,
        params.accessor_id,
        params.accessor_type,
        params.accessor_public_key,
        params.accessor_group_id,
    )
}

/// Revoke a batch of the caller's accessors, consuming a `RevokeAccessor`
/// request whose counted accepts all came from the caller.
pub fn revoke_accessor_method(
    ctx: &mut TxContext<'_>,
    params: RevokeAccessorMethodParams,
) -> LedgerResult<()> {
    let node_id = ctx.caller();
    let request = load_completed_request(ctx, &params.request_id, RequestPurpose::RevokeAccessor)?;
    if let Some(foreign) = request.valid_accepts().find(|r| r.idp_id != node_id) {
        return Err(LedgerError::NotOwnerOfResponse {
            request_id: request.request_id.clone(),
            idp_id: foreign.idp_id.clone(),
        });
    }
    require_unused_onboarding(&request)?;

    for accessor_id in &params.accessor_id_list {
        let mut accessor = load_accessor(ctx, accessor_id)?;
        if accessor.owner != node_id {
            return Err(LedgerError::NotOwnerOfAccessor {
                accessor_id: accessor_id.clone(),
                node_id: node_id.to_string(),
            });
        }
        if !accessor.active {
            return Err(LedgerError::AccessorIsRevoked(accessor_id.clone()));
        }

        let group_id = accessor.accessor_group_id.clone();
        let mut active = accessors_in_group(ctx, &group_id)?;
        active.retain(|id| id != accessor_id);
        let mut revoked = revoked_accessors_in_group(ctx, &group_id)?;
        revoked.push(accessor_id.clone());

        accessor.active = false;
        ctx.put(&StateKey::Accessor(accessor_id.clone()), &accessor)?;
        ctx.put(&StateKey::AccessorInGroup(group_id.clone()), &active)?;
        ctx.put(&StateKey::RevokedAccessorInGroup(group_id), &revoked)?;
    }
    consume(ctx, request)?;

    info!(
        count = params.accessor_id_list.len(),
        request_id = %params.request_id,
        node_id,
        "[il-04] accessors revoked"
    );
    Ok(())
}
