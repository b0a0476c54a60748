//! Identity registration and accessor queries.

use il_01_state_store::{QueryContext, StateKey};
use il_04_identity::{Accessor, MsqDestination};
use shared_types::LedgerResult;

use crate::domain::{
    AccessorGroupIdQuery, AccessorGroupIdView, AccessorIdQuery, AccessorKeyView,
    AccessorsInGroupView, ExistView, HashIdQuery, IdentityInfoQuery, IdentityInfoView,
};
use crate::service::answer::Answer;

fn msq_destinations(ctx: &QueryContext<'_>, hash_id: &str) -> LedgerResult<Vec<MsqDestination>> {
    Ok(ctx
        .get(&StateKey::MsqDestination(hash_id.to_string()))?
        .unwrap_or_default())
}

fn load_accessor(ctx: &QueryContext<'_>, accessor_id: &str) -> LedgerResult<Option<Accessor>> {
    ctx.get(&StateKey::Accessor(accessor_id.to_string()))
}

pub fn get_identity_info(ctx: &QueryContext<'_>, q: &IdentityInfoQuery) -> LedgerResult<Answer> {
    match msq_destinations(ctx, &q.hash_id)?
        .into_iter()
        .find(|e| e.node_id == q.node_id)
    {
        Some(entry) => Answer::success(&IdentityInfoView { ial: entry.ial }),
        None => Ok(Answer::not_found_empty()),
    }
}

/// Some IdP holds the identity with a live registration at the queried height.
pub fn check_existing_identity(ctx: &QueryContext<'_>, q: &HashIdQuery) -> LedgerResult<Answer> {
    let exist = msq_destinations(ctx, &q.hash_id)?
        .iter()
        .any(|e| e.is_live_at(ctx.height()));
    Answer::success(&ExistView { exist })
}

pub fn get_accessor_group_id(ctx: &QueryContext<'_>, q: &AccessorIdQuery) -> LedgerResult<Answer> {
    match load_accessor(ctx, &q.accessor_id)? {
        Some(accessor) => Answer::success(&AccessorGroupIdView {
            accessor_group_id: accessor.accessor_group_id,
        }),
        None => Ok(Answer::not_found_empty()),
    }
}

pub fn get_accessor_key(ctx: &QueryContext<'_>, q: &AccessorIdQuery) -> LedgerResult<Answer> {
    match load_accessor(ctx, &q.accessor_id)? {
        Some(accessor) => Answer::success(&AccessorKeyView {
            accessor_public_key: accessor.accessor_public_key,
            active: accessor.active,
        }),
        None => Ok(Answer::not_found_empty()),
    }
}

pub fn check_existing_accessor_id(
    ctx: &QueryContext<'_>,
    q: &AccessorIdQuery,
) -> LedgerResult<Answer> {
    let exist = ctx.exists(&StateKey::Accessor(q.accessor_id.clone()))?;
    Answer::success(&ExistView { exist })
}

pub fn check_existing_accessor_group_id(
    ctx: &QueryContext<'_>,
    q: &AccessorGroupIdQuery,
) -> LedgerResult<Answer> {
    let exist = ctx.exists(&StateKey::AccessorGroup(q.accessor_group_id.clone()))?;
    Answer::success(&ExistView { exist })
}

pub fn get_accessors_in_group(
    ctx: &QueryContext<'_>,
    q: &AccessorGroupIdQuery,
) -> LedgerResult<Answer> {
    let group_id = &q.accessor_group_id;
    if !ctx.exists(&StateKey::AccessorGroup(group_id.clone()))? {
        return Answer::not_found(&AccessorsInGroupView::default());
    }
    Answer::success(&AccessorsInGroupView {
        accessor_id_list: ctx
            .get(&StateKey::AccessorInGroup(group_id.clone()))?
            .unwrap_or_default(),
        revoked_accessor_id_list: ctx
            .get(&StateKey::RevokedAccessorInGroup(group_id.clone()))?
            .unwrap_or_default(),
    })
}
