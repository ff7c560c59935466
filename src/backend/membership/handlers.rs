/**
 * Membership Handlers
 *
 * - GET  /api/ideas/{idea_id}/members - Owner first, then accepted collaborators
 * - POST /api/groups/remove-member - Owner removes `{idea_id, member_id}`
 * - POST /api/groups/leave - Member leaves `{idea_id}`
 *
 * Request bodies are optional so a missing field surfaces as a 400 naming
 * it rather than a body-decoding rejection.
 */

use axum::{
    extract::State,
    Json,
};
use uuid::Uuid;

use crate::backend::error::BackendResult;
use crate::backend::membership::service;
use crate::backend::middleware::{ApiJson, ApiPath, AuthUser};
use crate::backend::server::state::AppState;
use crate::shared::social::{ActionResponse, LeaveGroupRequest, MembersResponse, RemoveMemberRequest};

pub async fn get_members(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(idea_id): ApiPath<Uuid>,
) -> BackendResult<Json<MembersResponse>> {
    Ok(Json(service::get_members(state.store.as_ref(), &actor, idea_id).await?))
}

pub async fn remove_member(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    body: Option<ApiJson<RemoveMemberRequest>>,
) -> BackendResult<Json<ActionResponse>> {
    let ApiJson(request) = body.unwrap_or_default();
    Ok(Json(service::remove_member(state.store.as_ref(), &actor, &request).await?))
}

pub async fn leave_group(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    body: Option<ApiJson<LeaveGroupRequest>>,
) -> BackendResult<Json<ActionResponse>> {
    let ApiJson(request) = body.unwrap_or_default();
    Ok(Json(service::leave_group(state.store.as_ref(), &actor, &request).await?))
}
