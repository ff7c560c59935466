/**
 * Collaboration Handlers
 *
 * - POST /api/ideas/{idea_id}/collaborate - Request to collaborate (201)
 * - POST /api/collaborations/{collab_id}/resolve - Approve or reject, body `{"action": ...}`
 * - GET  /api/collaborations - Accepted collaborations around the actor's ideas
 */

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::backend::collab::service;
use crate::backend::error::BackendResult;
use crate::backend::middleware::{ApiJson, ApiPath, AuthUser};
use crate::backend::server::state::AppState;
use crate::shared::social::{ActionResponse, CollaborationDetail, ResolveCollaborationRequest};

pub async fn request_collaboration(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(idea_id): ApiPath<Uuid>,
) -> BackendResult<(StatusCode, Json<ActionResponse>)> {
    let response =
        service::request_collaboration(state.store.as_ref(), &state.realtime_broadcast, &actor, idea_id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// A missing body is treated like a missing action
pub async fn resolve_collaboration(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(collab_id): ApiPath<Uuid>,
    body: Option<ApiJson<ResolveCollaborationRequest>>,
) -> BackendResult<Json<ActionResponse>> {
    let ApiJson(request) = body.unwrap_or_default();
    let response = service::resolve_collaboration(
        state.store.as_ref(),
        &state.realtime_broadcast,
        &actor,
        collab_id,
        request.action.as_deref(),
    )
    .await?;
    Ok(Json(response))
}

pub async fn list_collaborations(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> BackendResult<Json<Vec<CollaborationDetail>>> {
    let details = service::list_accepted_collaborations(state.store.as_ref(), &actor).await?;
    Ok(Json(details))
}
