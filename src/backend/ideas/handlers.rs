/**
 * Idea Handlers
 *
 * - POST   /api/ideas - Create (201)
 * - GET    /api/ideas/{idea_id} - Fetch, subject to visibility
 * - PATCH  /api/ideas/{idea_id} - Owner edits any of title, descriptions, visibility
 * - DELETE /api/ideas/{idea_id} - Owner deletes (204)
 * - POST   /api/ideas/{idea_id}/like - Toggle like (201 liked / 200 unliked)
 * - POST   /api/ideas/{idea_id}/comments - Comment (201)
 */

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::backend::error::BackendResult;
use crate::backend::ideas::service;
use crate::backend::middleware::{ApiJson, ApiPath, AuthUser};
use crate::backend::server::state::AppState;
use crate::shared::social::{
    Comment, CreateCommentRequest, CreateIdeaRequest, Idea, LikeResponse, UpdateIdeaRequest,
};

pub async fn create_idea(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiJson(request): ApiJson<CreateIdeaRequest>,
) -> BackendResult<(StatusCode, Json<Idea>)> {
    let idea = service::create_idea(state.store.as_ref(), &actor, request).await?;
    Ok((StatusCode::CREATED, Json(idea)))
}

pub async fn get_idea(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(idea_id): ApiPath<Uuid>,
) -> BackendResult<Json<Idea>> {
    Ok(Json(service::get_idea(state.store.as_ref(), &actor, idea_id).await?))
}

pub async fn update_idea(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(idea_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateIdeaRequest>,
) -> BackendResult<Json<Idea>> {
    Ok(Json(service::update_idea(state.store.as_ref(), &actor, idea_id, request).await?))
}

pub async fn delete_idea(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(idea_id): ApiPath<Uuid>,
) -> BackendResult<StatusCode> {
    service::delete_idea(state.store.as_ref(), &actor, idea_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_like(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(idea_id): ApiPath<Uuid>,
) -> BackendResult<(StatusCode, Json<LikeResponse>)> {
    let response =
        service::toggle_like(state.store.as_ref(), &state.realtime_broadcast, &actor, idea_id).await?;
    let status = if response.is_liked { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(response)))
}

pub async fn add_comment(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(idea_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CreateCommentRequest>,
) -> BackendResult<(StatusCode, Json<Comment>)> {
    let comment = service::add_comment(
        state.store.as_ref(),
        &state.realtime_broadcast,
        &actor,
        idea_id,
        &request,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
