//! Group Message HTTP Handlers
//!
//! - GET  /api/ideas/{idea_id}/messages - History, oldest first
//! - POST /api/ideas/{idea_id}/messages - Post `{content}` (201)

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::backend::error::BackendResult;
use crate::backend::messaging::service;
use crate::backend::middleware::{ApiJson, ApiPath, AuthUser};
use crate::backend::server::state::AppState;
use crate::shared::social::{GroupMessageView, SendGroupMessageRequest};

pub async fn list_messages(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(idea_id): ApiPath<Uuid>,
) -> BackendResult<Json<Vec<GroupMessageView>>> {
    Ok(Json(service::list_messages(state.store.as_ref(), &actor, idea_id).await?))
}

pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(idea_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<SendGroupMessageRequest>,
) -> BackendResult<(StatusCode, Json<GroupMessageView>)> {
    let message = service::send_message(
        state.store.as_ref(),
        &state.realtime_broadcast,
        &actor,
        idea_id,
        &request,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(message)))
}
