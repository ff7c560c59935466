//! Notification HTTP Handlers
//!
//! - GET  /api/notifications - The actor's notifications, newest first
//! - POST /api/notifications/{notification_id}/read - Mark one as read

use axum::{
    extract::State,
    Json,
};
use uuid::Uuid;

use crate::backend::error::BackendResult;
use crate::backend::middleware::{ApiPath, AuthUser};
use crate::backend::notifications::service;
use crate::backend::server::state::AppState;
use crate::shared::social::{ActionResponse, NotificationView};

pub async fn list_notifications(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> BackendResult<Json<Vec<NotificationView>>> {
    Ok(Json(service::list_notifications(state.store.as_ref(), &actor).await?))
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(notification_id): ApiPath<Uuid>,
) -> BackendResult<Json<ActionResponse>> {
    Ok(Json(
        service::mark_notification_read(state.store.as_ref(), &actor, notification_id).await?,
    ))
}
