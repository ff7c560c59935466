//! Notification listing and read-marking
//!
//! Rendering resolves the sender and idea summaries and a best-effort
//! `collab_id`: for `collab_*` notifications, the id of the *pending*
//! collaboration of (idea, sender). Once the request is resolved there is
//! no pending row and the link renders as `null`. That is intended; the
//! link is only useful while the request is open.

use std::collections::HashMap;
use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::store::Store;
use crate::shared::social::{
    ActionResponse, IdeaSummary, Notification, NotificationView, User, UserSummary,
};

/// The actor's notifications, newest first
pub async fn list_notifications(store: &dyn Store, actor: &User) -> BackendResult<Vec<NotificationView>> {
    let notifications = store.list_notifications(actor.id).await?;

    let mut users: HashMap<Uuid, Option<UserSummary>> = HashMap::new();
    let mut ideas: HashMap<Uuid, Option<IdeaSummary>> = HashMap::new();
    let mut views = Vec::with_capacity(notifications.len());

    for notification in notifications {
        let sender = match notification.sender_id {
            Some(id) => match users.get(&id) {
                Some(cached) => cached.clone(),
                None => {
                    let summary = store.get_user(id).await?.map(|u| u.summary());
                    users.insert(id, summary.clone());
                    summary
                }
            },
            None => None,
        };
        let idea = match notification.idea_id {
            Some(id) => match ideas.get(&id) {
                Some(cached) => cached.clone(),
                None => {
                    let summary = store.get_idea(id).await?.map(|i| i.summary());
                    ideas.insert(id, summary.clone());
                    summary
                }
            },
            None => None,
        };
        let collab_id = pending_collab_id(store, &notification).await?;
        views.push(render(notification, sender, idea, collab_id));
    }

    Ok(views)
}

/// Pending collaboration of (idea, sender) for a `collab_*` notification
async fn pending_collab_id(store: &dyn Store, notification: &Notification) -> BackendResult<Option<Uuid>> {
    if !notification.kind.is_collaboration() {
        return Ok(None);
    }
    let (Some(idea_id), Some(sender_id)) = (notification.idea_id, notification.sender_id) else {
        return Ok(None);
    };
    Ok(store
        .find_collaboration(idea_id, sender_id)
        .await?
        .filter(|c| c.is_pending())
        .map(|c| c.id))
}

fn render(
    notification: Notification,
    sender: Option<UserSummary>,
    idea: Option<IdeaSummary>,
    collab_id: Option<Uuid>,
) -> NotificationView {
    NotificationView {
        id: notification.id,
        recipient_id: notification.recipient_id,
        sender,
        idea,
        kind: notification.kind,
        message: notification.message,
        is_read: notification.is_read,
        created_at: notification.created_at,
        collab_id,
    }
}

/// Mark one of the actor's notifications as read
///
/// Another user's notification is reported as not found.
pub async fn mark_notification_read(
    store: &dyn Store,
    actor: &User,
    notification_id: Uuid,
) -> BackendResult<ActionResponse> {
    if !store.mark_notification_read(notification_id, actor.id).await? {
        return Err(BackendError::not_found("Notification not found"));
    }
    Ok(ActionResponse::new("Notification marked as read"))
}
