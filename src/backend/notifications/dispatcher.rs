/**
 * Notification Dispatcher
 *
 * Builds the notification records fanned out by state transitions, likes
 * and comments. Composition is pure: the caller hands the record to the
 * store together with the write that caused it, so the two commit (or
 * fail) as one unit.
 *
 * # Self-suppression
 *
 * A notification is never composed for its own sender. Every constructor
 * here returns `None` when recipient == sender, whatever the kind.
 */

use chrono::Utc;
use uuid::Uuid;

use crate::backend::error::BackendResult;
use crate::backend::realtime::broadcast::{publish_notification, RealtimeEventBroadcast};
use crate::backend::store::Store;
use crate::shared::social::{Idea, Notification, NotificationType, User};

/// Human-readable text for a notification about `idea_title`
pub fn message_for(kind: NotificationType, sender_username: &str, idea_title: &str) -> String {
    match kind {
        NotificationType::CollabRequest => format!(
            "{} requested to collaborate on your idea '{}'",
            sender_username, idea_title
        ),
        NotificationType::CollabApproved => {
            format!("Your collaboration request for '{}' was approved", idea_title)
        }
        NotificationType::CollabRejected => {
            format!("Your collaboration request for '{}' was rejected", idea_title)
        }
        NotificationType::Like => format!("{} liked your idea '{}'", sender_username, idea_title),
        NotificationType::Comment => {
            format!("{} commented on your idea '{}'", sender_username, idea_title)
        }
    }
}

/// Compose an unread notification, or `None` if it would notify its sender
pub fn compose(
    recipient_id: Uuid,
    sender_id: Option<Uuid>,
    idea_id: Option<Uuid>,
    kind: NotificationType,
    message: impl Into<String>,
) -> Option<Notification> {
    if sender_id == Some(recipient_id) {
        tracing::debug!(kind = kind.as_str(), "suppressed self-notification");
        return None;
    }
    Some(Notification {
        id: Uuid::new_v4(),
        recipient_id,
        sender_id,
        idea_id,
        kind,
        message: message.into(),
        is_read: false,
        created_at: Utc::now(),
    })
}

/// Compose the notification `sender` triggers on `idea` for `recipient_id`
pub fn about_idea(
    kind: NotificationType,
    recipient_id: Uuid,
    sender: &User,
    idea: &Idea,
) -> Option<Notification> {
    compose(
        recipient_id,
        Some(sender.id),
        Some(idea.id),
        kind,
        message_for(kind, &sender.username, &idea.title),
    )
}

/// Store a standalone notification and push it to its recipient
///
/// Use this only when no other row is written alongside; otherwise hand
/// the notification to the store write that caused it and call
/// [`publish`] after the commit.
pub async fn emit(
    store: &dyn Store,
    events: &RealtimeEventBroadcast,
    notification: Option<Notification>,
) -> BackendResult<Option<Notification>> {
    let Some(notification) = notification else {
        return Ok(None);
    };
    store.insert_notification(&notification).await?;
    publish(events, Some(&notification));
    Ok(Some(notification))
}

/// Push an already stored notification, if any, to its recipient
pub fn publish(events: &RealtimeEventBroadcast, notification: Option<&Notification>) {
    if let Some(notification) = notification {
        tracing::info!(
            notification_id = %notification.id,
            recipient_id = %notification.recipient_id,
            kind = notification.kind.as_str(),
            "notification dispatched"
        );
        publish_notification(events, notification);
    }
}
