/**
 * Real-time Event Broadcasting
 *
 * Events are broadcast using `tokio::sync::broadcast`, a multi-producer,
 * multi-consumer channel. Every subscriber receives every event and drops
 * the ones not addressed to its user (see `RealtimeEvent::is_for`).
 *
 * Publishing is best-effort: it happens after the store write committed,
 * and a push nobody receives is not an error. The stored rows stay the
 * source of truth; a client that missed a push re-lists.
 */

use crate::shared::social::{GroupMessageView, Notification};
use crate::shared::RealtimeEvent;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Real-time update event broadcast
///
/// Cloned into every handler through `AppState`.
pub type RealtimeEventBroadcast = broadcast::Sender<RealtimeEvent>;

/// Create the broadcast channel with room for `capacity` buffered events
pub fn channel(capacity: usize) -> RealtimeEventBroadcast {
    let (tx, _) = broadcast::channel(capacity);
    tx
}

/// Broadcast a real-time event to all subscribers
///
/// # Returns
///
/// Number of active subscribers that received the event (0 if no subscribers)
pub fn broadcast_event(broadcast_tx: &RealtimeEventBroadcast, event: RealtimeEvent) -> usize {
    match broadcast_tx.send(event) {
        Ok(subscriber_count) => {
            tracing::debug!("[Realtime] Event broadcast to {} subscribers", subscriber_count);
            subscriber_count
        }
        Err(_) => {
            tracing::debug!("[Realtime] No subscribers to receive event");
            0
        }
    }
}

/// Push a stored notification to its recipient
pub fn publish_notification(broadcast_tx: &RealtimeEventBroadcast, notification: &Notification) -> usize {
    match RealtimeEvent::notification(notification) {
        Ok(event) => broadcast_event(broadcast_tx, event),
        Err(e) => {
            tracing::error!("[Realtime] Failed to encode notification {}: {:?}", notification.id, e);
            0
        }
    }
}

/// Push a stored group message to the group's members
pub fn publish_group_message(
    broadcast_tx: &RealtimeEventBroadcast,
    message: &GroupMessageView,
    members: Vec<Uuid>,
) -> usize {
    match RealtimeEvent::group_message(message, members) {
        Ok(event) => broadcast_event(broadcast_tx, event),
        Err(e) => {
            tracing::error!("[Realtime] Failed to encode group message {}: {:?}", message.id, e);
            0
        }
    }
}
