/**
 * Real-time Subscription Handler
 *
 * Server-Sent Events stream for `GET /api/realtime`. The stream carries only
 * events addressed to the authenticated user: their own notifications and
 * messages posted to groups they belong to.
 *
 * # Event Filtering
 *
 * Clients can narrow the stream with the `types` query parameter:
 * - `?types=notification` - Notifications only
 * - `?types=notification,group_message` - Both
 * - No parameter - Everything addressed to the user
 *
 * # Connection Management
 *
 * - Connections are kept alive using the SSE keep-alive mechanism
 * - Lagged events are logged but don't cause connection drops; clients
 *   re-list to catch up
 */

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream;
use std::collections::HashMap;
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use crate::backend::middleware::AuthUser;
use crate::backend::realtime::broadcast::RealtimeEventBroadcast;
use crate::shared::{EventType, RealtimeEvent};

/// Parse the `types` query value; `None` means no filter
pub fn parse_type_filter(raw: Option<&str>) -> Option<Vec<EventType>> {
    raw.map(|types| types.split(',').filter_map(EventType::from_str).collect::<Vec<_>>())
        .filter(|types| !types.is_empty())
}

/// Whether `event` should be delivered to `user_id` under `filter`
pub fn wants(event: &RealtimeEvent, user_id: Uuid, filter: Option<&[EventType]>) -> bool {
    event.is_for(user_id) && filter.map_or(true, |types| types.contains(&event.event_type))
}

/// Handle real-time subscription (GET /api/realtime)
pub async fn handle_realtime_subscription(
    State(broadcast_tx): State<RealtimeEventBroadcast>,
    AuthUser(actor): AuthUser,
    Query(query): Query<HashMap<String, String>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, axum::Error>>> {
    let filter = parse_type_filter(query.get("types").map(String::as_str));
    tracing::info!(user_id = %actor.id, ?filter, "[Realtime] Subscription opened");

    let broadcast_rx = broadcast_tx.subscribe();
    let user_id = actor.id;

    // Only yield when there is something for this user; axum's keep-alive
    // fills the silence.
    let stream = stream::unfold((broadcast_rx, filter), move |(mut rx, filter)| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if !wants(&event, user_id, filter.as_deref()) {
                        continue;
                    }

                    let event_data = match serde_json::to_string(&event) {
                        Ok(data) => data,
                        Err(e) => {
                            tracing::error!("[Realtime] Failed to serialize event: {:?}", e);
                            continue;
                        }
                    };

                    let sse_event = Event::default()
                        .event(event.event_type.as_str())
                        .data(event_data);
                    return Some((Ok(sse_event), (rx, filter)));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(user_id = %user_id, "[Realtime] Receiver lagged, skipped {} events", skipped);
                    continue;
                }
                Err(RecvError::Closed) => {
                    tracing::debug!("[Realtime] Broadcast channel closed, ending stream");
                    return None;
                }
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
