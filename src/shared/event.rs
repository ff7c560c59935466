/**
 * Real-time Event System
 *
 * This module defines the events pushed to connected clients over the
 * `/api/realtime` stream. Every event is addressed to an explicit set of
 * recipients; a subscriber only ever sees events addressed to it.
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::social::{GroupMessageView, Notification};

/// Type of real-time event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A notification was stored for the recipient
    Notification,
    /// A message was posted to a group the recipient belongs to
    GroupMessage,
}

impl EventType {
    /// SSE event name
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Notification => "notification",
            EventType::GroupMessage => "group_message",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "notification" => Some(EventType::Notification),
            "group_message" => Some(EventType::GroupMessage),
            _ => None,
        }
    }
}

/// Real-time event addressed to one or more users
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RealtimeEvent {
    /// Type of event
    pub event_type: EventType,
    /// Users this event is delivered to; never serialized to clients
    #[serde(default, skip_serializing)]
    pub recipients: Vec<Uuid>,
    /// Event payload (JSON-serializable data)
    pub payload: serde_json::Value,
    /// Timestamp when event occurred
    pub timestamp: String,
}

impl RealtimeEvent {
    /// Create a new real-time event
    pub fn new(event_type: EventType, recipients: Vec<Uuid>, payload: serde_json::Value) -> Self {
        Self {
            event_type,
            recipients,
            payload,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a notification event for the notification's recipient
    pub fn notification(notification: &Notification) -> Result<Self, SharedError> {
        let payload = serde_json::to_value(notification)?;
        Ok(Self::new(
            EventType::Notification,
            vec![notification.recipient_id],
            payload,
        ))
    }

    /// Create a group message event for the given members
    pub fn group_message(message: &GroupMessageView, members: Vec<Uuid>) -> Result<Self, SharedError> {
        let payload = serde_json::to_value(message)?;
        Ok(Self::new(EventType::GroupMessage, members, payload))
    }

    /// Check if `user_id` should receive this event
    pub fn is_for(&self, user_id: Uuid) -> bool {
        self.recipients.contains(&user_id)
    }
}
