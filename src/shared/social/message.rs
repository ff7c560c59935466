//! Group Message Data Structure
//!
//! Messages belong to an idea's group chat. Only members (owner or accepted
//! collaborators) may read or post them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserSummary;
use crate::shared::error::{require_text, SharedError};

/// Longest message body accepted
pub const MAX_MESSAGE_CHARS: usize = 5_000;

/// A stored group message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupMessage {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl GroupMessage {
    pub fn new(idea_id: Uuid, sender_id: Uuid, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            idea_id,
            sender_id,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// A group message with its sender resolved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupMessageView {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub sender: UserSummary,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for posting to a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendGroupMessageRequest {
    #[serde(default)]
    pub content: String,
}

impl SendGroupMessageRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_text("content", &self.content, MAX_MESSAGE_CHARS)
    }
}
