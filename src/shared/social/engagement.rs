//! Likes and Comments
//!
//! Engagement records whose creation fans out a notification to the idea
//! owner. Comment listing/deletion lives with the external CRUD service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::{require_text, SharedError};

/// A like; unique per (user, idea)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub idea_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Like {
    pub fn new(user_id: Uuid, idea_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            idea_id,
            created_at: Utc::now(),
        }
    }
}

/// Response after toggling a like
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeResponse {
    pub message: String,
    pub like_count: i64,
    pub is_liked: bool,
}

/// A comment on an idea
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(idea_id: Uuid, user_id: Uuid, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            idea_id,
            user_id,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Request body for commenting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub content: String,
}

impl CreateCommentRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_text("content", &self.content, 5_000)
    }
}
