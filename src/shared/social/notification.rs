//! Notification Data Structure
//!
//! Notifications are append-only. The only field that ever changes after
//! creation is `is_read`, and only the recipient may change it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{IdeaSummary, UserSummary};

/// What triggered a notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    CollabRequest,
    CollabApproved,
    CollabRejected,
    Like,
    Comment,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::CollabRequest => "collab_request",
            NotificationType::CollabApproved => "collab_approved",
            NotificationType::CollabRejected => "collab_rejected",
            NotificationType::Like => "like",
            NotificationType::Comment => "comment",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "collab_request" => Some(NotificationType::CollabRequest),
            "collab_approved" => Some(NotificationType::CollabApproved),
            "collab_rejected" => Some(NotificationType::CollabRejected),
            "like" => Some(NotificationType::Like),
            "comment" => Some(NotificationType::Comment),
            _ => None,
        }
    }

    /// Check if this notification belongs to the collaboration lifecycle
    pub fn is_collaboration(&self) -> bool {
        matches!(
            self,
            NotificationType::CollabRequest
                | NotificationType::CollabApproved
                | NotificationType::CollabRejected
        )
    }
}

/// A stored notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    /// Who receives it
    pub recipient_id: Uuid,
    /// Who triggered it
    pub sender_id: Option<Uuid>,
    pub idea_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// A notification as rendered to its recipient
///
/// `collab_id` is resolved at render time from the pending collaboration
/// matching (idea, sender). It is only useful while the request is open,
/// so it is `None` once the request has been resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationView {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub sender: Option<UserSummary>,
    pub idea: Option<IdeaSummary>,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub collab_id: Option<Uuid>,
}
