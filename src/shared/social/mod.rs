//! Social Module
//!
//! This module contains all the data structures for the idea-sharing side
//! of the platform:
//!
//! - `User` / `UserSummary` - A platform account and its public projection
//! - `Idea` - A posted idea and its visibility
//! - `Collaboration` - A (idea, collaborator) request and its status
//! - `Notification` - An append-only event addressed to one user
//! - `GroupMessage` - A message in an idea's group chat
//! - `Member` - One row of an idea's derived membership
//! - `Like` / `Comment` - Engagement records that fan out notifications
//!
//! # Usage
//!
//! ```rust
//! use ideadrop::shared::social::{Collaboration, CollaborationStatus};
//! ```

pub mod user;
pub mod idea;
pub mod collaboration;
pub mod notification;
pub mod message;
pub mod member;
pub mod engagement;

use serde::{Deserialize, Serialize};

// Re-export all types
pub use user::{User, UserSummary};
pub use idea::{CreateIdeaRequest, Idea, IdeaSummary, UpdateIdeaRequest, Visibility};
pub use collaboration::{
    Collaboration, CollaborationDetail, CollaborationStatus, ResolveAction,
    ResolveCollaborationRequest,
};
pub use notification::{Notification, NotificationType, NotificationView};
pub use message::{GroupMessage, GroupMessageView, SendGroupMessageRequest};
pub use member::{LeaveGroupRequest, Member, MembersResponse, RemoveMemberRequest};
pub use engagement::{Comment, CreateCommentRequest, Like, LikeResponse};

/// Plain `{"message": ...}` body returned by state-changing endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionResponse {
    pub message: String,
}

impl ActionResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
