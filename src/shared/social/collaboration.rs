//! Collaboration Data Structure
//!
//! Represents a user's request to collaborate on someone else's idea. There
//! is at most one row per (idea, collaborator); its status is mutated in
//! place instead of inserting new rows on re-request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{Idea, UserSummary};

/// Status of a collaboration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollaborationStatus {
    /// Waiting on the idea owner
    #[default]
    Pending,
    /// Collaborator is a group member
    Accepted,
    /// Owner declined; the collaborator may ask again
    Rejected,
}

impl CollaborationStatus {
    pub const ALL: [CollaborationStatus; 3] = [
        CollaborationStatus::Pending,
        CollaborationStatus::Accepted,
        CollaborationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollaborationStatus::Pending => "pending",
            CollaborationStatus::Accepted => "accepted",
            CollaborationStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(CollaborationStatus::Pending),
            "accepted" => Some(CollaborationStatus::Accepted),
            "rejected" => Some(CollaborationStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for CollaborationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collaboration between an idea and a prospective collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Collaboration {
    /// Unique collaboration ID
    pub id: Uuid,
    /// The idea being collaborated on
    pub idea_id: Uuid,
    /// The user asking to collaborate
    pub collaborator_id: Uuid,
    /// Current status
    #[serde(default)]
    pub status: CollaborationStatus,
    /// When the row was first created
    pub created_at: DateTime<Utc>,
    /// When the status last changed
    pub updated_at: DateTime<Utc>,
}

impl Collaboration {
    /// Create a fresh pending collaboration
    pub fn pending(idea_id: Uuid, collaborator_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            idea_id,
            collaborator_id,
            status: CollaborationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the collaborator is a group member
    pub fn is_accepted(&self) -> bool {
        self.status == CollaborationStatus::Accepted
    }

    /// Check if the request is still waiting on the owner
    pub fn is_pending(&self) -> bool {
        self.status == CollaborationStatus::Pending
    }
}

/// Owner decision on a collaboration request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResolveAction {
    Approve,
    Reject,
}

impl ResolveAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolveAction::Approve => "approve",
            ResolveAction::Reject => "reject",
        }
    }

    /// Parse the raw `action` value; matching is exact, like the public API documents
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "approve" => Some(ResolveAction::Approve),
            "reject" => Some(ResolveAction::Reject),
            _ => None,
        }
    }
}

/// Request body for resolving a collaboration
///
/// `action` is kept as a raw string so an unknown value reaches the handler
/// and is reported as an invalid action rather than a decoding failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolveCollaborationRequest {
    #[serde(default)]
    pub action: Option<String>,
}

/// An accepted collaboration joined with its idea and collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollaborationDetail {
    pub id: Uuid,
    pub idea: Idea,
    pub collaborator: UserSummary,
    pub status: CollaborationStatus,
}
