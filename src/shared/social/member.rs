//! Membership Data Structures
//!
//! Membership is never stored. It is derived from the idea owner plus every
//! accepted collaboration, and these types only carry the derived view.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One member of an idea's group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub id: Uuid,
    pub username: String,
    pub is_owner: bool,
}

/// Response for listing members; the owner is always first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MembersResponse {
    pub members: Vec<Member>,
}

/// Request body for removing a member
///
/// Both fields are optional on the wire so a missing one is reported as a
/// validation error naming it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoveMemberRequest {
    #[serde(default)]
    pub idea_id: Option<Uuid>,
    #[serde(default)]
    pub member_id: Option<Uuid>,
}

/// Request body for leaving a group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveGroupRequest {
    #[serde(default)]
    pub idea_id: Option<Uuid>,
}
