//! Membership Module
//!
//! Derived group membership of an idea: listing, removal by the owner and
//! leaving by a member.

/// Membership queries and removal
pub mod service;

/// HTTP handlers
pub mod handlers;

pub use service::{get_members, leave_group, member_ids, members_of, remove_member};
