//! Collaboration Module
//!
//! The lifecycle of a user's request to collaborate on someone else's idea.
//!
//! # Architecture
//!
//! - **`machine`** - The transition table: (current status, action) to
//!   (row effect, notification)
//! - **`service`** - Request / resolve / list operations over a `Store`
//! - **`handlers`** - Axum handlers for the collaboration routes
//!
//! # Lifecycle
//!
//! ```text
//!            request              approve
//!   (none) ----------> pending ------------> accepted ---- remove/leave ---> (none)
//!                       |  ^                   |
//!                reject |  | request           | reject
//!                       v  |                   v
//!                      rejected <--------------+
//! ```
//!
//! `rejected` rows are reused on re-request; there is never more than one
//! row per (idea, collaborator).

/// Transition table
pub mod machine;

/// Collaboration operations
pub mod service;

/// HTTP handlers
pub mod handlers;

pub use machine::{step, CollabAction, Step, Transition};
pub use service::{list_accepted_collaborations, request_collaboration, resolve_collaboration};
