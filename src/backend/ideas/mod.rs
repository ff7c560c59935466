//! Ideas Module
//!
//! Idea create/get/delete plus the engagement actions (likes, comments)
//! that notify the owner.

pub mod service;
pub mod handlers;

pub use service::{add_comment, create_idea, delete_idea, get_idea, toggle_like};
