//! Notifications Module
//!
//! # Architecture
//!
//! - **`dispatcher`** - Composes notification records (with self-suppression)
//!   and pushes committed ones to realtime subscribers
//! - **`service`** - Listing with rendered references, read-marking
//! - **`handlers`** - HTTP handlers
//!
//! Notifications are append-only. The only mutation is `is_read`, set by
//! the recipient; there is no way to mark one unread again.

/// Notification composition and fan-out
pub mod dispatcher;

/// Listing and read-marking
pub mod service;

/// HTTP handlers
pub mod handlers;

pub use service::{list_notifications, mark_notification_read};
