//! Real-time Update Module
//!
//! Pushes committed notifications and group messages to connected clients
//! over Server-Sent Events.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── broadcast.rs    - Broadcast channel and publish helpers
//! └── subscription.rs - SSE subscription handler
//! ```
//!
//! # Addressing
//!
//! There is one process-wide broadcast channel. Every event names its
//! recipients and each subscription forwards only the events addressed to
//! its authenticated user, so a user never sees another user's
//! notifications.
//!
//! # Dependencies
//!
//! - `shared::RealtimeEvent` - Event data structure
//! - `shared::EventType` - Event type enumeration

/// Event broadcasting utilities
pub mod broadcast;

/// Server-Sent Events subscription handler
pub mod subscription;

// Re-export commonly used types and functions
pub use broadcast::{broadcast_event, publish_group_message, publish_notification, RealtimeEventBroadcast};
pub use subscription::handle_realtime_subscription;
