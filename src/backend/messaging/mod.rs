//! Messaging Module
//!
//! Group chat of an idea, open to its members only. New messages are
//! pushed to every member over the realtime stream.

pub mod service;
pub mod handlers;

pub use service::{list_messages, send_message};
