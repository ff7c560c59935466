//! Shared Module
//!
//! This module contains the types that cross the HTTP boundary: entity
//! records, request/response bodies, realtime events, configuration and
//! the validation errors raised while decoding client input.
//!
//! # Overview
//!
//! Nothing in here touches the database or the network. Backend services
//! build these values and handlers serialize them straight to JSON, so the
//! serde attributes on these types *are* the wire format.

/// Ideas, collaborations, notifications and group messages
pub mod social;

/// Real-time event system
pub mod event;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use event::{RealtimeEvent, EventType};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
