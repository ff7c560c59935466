//! Shared Error Types
//!
//! This module defines the errors raised while validating or decoding data
//! that arrives from clients, before any backend state is touched.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - A field failed validation
//! - `UnknownValue` - A string did not name a known enum value
//!
//! # Usage
//!
//! ```rust
//! use ideadrop::shared::error::SharedError;
//!
//! let error = SharedError::validation("content", "Message content cannot be empty");
//! ```
use thiserror::Error;

/// Errors raised by shared types while validating client input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A string that should name an enum variant did not
    #[error("Unknown {kind} '{value}'")]
    UnknownValue {
        /// What was being parsed (e.g. "visibility")
        kind: &'static str,
        /// The offending input
        value: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new unknown-value error
    pub fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownValue {
            kind,
            value: value.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

/// Reject empty or whitespace-only text, and text longer than `max_chars`
pub fn require_text(field: &str, value: &str, max_chars: usize) -> Result<(), SharedError> {
    if value.trim().is_empty() {
        return Err(SharedError::validation(field, "This field may not be blank."));
    }
    if value.chars().count() > max_chars {
        return Err(SharedError::validation(
            field,
            format!("Ensure this field has no more than {} characters.", max_chars),
        ));
    }
    Ok(())
}
