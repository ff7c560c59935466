/**
 * Backend Error Types
 *
 * This module defines the request-level error taxonomy. Every operation in
 * the backend returns `Result<_, BackendError>`; the request boundary turns
 * the error into a JSON response with a stable `code`.
 *
 * # Error Categories
 *
 * ## Client errors
 *
 * - `Validation` - Malformed or missing input (400)
 * - `InvalidAction` - Unknown resolve action (400)
 * - `DuplicateRequest` - Conflicting state transition (400)
 * - `SelfAction` - Actor acting on their own resource where disallowed (400)
 * - `Unauthenticated` - No valid bearer token (401)
 * - `Authorization` - Actor lacks permission (403)
 * - `NotFound` - Entity or relation absent (404)
 *
 * ## Server errors
 *
 * - `Store` - Persistence failure (500)
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use ideadrop::backend::error::BackendError;
///
/// let err = BackendError::not_found("Idea not found");
/// assert_eq!(err.code(), "not_found");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Malformed or missing input
    #[error("Validation error in field '{field}': {message}")]
    Validation {
        /// The offending field, or a comma-joined list for missing params
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// The actor may not perform this operation
    #[error("{message}")]
    Authorization { message: String },

    /// The entity or relation does not exist (or is hidden from the actor)
    #[error("{message}")]
    NotFound { message: String },

    /// The requested transition conflicts with the current state
    #[error("{message}")]
    DuplicateRequest { message: String },

    /// The actor tried to act on their own resource where that is disallowed
    #[error("{message}")]
    SelfAction { message: String },

    /// A resolve action other than `approve`/`reject`
    #[error("Invalid action")]
    InvalidAction {
        /// The action as received, if any
        action: Option<String>,
    },

    /// Missing or invalid credentials
    #[error("Authentication credentials were not provided or are invalid")]
    Unauthenticated,

    /// Persistence failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Shared error (from client input decoding)
    #[error(transparent)]
    Shared(#[from] SharedError),
}

impl BackendError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Authorization {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::DuplicateRequest {
            message: message.into(),
        }
    }

    pub fn self_action(message: impl Into<String>) -> Self {
        Self::SelfAction {
            message: message.into(),
        }
    }

    pub fn invalid_action(action: Option<&str>) -> Self {
        Self::InvalidAction {
            action: action.map(str::to_string),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation`, `InvalidAction`, `DuplicateRequest`, `SelfAction`, `Shared` - 400
    /// - `Unauthenticated` - 401
    /// - `Authorization` - 403
    /// - `NotFound` - 404
    /// - `Store` - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. }
            | Self::InvalidAction { .. }
            | Self::DuplicateRequest { .. }
            | Self::SelfAction { .. } => StatusCode::BAD_REQUEST,
            Self::Shared(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } | SharedError::UnknownValue { .. } => {
                    StatusCode::BAD_REQUEST
                }
            },
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Authorization { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::Shared(SharedError::SerializationError { .. }) => "serialization_error",
            Self::Shared(_) => "validation_error",
            Self::Authorization { .. } => "authorization_error",
            Self::NotFound { .. } => "not_found",
            Self::DuplicateRequest { .. } => "duplicate_request",
            Self::SelfAction { .. } => "self_action",
            Self::InvalidAction { .. } => "invalid_action",
            Self::Unauthenticated => "not_authenticated",
            Self::Store(_) => "store_error",
        }
    }

    /// Get the error message
    ///
    /// Server-side failures are not described to clients.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::Store(_) => "Internal server error".to_string(),
            Self::Shared(SharedError::SerializationError { .. }) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }

    /// The field a validation error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            Self::Shared(SharedError::ValidationError { field, .. }) => Some(field),
            _ => None,
        }
    }
}
