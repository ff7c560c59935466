//! Middleware Module
//!
//! Request-level plumbing that runs before handlers.
//!
//! - **`auth`** - `AuthUser` extractor: bearer token verification and
//!   actor resolution
//! - **`extract`** - `ApiJson` / `ApiPath`, whose rejections use the
//!   `BackendError` body

pub mod auth;
pub mod extract;

pub use auth::AuthUser;
pub use extract::{ApiJson, ApiPath};
