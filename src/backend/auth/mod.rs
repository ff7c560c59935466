//! Authentication Module
//!
//! Accounts live in the platform's account service. This backend trusts
//! any HS256 bearer token signed with the configured `jwt_secret` and
//! mirrors the token's user into the store on first sight.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! └── sessions.rs     - JWT token creation and verification
//! ```
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `middleware::AuthUser` verifies the token with `sessions::verify_token`
//! 3. The user named by the claims is upserted and handed to the handler
//!
//! Missing, malformed and expired tokens all produce 401.

/// JWT token generation and validation
pub mod sessions;

pub use sessions::{create_token, verify_token, Claims};
