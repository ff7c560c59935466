/**
 * Authentication Extractor
 *
 * Every API route takes an `AuthUser` argument. Extraction:
 * 1. Reads the `Authorization: Bearer <token>` header
 * 2. Verifies the token against the configured secret
 * 3. Loads the `User` row, writing it only when it is missing or the
 *    token carries a new username, so the rest of the backend can render
 *    usernames without a separate registration step
 *
 * The resulting `User` is the actor handed explicitly to every service
 * call. A missing or invalid token rejects the request with 401.
 */

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::auth::sessions::verify_token;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::social::User;

/// Authenticated actor of the current request
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

/// Pull the raw token out of an `Authorization` header value
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            tracing::debug!("Missing or malformed Authorization header");
            BackendError::Unauthenticated
        })?;

        let claims = verify_token(&state.config.jwt_secret, token).map_err(|e| {
            tracing::warn!("Invalid token: {:?}", e);
            BackendError::Unauthenticated
        })?;

        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!("Invalid user ID in token: {:?}", e);
            BackendError::Unauthenticated
        })?;

        let user = match state.store.get_user(user_id).await? {
            Some(user) if user.username == claims.username => user,
            _ => state.store.upsert_user(&User::new(user_id, claims.username)).await?,
        };
        Ok(AuthUser(user))
    }
}
