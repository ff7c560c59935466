/**
 * Body and Path Extractors
 *
 * Thin wrappers over axum's `Json` and `Path` whose rejections are
 * `BackendError::Validation`, so a malformed body or path parameter gets
 * the usual JSON error body with status 400 instead of axum's plain-text
 * 400/415/422.
 *
 * `Option<ApiJson<T>>` keeps axum's optional-body semantics: no
 * `Content-Type` means `None`, a body that does not decode is still an
 * error.
 */

use axum::{
    extract::{
        path::ErrorKind,
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, OptionalFromRequest, Path, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::backend::error::BackendError;

/// JSON request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

/// Path parameters
#[derive(Debug, Clone, Copy)]
pub struct ApiPath<T>(pub T);

fn body_error(rejection: JsonRejection) -> BackendError {
    tracing::debug!(status = %rejection.status(), "request body rejected: {}", rejection.body_text());
    BackendError::validation("body", format!("Invalid request body: {}", rejection.body_text()))
}

fn path_error(rejection: PathRejection) -> BackendError {
    tracing::debug!("path rejected: {}", rejection.body_text());
    let key = match &rejection {
        PathRejection::FailedToDeserializePathParams(err) => match err.kind() {
            ErrorKind::ParseErrorAtKey { key, .. }
            | ErrorKind::DeserializeError { key, .. }
            | ErrorKind::InvalidUtf8InPathParam { key } => Some(key.clone()),
            _ => None,
        },
        _ => None,
    };
    match key {
        Some(key) => BackendError::validation(key.clone(), format!("Invalid {}", key)),
        None => BackendError::validation("path", "Invalid path parameter"),
    }
}

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = <Json<T> as FromRequest<S>>::from_request(req, state)
            .await
            .map_err(body_error)?;
        Ok(ApiJson(value))
    }
}

impl<T, S> OptionalFromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let body = <Json<T> as OptionalFromRequest<S>>::from_request(req, state)
            .await
            .map_err(body_error)?;
        Ok(body.map(|Json(value)| ApiJson(value)))
    }
}

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(path_error)?;
        Ok(ApiPath(value))
    }
}
