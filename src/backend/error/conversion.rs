/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse`, so handlers return
 * `Result<_, BackendError>` and the error is turned into a JSON body here.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Collaboration request already exists",
 *   "code": "duplicate_request",
 *   "status": 400
 * }
 * ```
 *
 * Validation errors additionally carry `"field"`.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::debug!(code = self.code(), status = status.as_u16(), "request refused: {}", self);
        }

        let mut body = serde_json::json!({
            "error": self.message(),
            "code": self.code(),
            "status": status.as_u16(),
        });
        if let Some(field) = self.field() {
            body["field"] = serde_json::Value::String(field.to_string());
        }

        (status, Json(body)).into_response()
    }
}
