/**
 * Router Configuration
 *
 * Combines all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Health check (`GET /health`, unauthenticated)
 * 2. API routes (authenticated)
 * 3. Fallback handler (JSON 404)
 *
 * The whole router is wrapped in a `tower-http` `TraceLayer`, so every
 * request gets a span with its method and path.
 */

use axum::{routing::get, Json, Router};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn not_found() -> BackendError {
    BackendError::not_found("Not found")
}

pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", get(health));

    let router = configure_api_routes(router);

    router
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
