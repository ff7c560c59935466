/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including store selection, state creation, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Select the entity store (Postgres or in-memory)
 * 2. Create the application state and realtime broadcast channel
 * 3. Create and configure the router
 *
 * Nothing is restored into memory at startup: every request reads what it
 * needs from the store.
 */

use axum::Router;
use std::sync::Arc;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_store;
use crate::backend::server::state::AppState;
use crate::backend::store::{Store, StoreResult};
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// # Error Handling
///
/// - Missing database: in-memory store
/// - Connection or migration failure: returned, so startup aborts
pub async fn create_app(config: AppConfig) -> StoreResult<Router<()>> {
    tracing::info!("Initializing IdeaDrop backend server");

    // Step 1: Select the store
    let store = load_store(&config).await?;

    // Step 2 and 3
    Ok(create_app_with(store, config))
}

/// Create the application around an already-built store
///
/// Used by `create_app` and by tests that want to inspect the store
/// behind the router.
pub fn create_app_with(store: Arc<dyn Store>, config: AppConfig) -> Router<()> {
    // Step 2: Create app state; this also opens the realtime channel
    let capacity = config.realtime_capacity;
    let app_state = AppState::new(store, config);
    tracing::info!(capacity, "Realtime broadcast channel initialized");

    // Step 3: Create router with all routes
    let app = create_router(app_state);
    tracing::info!("Router configured");

    app
}
