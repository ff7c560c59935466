/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the `FromRef` impl used by the realtime handler.
 *
 * # Architecture
 *
 * The `AppState` struct is the only state shared between requests:
 * - The entity store (`Arc<dyn Store>`), the sole shared mutable resource
 * - The realtime broadcast channel used to push notifications and messages
 * - The loaded configuration (JWT secret for the auth extractor)
 *
 * Handlers never keep per-request state in here; every operation reads
 * what it needs from the store and writes its outcome back through it.
 *
 * # Example
 *
 * ```rust
 * use ideadrop::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let _store = state.store.clone();
 * }
 * ```
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::realtime::broadcast::{self, RealtimeEventBroadcast};
use crate::backend::store::Store;
use crate::shared::AppConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Entity store; Postgres or in-memory, chosen at startup
    pub store: Arc<dyn Store>,

    /// Realtime event broadcast channel
    ///
    /// Every SSE subscriber holds a receiver and filters the events down
    /// to the ones addressed to its user.
    pub realtime_broadcast: RealtimeEventBroadcast,

    /// Loaded configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Self {
        Self {
            store,
            realtime_broadcast: broadcast::channel(config.realtime_capacity),
            config: Arc::new(config),
        }
    }
}

/// Lets the SSE handler take `State<RealtimeEventBroadcast>` directly
impl FromRef<AppState> for RealtimeEventBroadcast {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.realtime_broadcast.clone()
    }
}
