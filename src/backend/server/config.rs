/**
 * Store Selection
 *
 * Picks the entity store for this process from the loaded configuration.
 *
 * # Selection
 *
 * - `database_url` set: `PgStore`, with migrations applied
 * - Otherwise: `MemoryStore`
 *
 * # Error Handling
 *
 * A configured database that cannot be reached or migrated is a startup
 * error. The in-memory store is only used when no database is configured.
 */

use std::sync::Arc;

use crate::backend::store::{MemoryStore, PgStore, Store, StoreResult};
use crate::shared::AppConfig;

/// Load the entity store for `config`
///
/// # Example
///
/// ```rust,no_run
/// use ideadrop::backend::server::config::load_store;
/// use ideadrop::shared::AppConfig;
///
/// # async fn example() -> Result<(), ideadrop::backend::store::StoreError> {
/// let store = load_store(&AppConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn load_store(config: &AppConfig) -> StoreResult<Arc<dyn Store>> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Using the in-memory store; data will not survive a restart.");
        return Ok(Arc::new(MemoryStore::new()));
    };

    tracing::info!("Connecting to database...");

    match connect_and_migrate(database_url).await {
        Ok(store) => {
            tracing::info!("Database connection established and migrations applied");
            Ok(Arc::new(store))
        }
        Err(e) => {
            tracing::error!("Failed to initialize database store: {:?}", e);
            Err(e)
        }
    }
}

async fn connect_and_migrate(database_url: &str) -> StoreResult<PgStore> {
    let store = PgStore::connect(database_url).await?;
    store.migrate().await?;
    Ok(store)
}
