//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, health check, fallback
//! └── api_routes.rs   - Authenticated API endpoints
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ideadrop::backend::routes::create_router;
//! use ideadrop::backend::server::state::AppState;
//! use ideadrop::backend::store::MemoryStore;
//! use ideadrop::shared::AppConfig;
//!
//! let state = AppState::new(Arc::new(MemoryStore::new()), AppConfig::default());
//! let app = create_router(state);
//! ```

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
