//! Backend Module
//!
//! This module contains all server-side code for IdeaDrop: the Axum HTTP
//! server, the collaboration lifecycle, group membership and messaging,
//! notification fan-out and the realtime push channel.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, store selection
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`store`** - Persistence seam (`Store` trait, Postgres and in-memory)
//! - **`collab`** - Collaboration state machine, service and handlers
//! - **`membership`** - Group members, removal and leaving
//! - **`messaging`** - Group message board
//! - **`ideas`** - Idea creation, visibility, likes and comments
//! - **`notifications`** - Notification composition, listing and read state
//! - **`realtime`** - Broadcast channel and SSE subscription
//! - **`auth`** - JWT token creation and verification
//! - **`middleware`** - `AuthUser` extractor
//! - **`access`** - Ownership and membership predicates
//! - **`error`** - Backend error taxonomy and HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── store/          - Persistence
//! ├── collab/         - Collaboration lifecycle
//! ├── membership/     - Group membership
//! ├── messaging/      - Group messages
//! ├── ideas/          - Ideas, likes, comments
//! ├── notifications/  - Notification fan-out
//! ├── realtime/       - Event broadcasting
//! ├── auth/           - Tokens
//! ├── middleware/     - Request extractors
//! ├── access.rs       - Access predicates
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! Handler (extract `AuthUser`, path, body) → service function (checks,
//! state transition, store write) → notifications pushed to realtime after
//! the write commits → JSON response or `BackendError`.
//!
//! # Example
//!
//! ```rust,no_run
//! use ideadrop::backend::create_app;
//! use ideadrop::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::default()).await?;
//! // Use app with axum::serve
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Entity persistence
pub mod store;

/// Collaboration lifecycle
pub mod collab;

/// Group membership
pub mod membership;

/// Group messages
pub mod messaging;

/// Ideas, likes and comments
pub mod ideas;

/// Notification fan-out
pub mod notifications;

/// Real-time update system
pub mod realtime;

/// Ownership and membership checks
pub mod access;

/// Backend error types
pub mod error;

/// Token handling
pub mod auth;

/// Request extractors
pub mod middleware;

/// Re-export commonly used types
pub use error::{BackendError, BackendResult};
pub use realtime::{broadcast_event, handle_realtime_subscription, RealtimeEventBroadcast};
pub use server::{create_app, create_app_with, AppState};
pub use store::{MemoryStore, PgStore, Store};
