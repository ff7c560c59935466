//! IdeaDrop - Main Library
//!
//! IdeaDrop is the backend of an idea-sharing platform. Users post ideas,
//! ask to collaborate on other people's ideas, and idea owners approve or
//! reject those requests. Approved collaborators join the idea's group,
//! where they can read and post group messages. Every lifecycle event fans
//! out a notification to the affected user, persisted and pushed live.
//!
//! # Module Structure
//!
//! - **`shared`** - Entity records, request/response bodies, realtime
//!   events, configuration and validation errors
//!
//! - **`backend`** - Axum HTTP server
//!   - Collaboration state machine and membership
//!   - Group messaging, ideas, likes and comments
//!   - Notification fan-out and SSE realtime push
//!   - PostgreSQL or in-memory persistence
//!
//! # Usage
//!
//! ```rust,no_run
//! use ideadrop::backend::server::init::create_app;
//! use ideadrop::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let addr = config.listen_addr();
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind(addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for input validation
//! - `backend::BackendError` for request failures, rendered as
//!   `{"error", "code", "status"}` JSON
//! - `backend::store::StoreError` for persistence failures

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
