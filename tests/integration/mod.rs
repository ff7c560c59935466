//! Integration tests
//!
//! Every test builds its own in-memory app; the Postgres tests run only
//! when `TEST_DATABASE_URL` is set.

pub mod api;
