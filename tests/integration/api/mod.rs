//! API integration tests
//!
//! Integration tests for all API endpoints

mod auth_test;
mod collab_test;
mod groups_test;
mod ideas_test;
mod notifications_test;
