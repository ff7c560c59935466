//! Entity Store
//!
//! This module defines the persistence seam of the backend. Every service
//! talks to a `&dyn Store`; the server picks the implementation at startup.
//!
//! # Implementations
//!
//! - **`PgStore`** - PostgreSQL through sqlx, used when `DATABASE_URL` is set
//! - **`MemoryStore`** - In-process tables behind a `RwLock`, used otherwise
//!   and by the test suite
//!
//! # Atomicity
//!
//! Single-row writes are atomic in both implementations. A collaboration
//! state change and the notification it fans out are written together as
//! one [`CollabChange`]: Postgres wraps it in a transaction, the memory store
//! holds its write lock for the whole change. A crash can therefore never
//! leave a collaboration row without its notification.
//!
//! Concurrent writers racing on the same (idea, collaborator) pair are
//! serialized by the uniqueness constraint and by compare-and-set on the
//! previous status. The loser gets [`StoreError::Conflict`].

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::social::{
    Collaboration, CollaborationStatus, Comment, GroupMessage, Idea, Like, Notification, User,
};

/// In-memory implementation
pub mod memory;

/// PostgreSQL implementation
pub mod postgres;


pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint or compare-and-set check failed
    #[error("conflicting write: {0}")]
    Conflict(String),

    /// A stored value could not be decoded
    #[error("corrupt row: {0}")]
    Corrupt(String),

    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// One atomic collaboration write plus its notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollabChange {
    /// Insert a new row; conflicts if (idea, collaborator) already exists
    Create {
        collaboration: Collaboration,
        notification: Option<Notification>,
    },
    /// Move a row from `from` to `to`; conflicts if the row is gone or its
    /// status is no longer `from`
    Update {
        collaboration_id: Uuid,
        from: CollaborationStatus,
        to: CollaborationStatus,
        notification: Option<Notification>,
    },
    /// Delete a row whose status is `expected`; conflicts otherwise
    Remove {
        collaboration_id: Uuid,
        expected: CollaborationStatus,
    },
}

impl CollabChange {
    /// The notification written alongside this change, if any
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            CollabChange::Create { notification, .. } | CollabChange::Update { notification, .. } => {
                notification.as_ref()
            }
            CollabChange::Remove { .. } => None,
        }
    }
}

/// Result of toggling a like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggle {
    /// Whether the user likes the idea after the toggle
    pub liked: bool,
    /// Whether this call created the like (and its notification)
    pub created: bool,
    /// Likes on the idea after the toggle
    pub like_count: i64,
}

/// Persistence operations used by the backend services
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a user or refresh the username of an existing one
    async fn upsert_user(&self, user: &User) -> StoreResult<User>;

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    async fn insert_idea(&self, idea: &Idea) -> StoreResult<()>;

    async fn get_idea(&self, id: Uuid) -> StoreResult<Option<Idea>>;

    /// Overwrite an idea's editable fields; false if it does not exist
    async fn update_idea(&self, idea: &Idea) -> StoreResult<bool>;

    /// Delete an idea and everything hanging off it; false if it did not exist
    async fn delete_idea(&self, id: Uuid) -> StoreResult<bool>;

    async fn get_collaboration(&self, id: Uuid) -> StoreResult<Option<Collaboration>>;

    /// Look up the unique row for (idea, collaborator)
    async fn find_collaboration(
        &self,
        idea_id: Uuid,
        collaborator_id: Uuid,
    ) -> StoreResult<Option<Collaboration>>;

    /// Rows of one idea with the given status, oldest first
    async fn list_collaborations(
        &self,
        idea_id: Uuid,
        status: CollaborationStatus,
    ) -> StoreResult<Vec<Collaboration>>;

    /// Accepted rows on every idea `user_id` owns or has a collaboration row on,
    /// whatever that row's status
    async fn list_accepted_collaborations_for(&self, user_id: Uuid) -> StoreResult<Vec<Collaboration>>;

    /// Apply one collaboration change atomically
    async fn apply(&self, change: CollabChange) -> StoreResult<()>;

    async fn insert_notification(&self, notification: &Notification) -> StoreResult<()>;

    /// Notifications addressed to `recipient_id`, newest first
    async fn list_notifications(&self, recipient_id: Uuid) -> StoreResult<Vec<Notification>>;

    /// Set `is_read`; false if no such notification is addressed to `recipient_id`
    async fn mark_notification_read(&self, id: Uuid, recipient_id: Uuid) -> StoreResult<bool>;

    async fn insert_message(&self, message: &GroupMessage) -> StoreResult<()>;

    /// Messages of one idea, oldest first
    async fn list_messages(&self, idea_id: Uuid) -> StoreResult<Vec<GroupMessage>>;

    /// Like or unlike; `on_like` is written only when a like is created
    async fn toggle_like(&self, like: &Like, on_like: Option<&Notification>) -> StoreResult<LikeToggle>;

    /// Insert a comment and, atomically, its notification
    async fn insert_comment(&self, comment: &Comment, notification: Option<&Notification>) -> StoreResult<()>;
}
