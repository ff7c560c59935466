//! Access Guard
//!
//! Authorization predicates over ideas and collaborations.
//!
//! - `can_access_group`: owner, or accepted collaborator. Gates message
//!   read/send and member listing.
//! - `can_modify_idea`: owner only. Gates member removal, collaboration
//!   resolution, idea edits and deletion.

use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::store::{Store, StoreResult};
use crate::shared::social::Idea;

pub fn can_modify_idea(idea: &Idea, user_id: Uuid) -> bool {
    idea.is_owned_by(user_id)
}

pub async fn can_access_group(store: &dyn Store, idea: &Idea, user_id: Uuid) -> StoreResult<bool> {
    if idea.is_owned_by(user_id) {
        return Ok(true);
    }
    Ok(store
        .find_collaboration(idea.id, user_id)
        .await?
        .is_some_and(|c| c.is_accepted()))
}

/// Fetch an idea or fail with 404
pub async fn load_idea(store: &dyn Store, idea_id: Uuid) -> BackendResult<Idea> {
    load_idea_or(store, idea_id, "Idea not found").await
}

/// Like [`load_idea`], with a caller-chosen 404 message
///
/// Store failures pass through untouched.
pub async fn load_idea_or(store: &dyn Store, idea_id: Uuid, not_found: &str) -> BackendResult<Idea> {
    store
        .get_idea(idea_id)
        .await?
        .ok_or_else(|| BackendError::not_found(not_found))
}

/// Fetch an idea whose group `user_id` may access; 404 if absent, 403 if not a member
pub async fn require_group_access(store: &dyn Store, idea_id: Uuid, user_id: Uuid) -> BackendResult<Idea> {
    let idea = load_idea(store, idea_id).await?;
    if !can_access_group(store, &idea, user_id).await? {
        tracing::debug!(idea_id = %idea.id, user_id = %user_id, "group access refused");
        return Err(BackendError::forbidden("Not authorized"));
    }
    Ok(idea)
}
