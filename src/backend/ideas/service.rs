//! Ideas, likes and comments
//!
//! Thin operations around the collaboration core. Likes and comments fan
//! out a notification to the idea owner unless the owner is the actor.

use uuid::Uuid;

use crate::backend::access::{can_access_group, can_modify_idea, load_idea, load_idea_or};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::notifications::dispatcher;
use crate::backend::realtime::broadcast::RealtimeEventBroadcast;
use crate::backend::store::Store;
use crate::shared::social::{
    Comment, CreateCommentRequest, CreateIdeaRequest, Idea, Like, LikeResponse, NotificationType,
    UpdateIdeaRequest, User, Visibility,
};

/// Create an idea owned by the actor
pub async fn create_idea(store: &dyn Store, actor: &User, request: CreateIdeaRequest) -> BackendResult<Idea> {
    let idea = request.into_idea(actor.id)?;
    store.insert_idea(&idea).await?;
    tracing::info!(idea_id = %idea.id, owner = %actor.id, visibility = idea.visibility.as_str(), "idea created");
    Ok(idea)
}

/// Fetch an idea as the actor may see it
///
/// Private ideas are visible to group members only; to anyone else they do
/// not exist. Partial ideas show their summary to everyone and the full
/// description to members.
pub async fn get_idea(store: &dyn Store, actor: &User, idea_id: Uuid) -> BackendResult<Idea> {
    let mut idea = load_idea(store, idea_id).await?;
    match idea.visibility {
        Visibility::Public => {}
        Visibility::Private => {
            if !can_access_group(store, &idea, actor.id).await? {
                return Err(BackendError::not_found("Idea not found"));
            }
        }
        Visibility::Partial => {
            if !can_access_group(store, &idea, actor.id).await? {
                idea.description.clear();
            }
        }
    }
    Ok(idea)
}

const NOT_OWNED: &str = "Idea not found or you don't have permission";

/// One of the actor's ideas; anyone else's is reported as not found
async fn owned_idea(store: &dyn Store, actor: &User, idea_id: Uuid) -> BackendResult<Idea> {
    let idea = load_idea_or(store, idea_id, NOT_OWNED).await?;
    if !can_modify_idea(&idea, actor.id) {
        tracing::debug!(idea_id = %idea.id, actor = %actor.id, "idea change by non-owner");
        return Err(BackendError::not_found(NOT_OWNED));
    }
    Ok(idea)
}

/// Edit one of the actor's ideas
pub async fn update_idea(
    store: &dyn Store,
    actor: &User,
    idea_id: Uuid,
    request: UpdateIdeaRequest,
) -> BackendResult<Idea> {
    let mut idea = owned_idea(store, actor, idea_id).await?;
    request.apply_to(&mut idea)?;
    if !store.update_idea(&idea).await? {
        return Err(BackendError::not_found(NOT_OWNED));
    }
    tracing::info!(idea_id = %idea.id, visibility = idea.visibility.as_str(), "idea updated");
    Ok(idea)
}

/// Delete one of the actor's ideas and everything attached to it
pub async fn delete_idea(store: &dyn Store, actor: &User, idea_id: Uuid) -> BackendResult<()> {
    let idea = owned_idea(store, actor, idea_id).await?;
    if !store.delete_idea(idea.id).await? {
        return Err(BackendError::not_found(NOT_OWNED));
    }
    tracing::info!(idea_id = %idea.id, "idea deleted");
    Ok(())
}

/// Like the idea, or unlike it if the actor already does
pub async fn toggle_like(
    store: &dyn Store,
    events: &RealtimeEventBroadcast,
    actor: &User,
    idea_id: Uuid,
) -> BackendResult<LikeResponse> {
    let idea = load_idea(store, idea_id).await?;
    let notification = dispatcher::about_idea(NotificationType::Like, idea.owner_id, actor, &idea);

    let outcome = store
        .toggle_like(&Like::new(actor.id, idea.id), notification.as_ref())
        .await?;
    if outcome.created {
        dispatcher::publish(events, notification.as_ref());
    }

    tracing::debug!(idea_id = %idea.id, user = %actor.id, liked = outcome.liked, "like toggled");
    Ok(LikeResponse {
        message: if outcome.liked { "Idea liked" } else { "Idea unliked" }.to_string(),
        like_count: outcome.like_count,
        is_liked: outcome.liked,
    })
}

/// Comment on an idea
pub async fn add_comment(
    store: &dyn Store,
    events: &RealtimeEventBroadcast,
    actor: &User,
    idea_id: Uuid,
    request: &CreateCommentRequest,
) -> BackendResult<Comment> {
    let idea = load_idea(store, idea_id).await?;
    request.validate()?;

    let comment = Comment::new(idea.id, actor.id, request.content.trim());
    let notification = dispatcher::about_idea(NotificationType::Comment, idea.owner_id, actor, &idea);
    store.insert_comment(&comment, notification.as_ref()).await?;
    dispatcher::publish(events, notification.as_ref());

    tracing::info!(idea_id = %idea.id, comment_id = %comment.id, "comment added");
    Ok(comment)
}
