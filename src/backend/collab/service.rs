/**
 * Collaboration Operations
 *
 * Request, resolve and list collaborations. Each operation reads the
 * current row, asks the state machine what to do, and hands the resulting
 * `CollabChange` (row write plus notification) to the store as one atomic
 * unit. Only after the commit is the notification pushed to realtime
 * subscribers.
 *
 * The authenticated actor is always an explicit parameter.
 */

use uuid::Uuid;

use crate::backend::access::{can_modify_idea, load_idea};
use crate::backend::collab::machine::{step, Audience, CollabAction, Refusal, Transition};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::notifications::dispatcher;
use crate::backend::realtime::broadcast::RealtimeEventBroadcast;
use crate::backend::store::{Store, StoreError};
use crate::shared::social::{
    ActionResponse, Collaboration, CollaborationDetail, Idea, ResolveAction, User,
};

const NOT_OWNER_OR_MISSING: &str = "Collaboration not found or you are not the owner";
const ALREADY_REQUESTED: &str = "Collaboration request already exists";

/// Ask to collaborate on someone else's idea
///
/// Creates a pending row, or moves a rejected one back to pending, and
/// notifies the owner.
pub async fn request_collaboration(
    store: &dyn Store,
    events: &RealtimeEventBroadcast,
    actor: &User,
    idea_id: Uuid,
) -> BackendResult<ActionResponse> {
    let idea = load_idea(store, idea_id).await?;
    if idea.is_owned_by(actor.id) {
        return Err(BackendError::self_action("Cannot request collaboration on your own idea"));
    }

    let existing = store.find_collaboration(idea.id, actor.id).await?;
    let current = existing.as_ref().map(|c| c.status);
    let step = step(current, CollabAction::Request).map_err(|refusal| {
        tracing::debug!(idea_id = %idea.id, actor = %actor.id, ?current, "collaboration request refused");
        match refusal {
            Refusal::Duplicate => BackendError::duplicate(ALREADY_REQUESTED),
            Refusal::NotFound => BackendError::not_found("Idea not found"),
        }
    })?;

    let notification = step
        .notify
        .and_then(|(_, kind)| dispatcher::about_idea(kind, idea.owner_id, actor, &idea));

    if let Some(change) = step.into_change(existing.as_ref(), idea.id, actor.id, notification) {
        let pushed = change.notification().cloned();
        store.apply(change).await.map_err(|e| match e {
            StoreError::Conflict(detail) => {
                tracing::warn!(idea_id = %idea.id, actor = %actor.id, "lost collaboration request race: {}", detail);
                BackendError::duplicate(ALREADY_REQUESTED)
            }
            other => other.into(),
        })?;
        dispatcher::publish(events, pushed.as_ref());
    }

    tracing::info!(idea_id = %idea.id, collaborator = %actor.id, "collaboration requested");
    Ok(ActionResponse::new("Collaboration request sent"))
}

/// Approve or reject a collaboration on one of the actor's ideas
///
/// `action` is the raw value from the request body; anything other than
/// `approve` or `reject` is refused. A collaboration the actor does not
/// own is reported as not found.
pub async fn resolve_collaboration(
    store: &dyn Store,
    events: &RealtimeEventBroadcast,
    actor: &User,
    collab_id: Uuid,
    action: Option<&str>,
) -> BackendResult<ActionResponse> {
    let (collaboration, idea) = owned_collaboration(store, actor, collab_id).await?;

    let resolve = action
        .and_then(ResolveAction::from_str)
        .ok_or_else(|| BackendError::invalid_action(action))?;

    let step = step(Some(collaboration.status), resolve.into())
        .map_err(|_| BackendError::not_found(NOT_OWNER_OR_MISSING))?;

    let notification = step.notify.and_then(|(audience, kind)| {
        let recipient = match audience {
            Audience::Owner => idea.owner_id,
            Audience::Collaborator => collaboration.collaborator_id,
        };
        dispatcher::about_idea(kind, recipient, actor, &idea)
    });

    match step.into_change(
        Some(&collaboration),
        idea.id,
        collaboration.collaborator_id,
        notification,
    ) {
        Some(change) => {
            let pushed = change.notification().cloned();
            store.apply(change).await.map_err(|e| match e {
                StoreError::Conflict(detail) => {
                    tracing::warn!(collab_id = %collab_id, "lost collaboration resolve race: {}", detail);
                    BackendError::duplicate("Collaboration was changed by another request")
                }
                other => other.into(),
            })?;
            dispatcher::publish(events, pushed.as_ref());
            if let Transition::Set { from, to } = step.transition {
                tracing::info!(collab_id = %collab_id, %from, %to, "collaboration resolved");
            }
        }
        None => {
            tracing::debug!(collab_id = %collab_id, status = %collaboration.status, "collaboration already resolved this way");
        }
    }

    Ok(ActionResponse::new(match resolve {
        ResolveAction::Approve => "Collaboration approved",
        ResolveAction::Reject => "Collaboration rejected",
    }))
}

/// The collaboration and its idea, if the actor owns the idea
async fn owned_collaboration(
    store: &dyn Store,
    actor: &User,
    collab_id: Uuid,
) -> BackendResult<(Collaboration, Idea)> {
    let not_found = || BackendError::not_found(NOT_OWNER_OR_MISSING);

    let collaboration = store.get_collaboration(collab_id).await?.ok_or_else(not_found)?;
    let idea = store.get_idea(collaboration.idea_id).await?.ok_or_else(not_found)?;
    if !can_modify_idea(&idea, actor.id) {
        tracing::debug!(collab_id = %collab_id, actor = %actor.id, "resolve by non-owner");
        return Err(not_found());
    }
    Ok((collaboration, idea))
}

/// Accepted collaborations on every idea the actor owns or has asked to join
pub async fn list_accepted_collaborations(
    store: &dyn Store,
    actor: &User,
) -> BackendResult<Vec<CollaborationDetail>> {
    let rows = store.list_accepted_collaborations_for(actor.id).await?;
    let mut details = Vec::with_capacity(rows.len());

    for row in rows {
        let Some(idea) = store.get_idea(row.idea_id).await? else {
            continue;
        };
        let Some(collaborator) = store.get_user(row.collaborator_id).await? else {
            continue;
        };
        details.push(CollaborationDetail {
            id: row.id,
            idea,
            collaborator: collaborator.summary(),
            status: row.status,
        });
    }

    Ok(details)
}
