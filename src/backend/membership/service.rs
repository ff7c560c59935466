/**
 * Membership View
 *
 * Membership of an idea's group is derived on every call: the owner, then
 * each accepted collaborator in the order their rows were created. Nothing
 * here stores a member list.
 *
 * Removing a member (by the owner) and leaving (by the member) both delete
 * the accepted collaboration row. A later request starts a fresh pending
 * cycle. The owner has no collaboration row and so can never be removed.
 */

use uuid::Uuid;

use crate::backend::access::{can_modify_idea, load_idea_or, require_group_access};
use crate::backend::collab::machine::{step, CollabAction};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::store::{Store, StoreError};
use crate::shared::social::{
    ActionResponse, Collaboration, CollaborationStatus, Idea, LeaveGroupRequest, Member,
    MembersResponse, RemoveMemberRequest, User,
};

/// Owner first, then accepted collaborators; no access check
pub async fn members_of(store: &dyn Store, idea: &Idea) -> BackendResult<Vec<Member>> {
    let owner = store.get_user(idea.owner_id).await?;
    let mut members = vec![Member {
        id: idea.owner_id,
        username: owner.map(|u| u.username).unwrap_or_default(),
        is_owner: true,
    }];

    for collaboration in store
        .list_collaborations(idea.id, CollaborationStatus::Accepted)
        .await?
    {
        let username = store
            .get_user(collaboration.collaborator_id)
            .await?
            .map(|u| u.username)
            .unwrap_or_default();
        members.push(Member {
            id: collaboration.collaborator_id,
            username,
            is_owner: false,
        });
    }

    Ok(members)
}

/// Ids of every member, owner first
pub async fn member_ids(store: &dyn Store, idea: &Idea) -> BackendResult<Vec<Uuid>> {
    let mut ids = vec![idea.owner_id];
    ids.extend(
        store
            .list_collaborations(idea.id, CollaborationStatus::Accepted)
            .await?
            .into_iter()
            .map(|c| c.collaborator_id),
    );
    Ok(ids)
}

/// List the members of an idea's group; only members may look
pub async fn get_members(store: &dyn Store, actor: &User, idea_id: Uuid) -> BackendResult<MembersResponse> {
    let idea = require_group_access(store, idea_id, actor.id).await?;
    Ok(MembersResponse {
        members: members_of(store, &idea).await?,
    })
}

/// Owner removes an accepted collaborator
pub async fn remove_member(
    store: &dyn Store,
    actor: &User,
    request: &RemoveMemberRequest,
) -> BackendResult<ActionResponse> {
    const NOT_FOUND: &str = "Idea or member not found";

    let (idea_id, member_id) = match (request.idea_id, request.member_id) {
        (Some(idea_id), Some(member_id)) => (idea_id, member_id),
        (None, _) => return Err(BackendError::validation("idea_id", "idea_id and member_id required")),
        (_, None) => return Err(BackendError::validation("member_id", "idea_id and member_id required")),
    };

    let idea = load_idea_or(store, idea_id, NOT_FOUND).await?;
    if !can_modify_idea(&idea, actor.id) {
        tracing::debug!(idea_id = %idea.id, actor = %actor.id, "member removal by non-owner");
        return Err(BackendError::forbidden("Only owner can remove members"));
    }

    let collaboration = store.find_collaboration(idea.id, member_id).await?;
    delete_membership(store, collaboration, NOT_FOUND).await?;

    tracing::info!(idea_id = %idea.id, member_id = %member_id, "member removed");
    Ok(ActionResponse::new("Member removed successfully"))
}

/// An accepted collaborator leaves the group
pub async fn leave_group(
    store: &dyn Store,
    actor: &User,
    request: &LeaveGroupRequest,
) -> BackendResult<ActionResponse> {
    let idea_id = request
        .idea_id
        .ok_or_else(|| BackendError::validation("idea_id", "idea_id required"))?;

    let collaboration = store.find_collaboration(idea_id, actor.id).await?;
    delete_membership(store, collaboration, "You are not a member of this group").await?;

    tracing::info!(idea_id = %idea_id, member_id = %actor.id, "member left group");
    Ok(ActionResponse::new("You left the group"))
}

/// Delete an accepted row; anything else, or a lost race, is `not_found`
async fn delete_membership(
    store: &dyn Store,
    collaboration: Option<Collaboration>,
    not_found: &'static str,
) -> BackendResult<()> {
    let current = collaboration.as_ref().map(|c| c.status);
    let step = step(current, CollabAction::Remove).map_err(|_| BackendError::not_found(not_found))?;

    let Some(row) = collaboration.as_ref() else {
        return Err(BackendError::not_found(not_found));
    };
    if let Some(change) = step.into_change(Some(row), row.idea_id, row.collaborator_id, None) {
        store.apply(change).await.map_err(|e| match e {
            StoreError::Conflict(_) => BackendError::not_found(not_found),
            other => other.into(),
        })?;
    }
    Ok(())
}
