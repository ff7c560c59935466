/**
 * Collaboration State Machine
 *
 * Every (current status, action) pair is listed in one table so that the
 * full lifecycle can be read, and tested, in a single place:
 *
 * | current  | Request          | Approve          | Reject           | Remove   |
 * |----------|------------------|------------------|------------------|----------|
 * | none     | insert pending   | not found        | not found        | not found|
 * | pending  | duplicate        | accepted         | rejected         | not found|
 * | accepted | duplicate        | unchanged        | rejected         | delete   |
 * | rejected | pending          | accepted         | unchanged        | not found|
 *
 * Moves into `pending` notify the owner (`collab_request`); moves into
 * `accepted`/`rejected` notify the collaborator. Unchanged rows notify
 * nobody, so re-approving an accepted row is an idempotent no-op.
 */

use crate::shared::social::{
    Collaboration, CollaborationStatus, NotificationType, Notification, ResolveAction,
};
use crate::backend::store::CollabChange;
use uuid::Uuid;

/// Something an actor can do to a collaboration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollabAction {
    /// Prospective collaborator asks to join
    Request,
    /// Owner accepts
    Approve,
    /// Owner declines
    Reject,
    /// Owner removes a member, or a member leaves
    Remove,
}

impl CollabAction {
    pub const ALL: [CollabAction; 4] = [
        CollabAction::Request,
        CollabAction::Approve,
        CollabAction::Reject,
        CollabAction::Remove,
    ];
}

impl From<ResolveAction> for CollabAction {
    fn from(action: ResolveAction) -> Self {
        match action {
            ResolveAction::Approve => CollabAction::Approve,
            ResolveAction::Reject => CollabAction::Reject,
        }
    }
}

/// Row-level effect of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Insert a fresh row with this status
    Insert(CollaborationStatus),
    /// Compare-and-set the existing row's status
    Set {
        from: CollaborationStatus,
        to: CollaborationStatus,
    },
    /// Delete the existing row, which must still have this status
    Delete(CollaborationStatus),
    /// Leave the row as it is
    Keep,
}

/// Who a step notifies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Owner,
    Collaborator,
}

/// Outcome of a permitted step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub transition: Transition,
    pub notify: Option<(Audience, NotificationType)>,
}

/// Why a step is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    /// No row the action could apply to
    NotFound,
    /// The row already is where the request would put it
    Duplicate,
}

/// Look up the step for `action` on a row currently in `current`
pub fn step(current: Option<CollaborationStatus>, action: CollabAction) -> Result<Step, Refusal> {
    use CollabAction::*;
    use CollaborationStatus::*;

    let to_owner = Some((Audience::Owner, NotificationType::CollabRequest));
    let approved = Some((Audience::Collaborator, NotificationType::CollabApproved));
    let rejected = Some((Audience::Collaborator, NotificationType::CollabRejected));

    let (transition, notify) = match (current, action) {
        (None, Request) => (Transition::Insert(Pending), to_owner),
        (None, _) => return Err(Refusal::NotFound),

        (Some(Pending | Accepted), Request) => return Err(Refusal::Duplicate),
        (Some(Rejected), Request) => (Transition::Set { from: Rejected, to: Pending }, to_owner),

        (Some(Accepted), Approve) | (Some(Rejected), Reject) => (Transition::Keep, None),
        (Some(from), Approve) => (Transition::Set { from, to: Accepted }, approved),
        (Some(from), Reject) => (Transition::Set { from, to: Rejected }, rejected),

        (Some(Accepted), Remove) => (Transition::Delete(Accepted), None),
        (Some(_), Remove) => return Err(Refusal::NotFound),
    };

    Ok(Step { transition, notify })
}

impl Step {
    /// The status the row ends up in, `None` if it no longer exists
    pub fn next_status(&self, current: Option<CollaborationStatus>) -> Option<CollaborationStatus> {
        match self.transition {
            Transition::Insert(status) => Some(status),
            Transition::Set { to, .. } => Some(to),
            Transition::Delete(_) => None,
            Transition::Keep => current,
        }
    }

    /// Turn this step into the store write it requires
    ///
    /// `existing` is the row the step was computed from. Returns `None` for
    /// [`Transition::Keep`].
    pub fn into_change(
        self,
        existing: Option<&Collaboration>,
        idea_id: Uuid,
        collaborator_id: Uuid,
        notification: Option<Notification>,
    ) -> Option<CollabChange> {
        match self.transition {
            Transition::Insert(status) => {
                let mut collaboration = Collaboration::pending(idea_id, collaborator_id);
                collaboration.status = status;
                Some(CollabChange::Create {
                    collaboration,
                    notification,
                })
            }
            Transition::Set { from, to } => existing.map(|row| CollabChange::Update {
                collaboration_id: row.id,
                from,
                to,
                notification,
            }),
            Transition::Delete(expected) => existing.map(|row| CollabChange::Remove {
                collaboration_id: row.id,
                expected,
            }),
            Transition::Keep => None,
        }
    }
}
