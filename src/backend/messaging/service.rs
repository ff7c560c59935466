//! Group messages
//!
//! Reading and posting are both gated by group access, checked at the time
//! of the call: a member who has left or been removed loses access to the
//! history as well.

use std::collections::HashMap;
use uuid::Uuid;

use crate::backend::access::require_group_access;
use crate::backend::error::BackendResult;
use crate::backend::membership::service::member_ids;
use crate::backend::realtime::broadcast::{publish_group_message, RealtimeEventBroadcast};
use crate::backend::store::Store;
use crate::shared::social::{GroupMessage, GroupMessageView, SendGroupMessageRequest, User, UserSummary};

/// Messages of an idea's group, oldest first
pub async fn list_messages(
    store: &dyn Store,
    actor: &User,
    idea_id: Uuid,
) -> BackendResult<Vec<GroupMessageView>> {
    let idea = require_group_access(store, idea_id, actor.id).await?;
    let messages = store.list_messages(idea.id).await?;

    let mut senders: HashMap<Uuid, UserSummary> = HashMap::new();
    let mut views = Vec::with_capacity(messages.len());
    for message in messages {
        let sender = match senders.get(&message.sender_id) {
            Some(summary) => summary.clone(),
            None => {
                let summary = sender_summary(store, message.sender_id).await?;
                senders.insert(message.sender_id, summary.clone());
                summary
            }
        };
        views.push(view(message, sender));
    }
    Ok(views)
}

/// Post to an idea's group and push the message to every member
pub async fn send_message(
    store: &dyn Store,
    events: &RealtimeEventBroadcast,
    actor: &User,
    idea_id: Uuid,
    request: &SendGroupMessageRequest,
) -> BackendResult<GroupMessageView> {
    let idea = require_group_access(store, idea_id, actor.id).await?;
    request.validate()?;

    let message = GroupMessage::new(idea.id, actor.id, request.content.trim());
    store.insert_message(&message).await?;
    tracing::info!(idea_id = %idea.id, sender = %actor.id, message_id = %message.id, "group message posted");

    let view = view(message, actor.summary());
    let members = member_ids(store, &idea).await?;
    publish_group_message(events, &view, members);
    Ok(view)
}

async fn sender_summary(store: &dyn Store, user_id: Uuid) -> BackendResult<UserSummary> {
    Ok(store
        .get_user(user_id)
        .await?
        .map(|u| u.summary())
        .unwrap_or(UserSummary {
            id: user_id,
            username: String::new(),
        }))
}

fn view(message: GroupMessage, sender: UserSummary) -> GroupMessageView {
    GroupMessageView {
        id: message.id,
        idea_id: message.idea_id,
        sender,
        content: message.content,
        created_at: message.created_at,
    }
}
