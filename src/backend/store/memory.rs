/**
 * In-Memory Store
 *
 * Keeps every table in one `Tables` value behind a `tokio::sync::RwLock`.
 * Each trait method takes the lock exactly once, so every method (and in
 * particular every `CollabChange`) is atomic with respect to the others.
 *
 * Rows that need an order are kept in `Vec`s in insertion order, which
 * doubles as the tie-breaker when two rows share a timestamp.
 */

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CollabChange, LikeToggle, Store, StoreError, StoreResult};
use crate::shared::social::{
    Collaboration, CollaborationStatus, Comment, GroupMessage, Idea, Like, Notification, User,
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    ideas: HashMap<Uuid, Idea>,
    collaborations: Vec<Collaboration>,
    notifications: Vec<Notification>,
    messages: Vec<GroupMessage>,
    likes: Vec<Like>,
    comments: Vec<Comment>,
}

impl Tables {
    fn collaboration_mut(&mut self, id: Uuid) -> Option<&mut Collaboration> {
        self.collaborations.iter_mut().find(|c| c.id == id)
    }
}

/// Store backed by process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of collaboration rows, across all ideas
    pub async fn collaboration_count(&self) -> usize {
        self.tables.read().await.collaborations.len()
    }

    /// Number of notification rows, across all recipients
    pub async fn notification_count(&self) -> usize {
        self.tables.read().await.notifications.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn upsert_user(&self, user: &User) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .users
            .entry(user.id)
            .and_modify(|existing| existing.username = user.username.clone())
            .or_insert_with(|| user.clone());
        Ok(stored.clone())
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn insert_idea(&self, idea: &Idea) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.ideas.contains_key(&idea.id) {
            return Err(StoreError::Conflict(format!("idea {} already exists", idea.id)));
        }
        tables.ideas.insert(idea.id, idea.clone());
        Ok(())
    }

    async fn get_idea(&self, id: Uuid) -> StoreResult<Option<Idea>> {
        Ok(self.tables.read().await.ideas.get(&id).cloned())
    }

    async fn update_idea(&self, idea: &Idea) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.ideas.get_mut(&idea.id) {
            Some(stored) => {
                stored.title = idea.title.clone();
                stored.short_description = idea.short_description.clone();
                stored.description = idea.description.clone();
                stored.visibility = idea.visibility;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_idea(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.ideas.remove(&id).is_none() {
            return Ok(false);
        }
        tables.collaborations.retain(|c| c.idea_id != id);
        tables.notifications.retain(|n| n.idea_id != Some(id));
        tables.messages.retain(|m| m.idea_id != id);
        tables.likes.retain(|l| l.idea_id != id);
        tables.comments.retain(|c| c.idea_id != id);
        Ok(true)
    }

    async fn get_collaboration(&self, id: Uuid) -> StoreResult<Option<Collaboration>> {
        let tables = self.tables.read().await;
        Ok(tables.collaborations.iter().find(|c| c.id == id).cloned())
    }

    async fn find_collaboration(
        &self,
        idea_id: Uuid,
        collaborator_id: Uuid,
    ) -> StoreResult<Option<Collaboration>> {
        let tables = self.tables.read().await;
        Ok(tables
            .collaborations
            .iter()
            .find(|c| c.idea_id == idea_id && c.collaborator_id == collaborator_id)
            .cloned())
    }

    async fn list_collaborations(
        &self,
        idea_id: Uuid,
        status: CollaborationStatus,
    ) -> StoreResult<Vec<Collaboration>> {
        let tables = self.tables.read().await;
        Ok(tables
            .collaborations
            .iter()
            .filter(|c| c.idea_id == idea_id && c.status == status)
            .cloned()
            .collect())
    }

    async fn list_accepted_collaborations_for(&self, user_id: Uuid) -> StoreResult<Vec<Collaboration>> {
        let tables = self.tables.read().await;
        let mut relevant: HashSet<Uuid> = tables
            .ideas
            .values()
            .filter(|idea| idea.owner_id == user_id)
            .map(|idea| idea.id)
            .collect();
        relevant.extend(
            tables
                .collaborations
                .iter()
                .filter(|c| c.collaborator_id == user_id)
                .map(|c| c.idea_id),
        );

        Ok(tables
            .collaborations
            .iter()
            .filter(|c| c.is_accepted() && relevant.contains(&c.idea_id))
            .cloned()
            .collect())
    }

    async fn apply(&self, change: CollabChange) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        match change {
            CollabChange::Create {
                collaboration,
                notification,
            } => {
                let exists = tables.collaborations.iter().any(|c| {
                    c.idea_id == collaboration.idea_id
                        && c.collaborator_id == collaboration.collaborator_id
                });
                if exists {
                    return Err(StoreError::Conflict(format!(
                        "collaboration ({}, {}) already exists",
                        collaboration.idea_id, collaboration.collaborator_id
                    )));
                }
                tables.collaborations.push(collaboration);
                tables.notifications.extend(notification);
            }
            CollabChange::Update {
                collaboration_id,
                from,
                to,
                notification,
            } => {
                let row = tables
                    .collaboration_mut(collaboration_id)
                    .filter(|c| c.status == from)
                    .ok_or_else(|| {
                        StoreError::Conflict(format!(
                            "collaboration {} is no longer {}",
                            collaboration_id, from
                        ))
                    })?;
                row.status = to;
                row.updated_at = chrono::Utc::now();
                tables.notifications.extend(notification);
            }
            CollabChange::Remove {
                collaboration_id,
                expected,
            } => {
                let position = tables
                    .collaborations
                    .iter()
                    .position(|c| c.id == collaboration_id && c.status == expected)
                    .ok_or_else(|| {
                        StoreError::Conflict(format!(
                            "collaboration {} is no longer {}",
                            collaboration_id, expected
                        ))
                    })?;
                tables.collaborations.remove(position);
            }
        }
        Ok(())
    }

    async fn insert_notification(&self, notification: &Notification) -> StoreResult<()> {
        self.tables.write().await.notifications.push(notification.clone());
        Ok(())
    }

    async fn list_notifications(&self, recipient_id: Uuid) -> StoreResult<Vec<Notification>> {
        let tables = self.tables.read().await;
        let mut notifications: Vec<Notification> = tables
            .notifications
            .iter()
            .rev()
            .filter(|n| n.recipient_id == recipient_id)
            .cloned()
            .collect();
        // Stable sort keeps reverse insertion order among equal timestamps.
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    async fn mark_notification_read(&self, id: Uuid, recipient_id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.recipient_id == recipient_id)
        {
            Some(notification) => {
                notification.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_message(&self, message: &GroupMessage) -> StoreResult<()> {
        self.tables.write().await.messages.push(message.clone());
        Ok(())
    }

    async fn list_messages(&self, idea_id: Uuid) -> StoreResult<Vec<GroupMessage>> {
        let tables = self.tables.read().await;
        let mut messages: Vec<GroupMessage> = tables
            .messages
            .iter()
            .filter(|m| m.idea_id == idea_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    async fn toggle_like(&self, like: &Like, on_like: Option<&Notification>) -> StoreResult<LikeToggle> {
        let mut tables = self.tables.write().await;
        let existing = tables
            .likes
            .iter()
            .position(|l| l.user_id == like.user_id && l.idea_id == like.idea_id);

        let liked = match existing {
            Some(position) => {
                tables.likes.remove(position);
                false
            }
            None => {
                tables.likes.push(like.clone());
                tables.notifications.extend(on_like.cloned());
                true
            }
        };

        let like_count = tables.likes.iter().filter(|l| l.idea_id == like.idea_id).count() as i64;
        Ok(LikeToggle {
            liked,
            created: liked,
            like_count,
        })
    }

    async fn insert_comment(&self, comment: &Comment, notification: Option<&Notification>) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.comments.push(comment.clone());
        tables.notifications.extend(notification.cloned());
        Ok(())
    }
}
