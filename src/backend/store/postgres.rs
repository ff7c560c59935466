//! PostgreSQL Store
//!
//! Runtime-checked `sqlx` queries against the schema in `migrations/`.
//! Enumerations are stored as TEXT and decoded on read; a value that does
//! not decode is reported as [`StoreError::Corrupt`] rather than defaulted.
//!
//! Multi-row writes (`apply`, `toggle_like`, `insert_comment`) run inside a
//! single transaction. Ordering ties are broken by the `seq` column.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use super::{CollabChange, LikeToggle, Store, StoreError, StoreResult};
use crate::shared::social::{
    Collaboration, CollaborationStatus, Comment, GroupMessage, Idea, Like, Notification,
    NotificationType, User, Visibility,
};

/// Store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    /// Run pending migrations from the migrations/ directory
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

/// Map a unique violation to `Conflict`, anything else to `Database`
fn unique_conflict(err: sqlx::Error, what: impl FnOnce() -> String) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict(what()),
        _ => StoreError::Database(err),
    }
}

fn status_from_row(row: &PgRow) -> StoreResult<CollaborationStatus> {
    let raw: String = row.try_get("status")?;
    CollaborationStatus::from_str(&raw)
        .ok_or_else(|| StoreError::Corrupt(format!("unknown collaboration status '{}'", raw)))
}

fn user_from_row(row: &PgRow) -> StoreResult<User> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        created_at: row.try_get("created_at")?,
    })
}

fn idea_from_row(row: &PgRow) -> StoreResult<Idea> {
    let raw: String = row.try_get("visibility")?;
    let visibility = Visibility::from_str(&raw)
        .ok_or_else(|| StoreError::Corrupt(format!("unknown visibility '{}'", raw)))?;
    Ok(Idea {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        title: row.try_get("title")?,
        short_description: row.try_get("short_description")?,
        description: row.try_get("description")?,
        visibility,
        created_at: row.try_get("created_at")?,
    })
}

fn collaboration_from_row(row: &PgRow) -> StoreResult<Collaboration> {
    Ok(Collaboration {
        id: row.try_get("id")?,
        idea_id: row.try_get("idea_id")?,
        collaborator_id: row.try_get("collaborator_id")?,
        status: status_from_row(row)?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn notification_from_row(row: &PgRow) -> StoreResult<Notification> {
    let raw: String = row.try_get("kind")?;
    let kind = NotificationType::from_str(&raw)
        .ok_or_else(|| StoreError::Corrupt(format!("unknown notification type '{}'", raw)))?;
    Ok(Notification {
        id: row.try_get("id")?,
        recipient_id: row.try_get("recipient_id")?,
        sender_id: row.try_get("sender_id")?,
        idea_id: row.try_get("idea_id")?,
        kind,
        message: row.try_get("message")?,
        is_read: row.try_get("is_read")?,
        created_at: row.try_get("created_at")?,
    })
}

fn message_from_row(row: &PgRow) -> StoreResult<GroupMessage> {
    Ok(GroupMessage {
        id: row.try_get("id")?,
        idea_id: row.try_get("idea_id")?,
        sender_id: row.try_get("sender_id")?,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
    })
}

async fn insert_notification_tx(
    tx: &mut Transaction<'_, Postgres>,
    notification: &Notification,
) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO notifications (id, recipient_id, sender_id, idea_id, kind, message, is_read, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(notification.id)
    .bind(notification.recipient_id)
    .bind(notification.sender_id)
    .bind(notification.idea_id)
    .bind(notification.kind.as_str())
    .bind(&notification.message)
    .bind(notification.is_read)
    .bind(notification.created_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

const COLLABORATION_COLUMNS: &str = "id, idea_id, collaborator_id, status, created_at, updated_at";

#[async_trait]
impl Store for PgStore {
    async fn upsert_user(&self, user: &User) -> StoreResult<User> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (id, username, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET username = EXCLUDED.username
            RETURNING id, username, created_at
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await?;
        user_from_row(&row)
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let row = sqlx::query("SELECT id, username, created_at FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn insert_idea(&self, idea: &Idea) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO ideas (id, owner_id, title, short_description, description, visibility, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(idea.id)
        .bind(idea.owner_id)
        .bind(&idea.title)
        .bind(&idea.short_description)
        .bind(&idea.description)
        .bind(idea.visibility.as_str())
        .bind(idea.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| unique_conflict(e, || format!("idea {} already exists", idea.id)))?;
        Ok(())
    }

    async fn get_idea(&self, id: Uuid) -> StoreResult<Option<Idea>> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, title, short_description, description, visibility, created_at
            FROM ideas
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(idea_from_row).transpose()
    }

    async fn update_idea(&self, idea: &Idea) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE ideas
            SET title = $1, short_description = $2, description = $3, visibility = $4
            WHERE id = $5
            "#,
        )
        .bind(&idea.title)
        .bind(&idea.short_description)
        .bind(&idea.description)
        .bind(idea.visibility.as_str())
        .bind(idea.id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_idea(&self, id: Uuid) -> StoreResult<bool> {
        // Dependent rows go with it through ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM ideas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_collaboration(&self, id: Uuid) -> StoreResult<Option<Collaboration>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM collaborations WHERE id = $1",
            COLLABORATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(collaboration_from_row).transpose()
    }

    async fn find_collaboration(
        &self,
        idea_id: Uuid,
        collaborator_id: Uuid,
    ) -> StoreResult<Option<Collaboration>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM collaborations WHERE idea_id = $1 AND collaborator_id = $2",
            COLLABORATION_COLUMNS
        ))
        .bind(idea_id)
        .bind(collaborator_id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(collaboration_from_row).transpose()
    }

    async fn list_collaborations(
        &self,
        idea_id: Uuid,
        status: CollaborationStatus,
    ) -> StoreResult<Vec<Collaboration>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM collaborations WHERE idea_id = $1 AND status = $2 ORDER BY seq ASC",
            COLLABORATION_COLUMNS
        ))
        .bind(idea_id)
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(collaboration_from_row).collect()
    }

    async fn list_accepted_collaborations_for(&self, user_id: Uuid) -> StoreResult<Vec<Collaboration>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.idea_id, c.collaborator_id, c.status, c.created_at, c.updated_at
            FROM collaborations c
            JOIN ideas i ON i.id = c.idea_id
            WHERE c.status = 'accepted'
              AND (
                i.owner_id = $1
                OR EXISTS (
                    SELECT 1 FROM collaborations mine
                    WHERE mine.idea_id = c.idea_id
                      AND mine.collaborator_id = $1
                )
              )
            ORDER BY c.seq ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(collaboration_from_row).collect()
    }

    async fn apply(&self, change: CollabChange) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        match &change {
            CollabChange::Create { collaboration, .. } => {
                sqlx::query(
                    r#"
                    INSERT INTO collaborations (id, idea_id, collaborator_id, status, created_at, updated_at)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    "#,
                )
                .bind(collaboration.id)
                .bind(collaboration.idea_id)
                .bind(collaboration.collaborator_id)
                .bind(collaboration.status.as_str())
                .bind(collaboration.created_at)
                .bind(collaboration.updated_at)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    unique_conflict(e, || {
                        format!(
                            "collaboration ({}, {}) already exists",
                            collaboration.idea_id, collaboration.collaborator_id
                        )
                    })
                })?;
            }
            CollabChange::Update {
                collaboration_id,
                from,
                to,
                ..
            } => {
                let result = sqlx::query(
                    r#"
                    UPDATE collaborations
                    SET status = $1, updated_at = $2
                    WHERE id = $3 AND status = $4
                    "#,
                )
                .bind(to.as_str())
                .bind(Utc::now())
                .bind(collaboration_id)
                .bind(from.as_str())
                .execute(&mut *tx)
                .await?;
                if result.rows_affected() == 0 {
                    return Err(StoreError::Conflict(format!(
                        "collaboration {} is no longer {}",
                        collaboration_id, from
                    )));
                }
            }
            CollabChange::Remove {
                collaboration_id,
                expected,
            } => {
                let result = sqlx::query("DELETE FROM collaborations WHERE id = $1 AND status = $2")
                    .bind(collaboration_id)
                    .bind(expected.as_str())
                    .execute(&mut *tx)
                    .await?;
                if result.rows_affected() == 0 {
                    return Err(StoreError::Conflict(format!(
                        "collaboration {} is no longer {}",
                        collaboration_id, expected
                    )));
                }
            }
        }

        if let Some(notification) = change.notification() {
            insert_notification_tx(&mut tx, notification).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn insert_notification(&self, notification: &Notification) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        insert_notification_tx(&mut tx, notification).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn list_notifications(&self, recipient_id: Uuid) -> StoreResult<Vec<Notification>> {
        let rows = sqlx::query(
            r#"
            SELECT id, recipient_id, sender_id, idea_id, kind, message, is_read, created_at
            FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(notification_from_row).collect()
    }

    async fn mark_notification_read(&self, id: Uuid, recipient_id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 AND recipient_id = $2",
        )
        .bind(id)
        .bind(recipient_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_message(&self, message: &GroupMessage) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO group_messages (id, idea_id, sender_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id)
        .bind(message.idea_id)
        .bind(message.sender_id)
        .bind(&message.content)
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_messages(&self, idea_id: Uuid) -> StoreResult<Vec<GroupMessage>> {
        let rows = sqlx::query(
            r#"
            SELECT id, idea_id, sender_id, content, created_at
            FROM group_messages
            WHERE idea_id = $1
            ORDER BY created_at ASC, seq ASC
            "#,
        )
        .bind(idea_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(message_from_row).collect()
    }

    async fn toggle_like(&self, like: &Like, on_like: Option<&Notification>) -> StoreResult<LikeToggle> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND idea_id = $2")
            .bind(like.user_id)
            .bind(like.idea_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let (liked, created) = if removed > 0 {
            (false, false)
        } else {
            let inserted = sqlx::query(
                r#"
                INSERT INTO likes (id, user_id, idea_id, created_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (user_id, idea_id) DO NOTHING
                "#,
            )
            .bind(like.id)
            .bind(like.user_id)
            .bind(like.idea_id)
            .bind(like.created_at)
            .execute(&mut *tx)
            .await?
            .rows_affected();
            // A concurrent like won the insert; the user still likes the idea.
            (true, inserted > 0)
        };

        if created {
            if let Some(notification) = on_like {
                insert_notification_tx(&mut tx, notification).await?;
            }
        }

        let like_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE idea_id = $1")
            .bind(like.idea_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(LikeToggle {
            liked,
            created,
            like_count,
        })
    }

    async fn insert_comment(&self, comment: &Comment, notification: Option<&Notification>) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO comments (id, idea_id, user_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.id)
        .bind(comment.idea_id)
        .bind(comment.user_id)
        .bind(&comment.content)
        .bind(comment.created_at)
        .execute(&mut *tx)
        .await?;

        if let Some(notification) = notification {
            insert_notification_tx(&mut tx, notification).await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
