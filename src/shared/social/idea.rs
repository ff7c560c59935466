//! Idea Data Structure
//!
//! The collaboration core reads an idea's owner and visibility. Only the
//! owner edits the rest, and the owner never changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::{require_text, SharedError};

/// Who may see an idea
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Only the owner and accepted collaborators
    #[default]
    Private,
    /// Everyone
    Public,
    /// Summary visible to everyone, details to members
    Partial,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Public => "public",
            Visibility::Partial => "partial",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "private" => Some(Visibility::Private),
            "public" => Some(Visibility::Public),
            "partial" => Some(Visibility::Partial),
            _ => None,
        }
    }
}

/// An idea, owned by exactly one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Idea {
    /// Unique idea ID
    pub id: Uuid,
    /// The owning user; membership of the owner is structural
    pub owner_id: Uuid,
    pub title: String,
    pub short_description: Option<String>,
    pub description: String,
    #[serde(default)]
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
}

impl Idea {
    pub fn new(
        owner_id: Uuid,
        title: impl Into<String>,
        description: impl Into<String>,
        visibility: Visibility,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title: title.into(),
            short_description: None,
            description: description.into(),
            visibility,
            created_at: Utc::now(),
        }
    }

    /// Check if `user_id` owns this idea
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    pub fn summary(&self) -> IdeaSummary {
        IdeaSummary {
            id: self.id,
            title: self.title.clone(),
            owner_id: self.owner_id,
        }
    }
}

/// Compact idea reference embedded in notifications
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdeaSummary {
    pub id: Uuid,
    pub title: String,
    pub owner_id: Uuid,
}

/// Request body for creating an idea
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIdeaRequest {
    pub title: String,
    #[serde(default)]
    pub short_description: Option<String>,
    pub description: String,
    #[serde(default)]
    pub visibility: Option<String>,
}

impl CreateIdeaRequest {
    /// Validate the request and build the idea it describes
    pub fn into_idea(self, owner_id: Uuid) -> Result<Idea, SharedError> {
        require_text("title", &self.title, 200)?;
        require_text("description", &self.description, 20_000)?;
        if let Some(short) = &self.short_description {
            check_short_description(short)?;
        }
        let visibility = match self.visibility.as_deref() {
            None => Visibility::default(),
            Some(raw) => Visibility::from_str(raw)
                .ok_or_else(|| SharedError::unknown("visibility", raw))?,
        };

        let mut idea = Idea::new(owner_id, self.title.trim(), self.description, visibility);
        idea.short_description = self.short_description;
        Ok(idea)
    }
}

/// Request body for editing an idea; absent fields are left as they are
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateIdeaRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
}

impl UpdateIdeaRequest {
    /// Validate the present fields and write them onto `idea`
    ///
    /// Nothing is written if any field is invalid.
    pub fn apply_to(self, idea: &mut Idea) -> Result<(), SharedError> {
        if let Some(title) = &self.title {
            require_text("title", title, 200)?;
        }
        if let Some(description) = &self.description {
            require_text("description", description, 20_000)?;
        }
        if let Some(short) = &self.short_description {
            check_short_description(short)?;
        }
        let visibility = match self.visibility.as_deref() {
            None => None,
            Some(raw) => Some(
                Visibility::from_str(raw).ok_or_else(|| SharedError::unknown("visibility", raw))?,
            ),
        };

        if let Some(title) = self.title {
            idea.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            idea.description = description;
        }
        if self.short_description.is_some() {
            idea.short_description = self.short_description;
        }
        if let Some(visibility) = visibility {
            idea.visibility = visibility;
        }
        Ok(())
    }
}

fn check_short_description(short: &str) -> Result<(), SharedError> {
    if short.chars().count() > 500 {
        return Err(SharedError::validation(
            "short_description",
            "Ensure this field has no more than 500 characters.",
        ));
    }
    Ok(())
}
