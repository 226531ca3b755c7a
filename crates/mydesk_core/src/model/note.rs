//! Note domain model.
//!
//! # Invariants
//! - `title` and `content` are never blank once stored.
//! - `category` falls back to `General` when left blank.

use crate::model::entity::{or_default_label, require, Entity, EntityId, Toggle, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Suggested note categories, in picker order.
pub const NOTE_CATEGORIES: &[&str] = &["General", "DSA", "OS", "DBMS", "Web Dev", "Projects"];

pub const DEFAULT_CATEGORY: &str = "General";

/// Markdown note shown on the dashboard and notes section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: EntityId,
    pub title: String,
    /// Markdown source.
    pub content: String,
    pub category: String,
    pub pinned: bool,
    pub created_at: NaiveDate,
}

/// Form state for creating a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub category: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Partial update for a note. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub pinned: Option<bool>,
}

impl Entity for Note {
    type Draft = NoteDraft;
    type Patch = NotePatch;

    const LABEL: &'static str = "note";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: NoteDraft, today: NaiveDate) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
            category: or_default_label(draft.category, DEFAULT_CATEGORY),
            pinned: false,
            created_at: today,
        }
    }

    fn apply_patch(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(category) = patch.category {
            self.category = or_default_label(category, DEFAULT_CATEGORY);
        }
        if let Some(pinned) = patch.pinned {
            self.pinned = pinned;
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require(Self::LABEL, "title", &self.title)?;
        require(Self::LABEL, "content", &self.content)
    }
}

impl Toggle for Note {
    fn toggle(&mut self) {
        self.pinned = !self.pinned;
    }
}
