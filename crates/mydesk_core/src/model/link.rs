//! Bookmarked link model.

use crate::model::entity::{or_default_label, require, Entity, EntityId, ValidationError};
use crate::model::note::DEFAULT_CATEGORY;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Suggested link categories, in picker order.
pub const LINK_CATEGORIES: &[&str] = &["General", "Study", "Daily Use", "Tools", "Reference"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: EntityId,
    pub title: String,
    /// Stored as entered; no scheme or reachability checks.
    pub url: String,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkDraft {
    pub title: String,
    pub url: String,
    pub description: String,
    pub category: String,
}

impl LinkDraft {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            description: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl Entity for Link {
    type Draft = LinkDraft;
    type Patch = LinkPatch;

    const LABEL: &'static str = "link";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: LinkDraft, _today: NaiveDate) -> Self {
        Self {
            id,
            title: draft.title,
            url: draft.url,
            description: draft.description,
            category: or_default_label(draft.category, DEFAULT_CATEGORY),
        }
    }

    fn apply_patch(&mut self, patch: LinkPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(url) = patch.url {
            self.url = url;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = or_default_label(category, DEFAULT_CATEGORY);
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require(Self::LABEL, "title", &self.title)?;
        require(Self::LABEL, "url", &self.url)
    }
}
