//! Heterogeneous items scoped to one folder.
//!
//! # Responsibility
//! - Model note/link/task-shaped records that live inside a folder.
//! - Keep type-specific fields consistent with the `type` discriminator.
//!
//! # Invariants
//! - The field set present always matches the variant of [`FolderItemBody`].
//! - Folder items are independent copies; they never alias top-level notes,
//!   links or tasks.

use crate::model::entity::{require, Entity, EntityId, ItemKind, ValidationError};
use crate::model::task::Priority;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Type-conditional payload, serialized with a `type` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FolderItemBody {
    Note { content: String, pinned: bool },
    Link { url: String, description: String },
    Task { completed: bool, priority: Priority },
}

impl FolderItemBody {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Note { .. } => ItemKind::Note,
            Self::Link { .. } => ItemKind::Link,
            Self::Task { .. } => ItemKind::Task,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderItem {
    pub id: EntityId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: NaiveDate,
    #[serde(flatten)]
    pub body: FolderItemBody,
}

impl FolderItem {
    pub fn kind(&self) -> ItemKind {
        self.body.kind()
    }
}

/// Folder item form state.
///
/// Carries every field the add-item form shows; only the ones relevant to
/// `kind` are copied into the stored item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderItemDraft {
    pub kind: ItemKind,
    pub title: String,
    pub content: String,
    pub url: String,
    pub description: String,
    pub priority: Priority,
}

impl FolderItemDraft {
    pub fn new(kind: ItemKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            content: String::new(),
            url: String::new(),
            description: String::new(),
            priority: Priority::default(),
        }
    }

    pub fn note(title: impl Into<String>, content: impl Into<String>) -> Self {
        let mut draft = Self::new(ItemKind::Note, title);
        draft.content = content.into();
        draft
    }

    pub fn link(
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let mut draft = Self::new(ItemKind::Link, title);
        draft.url = url.into();
        draft.description = description.into();
        draft
    }

    pub fn task(title: impl Into<String>, priority: Priority) -> Self {
        let mut draft = Self::new(ItemKind::Task, title);
        draft.priority = priority;
        draft
    }
}

/// Partial update for a folder item.
///
/// Fields that do not belong to the item's kind are ignored, so a patch can
/// never change which field set an item carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderItemPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub pinned: Option<bool>,
}

impl Entity for FolderItem {
    type Draft = FolderItemDraft;
    type Patch = FolderItemPatch;

    const LABEL: &'static str = "folder_item";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: FolderItemDraft, today: NaiveDate) -> Self {
        let body = match draft.kind {
            ItemKind::Note => FolderItemBody::Note {
                content: draft.content,
                pinned: false,
            },
            ItemKind::Link => FolderItemBody::Link {
                url: draft.url,
                description: draft.description,
            },
            ItemKind::Task => FolderItemBody::Task {
                completed: false,
                priority: draft.priority,
            },
        };

        Self {
            id,
            title: draft.title,
            category: None,
            created_at: today,
            body,
        }
    }

    fn apply_patch(&mut self, patch: FolderItemPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }

        match &mut self.body {
            FolderItemBody::Note { content, pinned } => {
                if let Some(value) = patch.content {
                    *content = value;
                }
                if let Some(value) = patch.pinned {
                    *pinned = value;
                }
            }
            FolderItemBody::Link { url, description } => {
                if let Some(value) = patch.url {
                    *url = value;
                }
                if let Some(value) = patch.description {
                    *description = value;
                }
            }
            FolderItemBody::Task {
                completed,
                priority,
            } => {
                if let Some(value) = patch.completed {
                    *completed = value;
                }
                if let Some(value) = patch.priority {
                    *priority = value;
                }
            }
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require(Self::LABEL, "title", &self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::{FolderItem, FolderItemBody, FolderItemDraft, FolderItemPatch};
    use crate::model::entity::{new_entity_id, Entity, ItemKind};
    use crate::model::task::Priority;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
    }

    #[test]
    fn draft_only_copies_fields_of_selected_kind() {
        let mut draft = FolderItemDraft::link("Primer", "https://example.com", "design");
        draft.content = "ignored body".to_string();
        draft.priority = Priority::High;

        let item = FolderItem::from_draft(new_entity_id(), draft, day());
        assert_eq!(item.kind(), ItemKind::Link);
        assert_eq!(
            item.body,
            FolderItemBody::Link {
                url: "https://example.com".to_string(),
                description: "design".to_string(),
            }
        );
    }

    #[test]
    fn new_task_item_starts_incomplete() {
        let item = FolderItem::from_draft(
            new_entity_id(),
            FolderItemDraft::task("practice", Priority::Low),
            day(),
        );
        assert_eq!(
            item.body,
            FolderItemBody::Task {
                completed: false,
                priority: Priority::Low,
            }
        );
        assert_eq!(item.created_at, day());
    }

    #[test]
    fn patch_ignores_fields_of_other_kinds() {
        let mut item = FolderItem::from_draft(
            new_entity_id(),
            FolderItemDraft::note("n", "body"),
            day(),
        );
        item.apply_patch(FolderItemPatch {
            url: Some("https://nowhere".to_string()),
            completed: Some(true),
            pinned: Some(true),
            ..FolderItemPatch::default()
        });

        assert_eq!(
            item.body,
            FolderItemBody::Note {
                content: "body".to_string(),
                pinned: true,
            }
        );
    }
}
