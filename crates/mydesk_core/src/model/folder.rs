//! Folder model.
//!
//! A folder stores no item counter. The count shown next to it is derived
//! from the folder item store at read time (see [`FolderSummary`]).

use crate::model::entity::{require, Entity, EntityId, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: EntityId,
    pub name: String,
    pub description: String,
}

/// Folder plus its derived item count, as rendered in the folders grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderSummary {
    #[serde(flatten)]
    pub folder: Folder,
    pub item_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderDraft {
    pub name: String,
    pub description: String,
}

impl FolderDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Entity for Folder {
    type Draft = FolderDraft;
    type Patch = FolderPatch;

    const LABEL: &'static str = "folder";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: FolderDraft, _today: NaiveDate) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
        }
    }

    fn apply_patch(&mut self, patch: FolderPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require(Self::LABEL, "name", &self.name)
    }
}
