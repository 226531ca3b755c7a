//! Shared identity and validation contract for desk entities.
//!
//! # Responsibility
//! - Define the id type and generator used by every collection.
//! - Define the draft/patch lifecycle each entity type plugs into.
//!
//! # Invariants
//! - Ids are timestamp-derived (UUIDv7) and never reused within a process.
//! - `validate()` is the only gate deciding whether a record may be stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for notes, links, tasks, folders and folder items.
pub type EntityId = Uuid;

/// Generates a fresh client-side id.
///
/// UUIDv7 carries the creation millisecond and a monotonic counter, so ids
/// minted in a tight loop stay unique and sort by creation time.
pub fn new_entity_id() -> EntityId {
    Uuid::now_v7()
}

/// Discriminator shared by search hits and folder items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Note,
    Link,
    Task,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Link => "link",
            Self::Task => "task",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "note" => Some(Self::Note),
            "link" => Some(Self::Link),
            "task" => Some(Self::Task),
            _ => None,
        }
    }
}

/// Required-field violation raised before a record is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    BlankField {
        entity: &'static str,
        field: &'static str,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { entity, field } => {
                write!(f, "{entity}.{field} must not be blank")
            }
        }
    }
}

impl Error for ValidationError {}

/// Rejects empty and whitespace-only values for a required field.
pub(crate) fn require(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField { entity, field });
    }
    Ok(())
}

/// Record type that can live in a [`crate::repo::collection::Collection`].
///
/// `Draft` is the user-entered form state for creation, `Patch` the partial
/// field set merged by update. Neither is validated on its own; the store
/// builds/merges a candidate and calls [`Entity::validate`] before committing.
pub trait Entity: Clone {
    type Draft;
    type Patch;

    /// Lowercase label used in errors and log events.
    const LABEL: &'static str;

    fn id(&self) -> EntityId;

    /// Builds a candidate record from a draft.
    fn from_draft(id: EntityId, draft: Self::Draft, today: NaiveDate) -> Self;

    /// Merges present patch fields onto this record.
    fn apply_patch(&mut self, patch: Self::Patch);

    fn validate(&self) -> Result<(), ValidationError>;
}

/// Entity with one boolean flag flipped by a single user gesture.
pub trait Toggle: Entity {
    fn toggle(&mut self);
}

/// Returns `value` unless it is blank, in which case `fallback` is used.
pub(crate) fn or_default_label(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}
