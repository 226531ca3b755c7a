//! Owned in-memory collection with uniform CRUD semantics.
//!
//! # Responsibility
//! - Hold one entity type in display order (newest first).
//! - Apply add/update/remove/toggle with validation before commit.
//!
//! # Invariants
//! - Ids are unique within a collection.
//! - A failed operation leaves the collection byte-for-byte unchanged.
//! - `add` prepends; no other operation reorders records.

use crate::model::entity::{new_entity_id, Entity, EntityId, Toggle, ValidationError};
use chrono::{Local, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for collection mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Validation(ValidationError),
    NotFound {
        entity: &'static str,
        id: EntityId,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Returns the local calendar date used to stamp new records.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Clone)]
pub struct Collection<T: Entity> {
    records: Vec<T>,
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from records already in display order.
    ///
    /// Records failing validation or repeating an earlier id are dropped.
    pub fn from_records(records: impl IntoIterator<Item = T>) -> Self {
        let mut collection = Self::new();
        for record in records {
            if record.validate().is_ok() && collection.get(record.id()).is_none() {
                collection.records.push(record);
            }
        }
        collection
    }

    /// Validates a draft and prepends the created record, stamped today.
    pub fn add(&mut self, draft: T::Draft) -> StoreResult<T> {
        self.add_on(draft, today())
    }

    /// Same as [`Collection::add`] with an explicit creation date.
    pub fn add_on(&mut self, draft: T::Draft, today: NaiveDate) -> StoreResult<T> {
        let mut id = new_entity_id();
        while self.get(id).is_some() {
            id = new_entity_id();
        }

        let record = T::from_draft(id, draft, today);
        record.validate()?;
        self.records.insert(0, record.clone());
        Ok(record)
    }

    /// Merges a patch onto the matching record.
    pub fn update(&mut self, id: EntityId, patch: T::Patch) -> StoreResult<T> {
        self.modify(id, |record| record.apply_patch(patch))
    }

    pub fn remove(&mut self, id: EntityId) -> StoreResult<T> {
        let index = self.position(id)?;
        Ok(self.records.remove(index))
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Applies `change` to a copy and commits it only if it still validates.
    pub(crate) fn modify(
        &mut self,
        id: EntityId,
        change: impl FnOnce(&mut T),
    ) -> StoreResult<T> {
        let index = self.position(id)?;
        let mut candidate = self.records[index].clone();
        change(&mut candidate);
        candidate.validate()?;
        self.records[index] = candidate.clone();
        Ok(candidate)
    }

    fn position(&self, id: EntityId) -> StoreResult<usize> {
        self.records
            .iter()
            .position(|record| record.id() == id)
            .ok_or(StoreError::NotFound {
                entity: T::LABEL,
                id,
            })
    }
}

impl<T: Toggle> Collection<T> {
    /// Flips the entity's boolean flag (pin for notes, completion for tasks).
    pub fn toggle(&mut self, id: EntityId) -> StoreResult<T> {
        self.modify(id, Toggle::toggle)
    }
}
