//! Per-folder item collections.
//!
//! # Responsibility
//! - Own folder items keyed by folder id.
//! - Expose item count as a derived read, never a stored counter.
//!
//! # Invariants
//! - `item_count(folder)` always equals `items(folder).len()`.
//! - Kind-specific toggles never touch items of another kind.

use crate::model::entity::{EntityId, ItemKind};
use crate::model::folder_item::{FolderItem, FolderItemBody, FolderItemDraft, FolderItemPatch};
use crate::repo::collection::{today, Collection, StoreError, StoreResult};
use chrono::NaiveDate;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct FolderItemStore {
    folders: HashMap<EntityId, Collection<FolderItem>>,
}

impl FolderItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the items of one folder, keeping the given order.
    pub fn seed(&mut self, folder_id: EntityId, items: impl IntoIterator<Item = FolderItem>) {
        self.folders
            .insert(folder_id, Collection::from_records(items));
    }

    pub fn items(&self, folder_id: EntityId) -> &[FolderItem] {
        self.folders
            .get(&folder_id)
            .map(Collection::as_slice)
            .unwrap_or_default()
    }

    pub fn items_of_kind(
        &self,
        folder_id: EntityId,
        kind: ItemKind,
    ) -> impl Iterator<Item = &FolderItem> {
        self.items(folder_id)
            .iter()
            .filter(move |item| item.kind() == kind)
    }

    pub fn item_count(&self, folder_id: EntityId) -> usize {
        self.items(folder_id).len()
    }

    pub fn add(&mut self, folder_id: EntityId, draft: FolderItemDraft) -> StoreResult<FolderItem> {
        self.add_on(folder_id, draft, today())
    }

    pub fn add_on(
        &mut self,
        folder_id: EntityId,
        draft: FolderItemDraft,
        today: NaiveDate,
    ) -> StoreResult<FolderItem> {
        self.folders
            .entry(folder_id)
            .or_default()
            .add_on(draft, today)
    }

    pub fn update(
        &mut self,
        folder_id: EntityId,
        item_id: EntityId,
        patch: FolderItemPatch,
    ) -> StoreResult<FolderItem> {
        self.collection_mut(folder_id, item_id)?
            .update(item_id, patch)
    }

    pub fn remove(&mut self, folder_id: EntityId, item_id: EntityId) -> StoreResult<FolderItem> {
        self.collection_mut(folder_id, item_id)?.remove(item_id)
    }

    /// Flips completion on a task item; other kinds are returned unchanged.
    pub fn toggle_task_complete(
        &mut self,
        folder_id: EntityId,
        item_id: EntityId,
    ) -> StoreResult<FolderItem> {
        self.collection_mut(folder_id, item_id)?
            .modify(item_id, |item| {
                if let FolderItemBody::Task { completed, .. } = &mut item.body {
                    *completed = !*completed;
                }
            })
    }

    /// Flips the pin on a note item; other kinds are returned unchanged.
    pub fn toggle_note_pin(
        &mut self,
        folder_id: EntityId,
        item_id: EntityId,
    ) -> StoreResult<FolderItem> {
        self.collection_mut(folder_id, item_id)?
            .modify(item_id, |item| {
                if let FolderItemBody::Note { pinned, .. } = &mut item.body {
                    *pinned = !*pinned;
                }
            })
    }

    /// Drops every item owned by a folder. Returns how many were dropped.
    pub fn drop_folder(&mut self, folder_id: EntityId) -> usize {
        self.folders
            .remove(&folder_id)
            .map_or(0, |items| items.len())
    }

    fn collection_mut(
        &mut self,
        folder_id: EntityId,
        item_id: EntityId,
    ) -> StoreResult<&mut Collection<FolderItem>> {
        self.folders
            .get_mut(&folder_id)
            .ok_or(StoreError::NotFound {
                entity: "folder_item",
                id: item_id,
            })
    }
}
