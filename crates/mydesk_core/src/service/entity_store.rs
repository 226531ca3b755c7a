//! Single source of truth for all desk collections.
//!
//! # Responsibility
//! - Own notes, links, tasks, folders and folder items.
//! - Keep folder/item ownership consistent across both stores.
//!
//! # Invariants
//! - Folder items exist only for folders present in `folders`.
//! - Removing a folder removes its items in the same call.
//! - Folder item counts are read from the item store, never cached.

use crate::model::entity::EntityId;
use crate::model::folder::{Folder, FolderDraft, FolderPatch, FolderSummary};
use crate::model::folder_item::{FolderItem, FolderItemDraft, FolderItemPatch};
use crate::model::link::Link;
use crate::model::note::Note;
use crate::model::task::Task;
use crate::repo::collection::{Collection, StoreError, StoreResult};
use crate::repo::folder_items::FolderItemStore;
use crate::search::substring::SearchCorpus;

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    notes: Collection<Note>,
    links: Collection<Link>,
    tasks: Collection<Task>,
    folders: Collection<Folder>,
    folder_items: FolderItemStore,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        notes: Collection<Note>,
        links: Collection<Link>,
        tasks: Collection<Task>,
        folders: Collection<Folder>,
        folder_items: FolderItemStore,
    ) -> Self {
        Self {
            notes,
            links,
            tasks,
            folders,
            folder_items,
        }
    }

    pub fn notes(&self) -> &Collection<Note> {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut Collection<Note> {
        &mut self.notes
    }

    pub fn links(&self) -> &Collection<Link> {
        &self.links
    }

    pub fn links_mut(&mut self) -> &mut Collection<Link> {
        &mut self.links
    }

    pub fn tasks(&self) -> &Collection<Task> {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut Collection<Task> {
        &mut self.tasks
    }

    /// Folders are read-only here; mutate through the folder methods so
    /// item ownership stays consistent.
    pub fn folders(&self) -> &Collection<Folder> {
        &self.folders
    }

    pub fn folder_items(&self) -> &FolderItemStore {
        &self.folder_items
    }

    /// Borrowed corpus over the live note/link/task collections.
    pub fn corpus(&self) -> SearchCorpus<'_> {
        SearchCorpus {
            notes: self.notes.as_slice(),
            links: self.links.as_slice(),
            tasks: self.tasks.as_slice(),
        }
    }

    pub fn add_folder(&mut self, draft: FolderDraft) -> StoreResult<Folder> {
        self.folders.add(draft)
    }

    pub fn update_folder(&mut self, id: EntityId, patch: FolderPatch) -> StoreResult<Folder> {
        self.folders.update(id, patch)
    }

    /// Removes a folder and every item it owns.
    pub fn remove_folder(&mut self, id: EntityId) -> StoreResult<Folder> {
        let folder = self.folders.remove(id)?;
        self.folder_items.drop_folder(id);
        Ok(folder)
    }

    pub fn folder_summary(&self, id: EntityId) -> Option<FolderSummary> {
        self.folders.get(id).map(|folder| self.summarize(folder))
    }

    /// Folders in display order with derived item counts.
    pub fn folder_summaries(&self) -> Vec<FolderSummary> {
        self.folders
            .iter()
            .map(|folder| self.summarize(folder))
            .collect()
    }

    pub fn add_folder_item(
        &mut self,
        folder_id: EntityId,
        draft: FolderItemDraft,
    ) -> StoreResult<FolderItem> {
        self.ensure_folder(folder_id)?;
        self.folder_items.add(folder_id, draft)
    }

    pub fn update_folder_item(
        &mut self,
        folder_id: EntityId,
        item_id: EntityId,
        patch: FolderItemPatch,
    ) -> StoreResult<FolderItem> {
        self.ensure_folder(folder_id)?;
        self.folder_items.update(folder_id, item_id, patch)
    }

    pub fn remove_folder_item(
        &mut self,
        folder_id: EntityId,
        item_id: EntityId,
    ) -> StoreResult<FolderItem> {
        self.ensure_folder(folder_id)?;
        self.folder_items.remove(folder_id, item_id)
    }

    pub fn toggle_folder_task(
        &mut self,
        folder_id: EntityId,
        item_id: EntityId,
    ) -> StoreResult<FolderItem> {
        self.ensure_folder(folder_id)?;
        self.folder_items.toggle_task_complete(folder_id, item_id)
    }

    pub fn toggle_folder_note_pin(
        &mut self,
        folder_id: EntityId,
        item_id: EntityId,
    ) -> StoreResult<FolderItem> {
        self.ensure_folder(folder_id)?;
        self.folder_items.toggle_note_pin(folder_id, item_id)
    }

    fn summarize(&self, folder: &Folder) -> FolderSummary {
        FolderSummary {
            folder: folder.clone(),
            item_count: self.folder_items.item_count(folder.id),
        }
    }

    fn ensure_folder(&self, folder_id: EntityId) -> StoreResult<()> {
        if self.folders.get(folder_id).is_none() {
            return Err(StoreError::NotFound {
                entity: "folder",
                id: folder_id,
            });
        }
        Ok(())
    }
}
