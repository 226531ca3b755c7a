//! Desk facade: the handler layer the UI calls into.
//!
//! # Responsibility
//! - Compose the entity store, session and view controller into one value.
//! - Keep search results in step with the live collections.
//! - Apply the UI's silent no-op policy on top of typed store errors.
//!
//! # Invariants
//! - Invalid drafts and unknown ids change nothing and surface as
//!   `None`/`false`; the reason is logged at debug level only.
//! - Search always reflects current store contents while it is open.
//! - Leaving search (picking a hit, navigating, ending the session) drops
//!   the query, so later edits never bring the results back.

use crate::config::DeskConfig;
use crate::model::entity::{EntityId, ItemKind};
use crate::model::folder::{Folder, FolderDraft, FolderPatch, FolderSummary};
use crate::model::folder_item::{FolderItem, FolderItemDraft, FolderItemPatch};
use crate::model::link::{Link, LinkDraft, LinkPatch};
use crate::model::note::{Note, NoteDraft, NotePatch};
use crate::model::task::{Task, TaskDraft, TaskPatch};
use crate::model::user::{ProfilePatch, UserProfile};
use crate::repo::collection::{today, StoreResult};
use crate::repo::local_storage::{LocalStorage, SqliteStorage};
use crate::sample::sample_store;
use crate::search::substring::{search_all, SearchHit, SearchOutcome, SearchQuery};
use crate::service::calendar::{month_markers, task_stats, tasks_on, DayMarkers, TaskStats};
use crate::service::dashboard::DashboardSummary;
use crate::service::entity_store::EntityStore;
use crate::service::session_service::{SessionResult, SessionService};
use crate::view::{Screen, Section, ViewController};
use chrono::NaiveDate;
use log::{debug, info};

pub struct Desk<S: LocalStorage> {
    store: EntityStore,
    session: SessionService<S>,
    view: ViewController,
    query: SearchQuery,
    search: SearchOutcome,
}

/// Opens a desk whose session mirror lives in SQLite.
///
/// Uses `config.storage_path` when set, an in-memory database otherwise.
pub fn open_sqlite_desk(config: &DeskConfig) -> SessionResult<Desk<SqliteStorage>> {
    let storage = match config.storage_path.as_deref() {
        Some(path) => SqliteStorage::open(path)?,
        None => SqliteStorage::open_in_memory()?,
    };
    Desk::open(storage, config)
}

impl<S: LocalStorage> Desk<S> {
    /// Builds the desk and restores any stored session.
    pub fn open(storage: S, config: &DeskConfig) -> SessionResult<Self> {
        let store = if config.seed_sample_data {
            sample_store(today())
        } else {
            EntityStore::new()
        };
        let mut session = SessionService::new(storage, config.profile_save_delay);
        session.restore()?;

        info!(
            "event=desk_open module=desk status=ok seeded={} logged_in={}",
            config.seed_sample_data,
            session.is_logged_in()
        );

        Ok(Self {
            store,
            session,
            view: ViewController::new(),
            query: SearchQuery::new(String::new()),
            search: SearchOutcome::idle(),
        })
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn session(&self) -> &SessionService<S> {
        &self.session
    }

    pub fn view(&self) -> &ViewController {
        &self.view
    }

    pub fn screen(&self) -> Screen {
        self.view.screen(&self.session)
    }

    pub fn select_section(&mut self, section: Section) {
        self.leave_search();
        self.view.select(section);
        self.view.reconcile(&self.store);
    }

    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary::collect(&self.store)
    }

    // Notes

    pub fn add_note(&mut self, draft: NoteDraft) -> Option<Note> {
        let result = self.store.notes_mut().add(draft);
        self.settle("note_add", result)
    }

    pub fn update_note(&mut self, id: EntityId, patch: NotePatch) -> Option<Note> {
        let result = self.store.notes_mut().update(id, patch);
        self.settle("note_update", result)
    }

    pub fn remove_note(&mut self, id: EntityId) -> bool {
        let result = self.store.notes_mut().remove(id);
        self.settle("note_remove", result).is_some()
    }

    pub fn toggle_note_pin(&mut self, id: EntityId) -> Option<Note> {
        let result = self.store.notes_mut().toggle(id);
        self.settle("note_toggle_pin", result)
    }

    // Links

    pub fn add_link(&mut self, draft: LinkDraft) -> Option<Link> {
        let result = self.store.links_mut().add(draft);
        self.settle("link_add", result)
    }

    pub fn update_link(&mut self, id: EntityId, patch: LinkPatch) -> Option<Link> {
        let result = self.store.links_mut().update(id, patch);
        self.settle("link_update", result)
    }

    pub fn remove_link(&mut self, id: EntityId) -> bool {
        let result = self.store.links_mut().remove(id);
        self.settle("link_remove", result).is_some()
    }

    // Tasks

    pub fn add_task(&mut self, draft: TaskDraft) -> Option<Task> {
        let result = self.store.tasks_mut().add(draft);
        self.settle("task_add", result)
    }

    pub fn update_task(&mut self, id: EntityId, patch: TaskPatch) -> Option<Task> {
        let result = self.store.tasks_mut().update(id, patch);
        self.settle("task_update", result)
    }

    pub fn remove_task(&mut self, id: EntityId) -> bool {
        let result = self.store.tasks_mut().remove(id);
        self.settle("task_remove", result).is_some()
    }

    pub fn toggle_task(&mut self, id: EntityId) -> Option<Task> {
        let result = self.store.tasks_mut().toggle(id);
        self.settle("task_toggle", result)
    }

    pub fn tasks_on(&self, day: NaiveDate) -> Vec<&Task> {
        tasks_on(self.store.tasks().as_slice(), day)
    }

    pub fn month_markers(&self, year: i32, month: u32) -> Vec<DayMarkers> {
        month_markers(self.store.tasks().as_slice(), year, month)
    }

    pub fn task_stats(&self) -> TaskStats {
        task_stats(self.store.tasks().as_slice())
    }

    // Folders

    pub fn folders(&self) -> Vec<FolderSummary> {
        self.store.folder_summaries()
    }

    pub fn add_folder(&mut self, draft: FolderDraft) -> Option<Folder> {
        let result = self.store.add_folder(draft);
        self.settle("folder_add", result)
    }

    pub fn update_folder(&mut self, id: EntityId, patch: FolderPatch) -> Option<Folder> {
        let result = self.store.update_folder(id, patch);
        self.settle("folder_update", result)
    }

    pub fn remove_folder(&mut self, id: EntityId) -> bool {
        let result = self.store.remove_folder(id);
        let removed = self.settle("folder_remove", result).is_some();
        self.view.reconcile(&self.store);
        removed
    }

    /// Opens a folder's detail view. Unknown ids leave the view unchanged.
    pub fn open_folder(&mut self, id: EntityId) -> Option<FolderSummary> {
        let summary = self.store.folder_summary(id)?;
        self.leave_search();
        self.view.open_folder(id);
        Some(summary)
    }

    pub fn back_to_folders(&mut self) {
        self.leave_search();
        self.view.back_to_folders();
    }

    pub fn folder_items(&self, folder_id: EntityId) -> &[FolderItem] {
        self.store.folder_items().items(folder_id)
    }

    pub fn add_folder_item(
        &mut self,
        folder_id: EntityId,
        draft: FolderItemDraft,
    ) -> Option<FolderItem> {
        let result = self.store.add_folder_item(folder_id, draft);
        self.settle("folder_item_add", result)
    }

    pub fn update_folder_item(
        &mut self,
        folder_id: EntityId,
        item_id: EntityId,
        patch: FolderItemPatch,
    ) -> Option<FolderItem> {
        let result = self.store.update_folder_item(folder_id, item_id, patch);
        self.settle("folder_item_update", result)
    }

    pub fn remove_folder_item(&mut self, folder_id: EntityId, item_id: EntityId) -> bool {
        let result = self.store.remove_folder_item(folder_id, item_id);
        self.settle("folder_item_remove", result).is_some()
    }

    pub fn toggle_folder_task(
        &mut self,
        folder_id: EntityId,
        item_id: EntityId,
    ) -> Option<FolderItem> {
        let result = self.store.toggle_folder_task(folder_id, item_id);
        self.settle("folder_item_toggle_task", result)
    }

    pub fn toggle_folder_note_pin(
        &mut self,
        folder_id: EntityId,
        item_id: EntityId,
    ) -> Option<FolderItem> {
        let result = self.store.toggle_folder_note_pin(folder_id, item_id);
        self.settle("folder_item_toggle_pin", result)
    }

    // Search

    /// Runs a search over the live store. Any non-blank query shows the
    /// results screen, including an empty one.
    pub fn search(&mut self, text: impl Into<String>) -> &SearchOutcome {
        self.search_filtered(text, None)
    }

    /// Same as [`Desk::search`], restricted to one record type when `kind`
    /// is set. The filter sticks for refreshes after edits.
    pub fn search_filtered(
        &mut self,
        text: impl Into<String>,
        kind: Option<ItemKind>,
    ) -> &SearchOutcome {
        let mut query = SearchQuery::new(text);
        query.kind = kind;
        self.query = query;
        self.refresh_search();
        &self.search
    }

    pub fn search_outcome(&self) -> &SearchOutcome {
        &self.search
    }

    pub fn clear_search(&mut self) {
        self.leave_search();
    }

    /// Routes to the section of the hit at `index`. Out-of-range is a no-op.
    pub fn open_search_hit(&mut self, index: usize) -> Option<SearchHit> {
        let hit = self.search.hits.get(index).cloned()?;
        self.leave_search();
        self.view.open_search_hit(hit.kind());
        Some(hit)
    }

    // Session

    pub fn login(&mut self, user: UserProfile) -> SessionResult<&UserProfile> {
        self.session.login(user)
    }

    pub fn sign_up(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> SessionResult<&UserProfile> {
        self.session.sign_up(name, email)
    }

    pub fn logout(&mut self) -> SessionResult<()> {
        self.session.logout()?;
        self.leave_search();
        self.view.select(Section::Dashboard);
        Ok(())
    }

    pub fn delete_account(&mut self) -> SessionResult<()> {
        self.session.delete_account()?;
        self.leave_search();
        self.view.select(Section::Dashboard);
        Ok(())
    }

    pub async fn update_profile(&mut self, patch: ProfilePatch) -> SessionResult<UserProfile> {
        self.session.update_profile(patch).await
    }

    /// Profile merge without the simulated wait; see
    /// [`SessionService::apply_profile_patch`].
    pub fn apply_profile_patch(&mut self, patch: ProfilePatch) -> SessionResult<UserProfile> {
        self.session.apply_profile_patch(patch)
    }

    fn refresh_search(&mut self) {
        self.search = search_all(self.store.corpus(), &self.query);
        self.view.set_search_overlay(self.search.searching);
    }

    fn leave_search(&mut self) {
        self.query = SearchQuery::new(String::new());
        self.search = SearchOutcome::idle();
        self.view.set_search_overlay(false);
    }

    fn settle<T>(&mut self, event: &'static str, result: StoreResult<T>) -> Option<T> {
        match result {
            Ok(value) => {
                debug!("event={event} module=desk status=ok");
                if self.search.searching {
                    self.refresh_search();
                }
                Some(value)
            }
            Err(err) => {
                debug!("event={event} module=desk status=noop reason={err}");
                None
            }
        }
    }
}
