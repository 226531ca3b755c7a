//! Presentation routing for the desk UI.
//!
//! # Responsibility
//! - Track the active section and the search-results overlay.
//! - Decide between auth surfaces and desk content from the session passed in.
//!
//! # Invariants
//! - Nothing but an auth surface is produced while logged out.
//! - `FolderDetail` never points at a folder that no longer exists once
//!   [`ViewController::reconcile`] ran.

use crate::model::entity::{EntityId, ItemKind};
use crate::repo::local_storage::LocalStorage;
use crate::service::entity_store::EntityStore;
use crate::service::session_service::{AuthSurface, SessionService};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Dashboard,
    Notes,
    Links,
    Tasks,
    Folders,
    Calendar,
    FolderDetail(EntityId),
}

impl Section {
    /// Section listing records of the given kind.
    pub fn for_kind(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Note => Self::Notes,
            ItemKind::Link => Self::Links,
            ItemKind::Task => Self::Tasks,
        }
    }
}

/// What the UI should render right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth(AuthSurface),
    SearchResults,
    Desk(Section),
}

#[derive(Debug, Clone, Default)]
pub struct ViewController {
    section: Section,
    search_overlay: bool,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn select(&mut self, section: Section) {
        self.section = section;
        self.search_overlay = false;
    }

    /// Shows search results over the section while a query is active.
    pub fn set_search_overlay(&mut self, visible: bool) {
        self.search_overlay = visible;
    }

    /// Routes a chosen search hit to its section and closes the overlay.
    pub fn open_search_hit(&mut self, kind: ItemKind) {
        self.select(Section::for_kind(kind));
    }

    pub fn open_folder(&mut self, folder_id: EntityId) {
        self.select(Section::FolderDetail(folder_id));
    }

    pub fn back_to_folders(&mut self) {
        self.select(Section::Folders);
    }

    /// Leaves a folder detail whose folder was removed.
    pub fn reconcile(&mut self, store: &EntityStore) {
        if let Section::FolderDetail(id) = self.section {
            if store.folders().get(id).is_none() {
                self.section = Section::Folders;
            }
        }
    }

    pub fn screen<S: LocalStorage>(&self, session: &SessionService<S>) -> Screen {
        if !session.is_logged_in() {
            return Screen::Auth(session.auth_surface());
        }
        if self.search_overlay {
            return Screen::SearchResults;
        }
        Screen::Desk(self.section)
    }
}

#[cfg(test)]
mod tests {
    use super::{Screen, Section, ViewController};
    use crate::model::entity::ItemKind;
    use crate::model::folder::FolderDraft;
    use crate::model::user::UserProfile;
    use crate::repo::local_storage::MemoryStorage;
    use crate::service::entity_store::EntityStore;
    use crate::service::session_service::{AuthSurface, SessionService};
    use std::time::Duration;

    fn session() -> SessionService<MemoryStorage> {
        SessionService::new(MemoryStorage::new(), Duration::ZERO)
    }

    #[test]
    fn logged_out_session_only_sees_auth_surface() {
        let mut view = ViewController::new();
        view.select(Section::Notes);
        view.set_search_overlay(true);

        assert_eq!(view.screen(&session()), Screen::Auth(AuthSurface::Login));
    }

    #[test]
    fn search_hit_routes_to_kind_section() {
        let mut session = session();
        session
            .login(UserProfile::new("Ada", "ada@example.com"))
            .unwrap();
        let mut view = ViewController::new();

        view.set_search_overlay(true);
        assert_eq!(view.screen(&session), Screen::SearchResults);

        view.open_search_hit(ItemKind::Link);
        assert_eq!(view.screen(&session), Screen::Desk(Section::Links));
    }

    #[test]
    fn removed_folder_detail_falls_back_to_folders() {
        let mut store = EntityStore::new();
        let folder = store
            .add_folder(FolderDraft::new("Inbox", ""))
            .unwrap();
        let mut view = ViewController::new();
        view.open_folder(folder.id);

        view.reconcile(&store);
        assert_eq!(view.section(), Section::FolderDetail(folder.id));

        store.remove_folder(folder.id).unwrap();
        view.reconcile(&store);
        assert_eq!(view.section(), Section::Folders);
    }
}
