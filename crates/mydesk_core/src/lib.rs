//! Core domain logic for MyDesk.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod sample;
pub mod search;
pub mod service;
pub mod view;

pub use config::{ConfigError, DeskConfig};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::entity::{EntityId, ItemKind, ValidationError};
pub use model::folder::{Folder, FolderDraft, FolderPatch, FolderSummary};
pub use model::folder_item::{FolderItem, FolderItemBody, FolderItemDraft, FolderItemPatch};
pub use model::link::{Link, LinkDraft, LinkPatch, LINK_CATEGORIES};
pub use model::note::{Note, NoteDraft, NotePatch, NOTE_CATEGORIES};
pub use model::task::{Priority, Task, TaskDraft, TaskPatch};
pub use model::user::{ProfilePatch, UserProfile};
pub use repo::collection::{Collection, StoreError, StoreResult};
pub use repo::local_storage::{LocalStorage, MemoryStorage, SqliteStorage, StorageError};
pub use search::substring::{search_all, SearchHit, SearchOutcome, SearchQuery};
pub use service::desk::{open_sqlite_desk, Desk};
pub use service::entity_store::EntityStore;
pub use service::session_service::{
    AuthSurface, SessionError, SessionResult, SessionService, SessionState, USER_STORAGE_KEY,
};
pub use view::{Screen, Section, ViewController};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
