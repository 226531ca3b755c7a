//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Flatten core records into plain DTOs with string ids and dates.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One process-wide desk backs every call; its session mirror lives in
//!   the SQLite file resolved once per process.
//! - `MYDESK_LOG_DIR` turns on file logging when that desk is first opened.
//! - Rejected edits come back as `ok=false` envelopes, never as errors.

use log::{info, warn};
use mydesk_core::{
    core_version as core_version_inner, init_from_config, init_logging as init_logging_inner,
    open_sqlite_desk, ping as ping_inner, AuthSurface, Desk, DeskConfig, EntityId, FolderDraft,
    FolderItem, FolderItemBody, FolderItemDraft, FolderItemPatch, FolderPatch, FolderSummary,
    ItemKind, Link, LinkDraft, LinkPatch, Note, NoteDraft, NotePatch, Priority, ProfilePatch,
    SearchHit, SqliteStorage, Task, TaskDraft, TaskPatch, UserProfile, LINK_CATEGORIES,
    NOTE_CATEGORIES,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;
use uuid::Uuid;

const DESK_DB_FILE_NAME: &str = "mydesk_local_storage.sqlite3";
const DATE_FORMAT: &str = "%Y-%m-%d";
static DESK: OnceLock<Mutex<Desk<SqliteStorage>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Note category picker options, `General` first.
#[flutter_rust_bridge::frb(sync)]
pub fn note_categories() -> Vec<String> {
    NOTE_CATEGORIES.iter().map(|name| name.to_string()).collect()
}

/// Link category picker options, `General` first.
#[flutter_rust_bridge::frb(sync)]
pub fn link_categories() -> Vec<String> {
    LINK_CATEGORIES.iter().map(|name| name.to_string()).collect()
}

/// Generic mutation envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the store changed.
    pub ok: bool,
    /// Id of the affected record.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: String) -> Self {
        Self {
            ok: true,
            id: Some(id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub pinned: bool,
    /// `YYYY-MM-DD`.
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkItem {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub completed: bool,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `low|medium|high`.
    pub priority: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub item_count: u32,
}

/// Folder item with the type-specific fields flattened to options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderItemEntry {
    pub id: String,
    /// `note|link|task`.
    pub kind: String,
    pub title: String,
    pub category: Option<String>,
    pub created_at: String,
    pub content: Option<String>,
    pub pinned: Option<bool>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    pub id: String,
    /// `note|link|task`, used to route to the matching section.
    pub kind: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
    /// `false` for blank queries.
    pub searching: bool,
    pub items: Vec<SearchItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardResponse {
    pub note_count: u32,
    pub link_count: u32,
    pub pending_task_count: u32,
    pub folder_count: u32,
    pub recent_notes: Vec<NoteItem>,
    /// Preview text per entry of `recent_notes`, empty when nothing is left
    /// after stripping markdown.
    pub recent_note_previews: Vec<String>,
    pub recent_links: Vec<LinkItem>,
    pub recent_tasks: Vec<TaskItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResponse {
    pub logged_in: bool,
    /// `login|signup` while logged out, empty otherwise.
    pub auth_surface: String,
    pub name: String,
    pub email: String,
    pub bio: String,
    pub avatar: String,
    pub initials: String,
    pub message: String,
}

impl From<&Note> for NoteItem {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.to_string(),
            title: note.title.clone(),
            content: note.content.clone(),
            category: note.category.clone(),
            pinned: note.pinned,
            created_at: note.created_at.format(DATE_FORMAT).to_string(),
        }
    }
}

impl From<&Link> for LinkItem {
    fn from(link: &Link) -> Self {
        Self {
            id: link.id.to_string(),
            title: link.title.clone(),
            url: link.url.clone(),
            description: link.description.clone(),
            category: link.category.clone(),
        }
    }
}

impl From<&Task> for TaskItem {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            title: task.title.clone(),
            completed: task.completed,
            date: task.date.format(DATE_FORMAT).to_string(),
            priority: task.priority.as_str().to_string(),
        }
    }
}

impl From<FolderSummary> for FolderEntry {
    fn from(summary: FolderSummary) -> Self {
        Self {
            id: summary.folder.id.to_string(),
            name: summary.folder.name,
            description: summary.folder.description,
            item_count: count(summary.item_count),
        }
    }
}

impl From<&FolderItem> for FolderItemEntry {
    fn from(item: &FolderItem) -> Self {
        let mut entry = Self {
            id: item.id.to_string(),
            kind: item.kind().as_str().to_string(),
            title: item.title.clone(),
            category: item.category.clone(),
            created_at: item.created_at.format(DATE_FORMAT).to_string(),
            content: None,
            pinned: None,
            url: None,
            description: None,
            completed: None,
            priority: None,
        };
        match &item.body {
            FolderItemBody::Note { content, pinned } => {
                entry.content = Some(content.clone());
                entry.pinned = Some(*pinned);
            }
            FolderItemBody::Link { url, description } => {
                entry.url = Some(url.clone());
                entry.description = Some(description.clone());
            }
            FolderItemBody::Task {
                completed,
                priority,
            } => {
                entry.completed = Some(*completed);
                entry.priority = Some(priority.as_str().to_string());
            }
        }
        entry
    }
}

impl From<&SearchHit> for SearchItem {
    fn from(hit: &SearchHit) -> Self {
        Self {
            id: hit.id().to_string(),
            kind: hit.kind().as_str().to_string(),
            title: hit.title().to_string(),
        }
    }
}

/// Dashboard counts and recent records.
///
/// # FFI contract
/// - Sync call, in-memory read.
/// - Never panics; returns zeroed counts when the desk cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn desk_dashboard() -> DashboardResponse {
    with_desk(|desk| {
        let summary = desk.dashboard();
        DashboardResponse {
            note_count: count(summary.note_count),
            link_count: count(summary.link_count),
            pending_task_count: count(summary.pending_task_count),
            folder_count: count(summary.folder_count),
            recent_note_previews: summary
                .recent_notes
                .iter()
                .map(|card| card.preview.text.clone().unwrap_or_default())
                .collect(),
            recent_notes: summary
                .recent_notes
                .iter()
                .map(|card| NoteItem::from(&card.note))
                .collect(),
            recent_links: summary.recent_links.iter().map(LinkItem::from).collect(),
            recent_tasks: summary.recent_tasks.iter().map(TaskItem::from).collect(),
        }
    })
    .unwrap_or_else(|err| {
        warn!("event=ffi_call module=ffi op=desk_dashboard status=error error={err}");
        DashboardResponse {
            note_count: 0,
            link_count: 0,
            pending_task_count: 0,
            folder_count: 0,
            recent_notes: Vec::new(),
            recent_note_previews: Vec::new(),
            recent_links: Vec::new(),
            recent_tasks: Vec::new(),
        }
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_notes() -> Vec<NoteItem> {
    with_desk(|desk| desk.store().notes().iter().map(NoteItem::from).collect())
        .unwrap_or_default()
}

/// Creates a note; blank title or content leaves the desk unchanged.
///
/// # FFI contract
/// - Sync call, in-memory write.
/// - `category=None` or blank falls back to `General`.
#[flutter_rust_bridge::frb(sync)]
pub fn add_note(title: String, content: String, category: Option<String>) -> ActionResponse {
    run_action("add_note", |desk| {
        let mut draft = NoteDraft::new(title, content);
        if let Some(category) = category {
            draft = draft.with_category(category);
        }
        Ok(desk.add_note(draft).map(|note| note.id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn update_note(
    id: String,
    title: Option<String>,
    content: Option<String>,
    category: Option<String>,
    pinned: Option<bool>,
) -> ActionResponse {
    run_action("update_note", |desk| {
        let patch = NotePatch {
            title,
            content,
            category,
            pinned,
        };
        Ok(desk.update_note(parse_id(&id)?, patch).map(|note| note.id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn remove_note(id: String) -> ActionResponse {
    run_action("remove_note", |desk| {
        let id = parse_id(&id)?;
        Ok(desk.remove_note(id).then_some(id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn toggle_note_pin(id: String) -> ActionResponse {
    run_action("toggle_note_pin", |desk| {
        Ok(desk.toggle_note_pin(parse_id(&id)?).map(|note| note.id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_links() -> Vec<LinkItem> {
    with_desk(|desk| desk.store().links().iter().map(LinkItem::from).collect())
        .unwrap_or_default()
}

/// Creates a link; blank title or url leaves the desk unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn add_link(
    title: String,
    url: String,
    description: String,
    category: Option<String>,
) -> ActionResponse {
    run_action("add_link", |desk| {
        let mut draft = LinkDraft::new(title, url).with_description(description);
        if let Some(category) = category {
            draft = draft.with_category(category);
        }
        Ok(desk.add_link(draft).map(|link| link.id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn update_link(
    id: String,
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    category: Option<String>,
) -> ActionResponse {
    run_action("update_link", |desk| {
        let patch = LinkPatch {
            title,
            url,
            description,
            category,
        };
        Ok(desk.update_link(parse_id(&id)?, patch).map(|link| link.id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn remove_link(id: String) -> ActionResponse {
    run_action("remove_link", |desk| {
        let id = parse_id(&id)?;
        Ok(desk.remove_link(id).then_some(id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_tasks() -> Vec<TaskItem> {
    with_desk(|desk| desk.store().tasks().iter().map(TaskItem::from).collect())
        .unwrap_or_default()
}

/// Tasks due on `date` (`YYYY-MM-DD`); empty for unparseable dates.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_on(date: String) -> Vec<TaskItem> {
    let Ok(day) = parse_date(&date) else {
        return Vec::new();
    };
    with_desk(|desk| desk.tasks_on(day).into_iter().map(TaskItem::from).collect())
        .unwrap_or_default()
}

/// Creates a task.
///
/// # FFI contract
/// - `priority`: `low|medium|high`, defaults to `medium`.
/// - `date`: `YYYY-MM-DD`, defaults to today.
#[flutter_rust_bridge::frb(sync)]
pub fn add_task(title: String, priority: Option<String>, date: Option<String>) -> ActionResponse {
    run_action("add_task", |desk| {
        let mut draft = TaskDraft::new(title);
        if let Some(raw) = priority.as_deref() {
            draft = draft.with_priority(parse_priority(raw)?);
        }
        if let Some(raw) = date.as_deref() {
            draft = draft.on(parse_date(raw)?);
        }
        Ok(desk.add_task(draft).map(|task| task.id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn update_task(
    id: String,
    title: Option<String>,
    completed: Option<bool>,
    date: Option<String>,
    priority: Option<String>,
) -> ActionResponse {
    run_action("update_task", |desk| {
        let patch = TaskPatch {
            title,
            completed,
            date: date.as_deref().map(parse_date).transpose()?,
            priority: priority.as_deref().map(parse_priority).transpose()?,
        };
        Ok(desk.update_task(parse_id(&id)?, patch).map(|task| task.id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn remove_task(id: String) -> ActionResponse {
    run_action("remove_task", |desk| {
        let id = parse_id(&id)?;
        Ok(desk.remove_task(id).then_some(id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn toggle_task(id: String) -> ActionResponse {
    run_action("toggle_task", |desk| {
        Ok(desk.toggle_task(parse_id(&id)?).map(|task| task.id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_folders() -> Vec<FolderEntry> {
    with_desk(|desk| desk.folders().into_iter().map(FolderEntry::from).collect())
        .unwrap_or_default()
}

#[flutter_rust_bridge::frb(sync)]
pub fn add_folder(name: String, description: String) -> ActionResponse {
    run_action("add_folder", |desk| {
        Ok(desk
            .add_folder(FolderDraft::new(name, description))
            .map(|folder| folder.id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn update_folder(
    id: String,
    name: Option<String>,
    description: Option<String>,
) -> ActionResponse {
    run_action("update_folder", |desk| {
        let patch = FolderPatch { name, description };
        Ok(desk
            .update_folder(parse_id(&id)?, patch)
            .map(|folder| folder.id))
    })
}

/// Removes a folder together with its items.
#[flutter_rust_bridge::frb(sync)]
pub fn remove_folder(id: String) -> ActionResponse {
    run_action("remove_folder", |desk| {
        let id = parse_id(&id)?;
        Ok(desk.remove_folder(id).then_some(id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_folder_items(folder_id: String) -> Vec<FolderItemEntry> {
    let Ok(folder_id) = parse_id(&folder_id) else {
        return Vec::new();
    };
    with_desk(|desk| {
        desk.folder_items(folder_id)
            .iter()
            .map(FolderItemEntry::from)
            .collect()
    })
    .unwrap_or_default()
}

/// Adds an item to a folder.
///
/// # FFI contract
/// - `kind`: `note|link|task`; only fields of that kind are stored.
/// - Unknown folder ids and blank titles return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn add_folder_item(
    folder_id: String,
    kind: String,
    title: String,
    content: String,
    url: String,
    description: String,
    priority: Option<String>,
) -> ActionResponse {
    run_action("add_folder_item", |desk| {
        let kind = parse_kind(&kind)?;
        let mut draft = FolderItemDraft::new(kind, title);
        draft.content = content;
        draft.url = url;
        draft.description = description;
        if let Some(raw) = priority.as_deref() {
            draft.priority = parse_priority(raw)?;
        }
        Ok(desk
            .add_folder_item(parse_id(&folder_id)?, draft)
            .map(|item| item.id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn update_folder_item(
    folder_id: String,
    item_id: String,
    title: Option<String>,
    content: Option<String>,
    url: Option<String>,
    description: Option<String>,
    priority: Option<String>,
) -> ActionResponse {
    run_action("update_folder_item", |desk| {
        let patch = FolderItemPatch {
            title,
            content,
            url,
            description,
            priority: priority.as_deref().map(parse_priority).transpose()?,
            ..FolderItemPatch::default()
        };
        Ok(desk
            .update_folder_item(parse_id(&folder_id)?, parse_id(&item_id)?, patch)
            .map(|item| item.id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn remove_folder_item(folder_id: String, item_id: String) -> ActionResponse {
    run_action("remove_folder_item", |desk| {
        let item_id = parse_id(&item_id)?;
        Ok(desk
            .remove_folder_item(parse_id(&folder_id)?, item_id)
            .then_some(item_id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn toggle_folder_task(folder_id: String, item_id: String) -> ActionResponse {
    run_action("toggle_folder_task", |desk| {
        Ok(desk
            .toggle_folder_task(parse_id(&folder_id)?, parse_id(&item_id)?)
            .map(|item| item.id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn toggle_folder_note_pin(folder_id: String, item_id: String) -> ActionResponse {
    run_action("toggle_folder_note_pin", |desk| {
        Ok(desk
            .toggle_folder_note_pin(parse_id(&folder_id)?, parse_id(&item_id)?)
            .map(|item| item.id))
    })
}

/// Case-insensitive substring search over notes, links and tasks.
///
/// Input semantics:
/// - `kind`: optional `note|link|task` filter; `None` searches all three.
///
/// # FFI contract
/// - Sync call, in-memory scan.
/// - Blank query returns `searching=false` and no items.
/// - Unknown `kind` returns `searching=false` with an error message.
#[flutter_rust_bridge::frb(sync)]
pub fn desk_search(query: String, kind: Option<String>) -> SearchResponse {
    let kind = match kind.as_deref().map(parse_kind).transpose() {
        Ok(kind) => kind,
        Err(err) => return search_failure(err),
    };
    match with_desk(|desk| desk.search_filtered(query, kind).clone()) {
        Ok(outcome) => {
            let items = outcome.hits.iter().map(SearchItem::from).collect::<Vec<_>>();
            let message = if !outcome.searching {
                String::new()
            } else if items.is_empty() {
                "No results.".to_string()
            } else {
                format!("Found {} result(s).", items.len())
            };
            SearchResponse {
                searching: outcome.searching,
                items,
                message,
            }
        }
        Err(err) => search_failure(err),
    }
}

fn search_failure(err: String) -> SearchResponse {
    SearchResponse {
        searching: false,
        items: Vec::new(),
        message: format!("desk_search failed: {err}"),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn session_state() -> SessionResponse {
    session_call("session_state", |_| Ok(()))
}

/// Mock login: any non-blank email is accepted.
#[flutter_rust_bridge::frb(sync)]
pub fn login(name: String, email: String) -> SessionResponse {
    session_call("login", |desk| {
        desk.login(UserProfile::new(name, email))
            .map(|_| ())
            .map_err(|err| err.to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn sign_up(name: String, email: String) -> SessionResponse {
    session_call("sign_up", |desk| {
        desk.sign_up(name, email)
            .map(|_| ())
            .map_err(|err| err.to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn logout() -> SessionResponse {
    session_call("logout", |desk| desk.logout().map_err(|err| err.to_string()))
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_account() -> SessionResponse {
    session_call("delete_account", |desk| {
        desk.delete_account().map_err(|err| err.to_string())
    })
}

/// Saves profile edits after the simulated save latency.
///
/// # FFI contract
/// - Async from Dart; waits `MYDESK_PROFILE_SAVE_DELAY_MS` on a worker
///   thread without holding the desk lock.
/// - `None` fields keep their stored value.
pub fn update_profile(
    name: Option<String>,
    email: Option<String>,
    bio: Option<String>,
    avatar: Option<String>,
) -> SessionResponse {
    let patch = ProfilePatch {
        name,
        email,
        bio,
        avatar,
        ..ProfilePatch::default()
    };
    match shared_desk() {
        Ok(desk) => save_profile(desk, patch, std::thread::sleep),
        Err(err) => session_failure(format!("update_profile failed: {err}")),
    }
}

/// Waits out the save delay unlocked, then merges and persists the patch.
///
/// The session is re-checked after the wait, so a logout in between turns
/// the save into a `NotLoggedIn` failure instead of resurrecting the user.
fn save_profile(
    desk: &Mutex<Desk<SqliteStorage>>,
    patch: ProfilePatch,
    wait: impl FnOnce(Duration),
) -> SessionResponse {
    let delay = match with_locked(desk, |desk| desk.session().save_delay()) {
        Ok(delay) => delay,
        Err(err) => return session_failure(format!("update_profile failed: {err}")),
    };
    wait(delay);

    session_call_on(desk, "update_profile", |desk| {
        desk.apply_profile_patch(patch)
            .map(|_| ())
            .map_err(|err| err.to_string())
    })
}

fn session_call(
    op: &'static str,
    f: impl FnOnce(&mut Desk<SqliteStorage>) -> Result<(), String>,
) -> SessionResponse {
    match shared_desk() {
        Ok(desk) => session_call_on(desk, op, f),
        Err(err) => session_failure(format!("{op} failed: {err}")),
    }
}

fn session_call_on(
    desk: &Mutex<Desk<SqliteStorage>>,
    op: &'static str,
    f: impl FnOnce(&mut Desk<SqliteStorage>) -> Result<(), String>,
) -> SessionResponse {
    let outcome = with_locked(desk, |desk| {
        let result = f(desk);
        (result, describe_session(desk))
    });
    match outcome {
        Ok((Ok(()), response)) => response,
        Ok((Err(err), mut response)) => {
            response.message = format!("{op} failed: {err}");
            response
        }
        Err(err) => session_failure(format!("{op} failed: {err}")),
    }
}

fn describe_session(desk: &Desk<SqliteStorage>) -> SessionResponse {
    let session = desk.session();
    match session.current_user() {
        Some(user) => SessionResponse {
            logged_in: true,
            auth_surface: String::new(),
            name: user.name.clone(),
            email: user.email.clone(),
            bio: user.bio.clone(),
            avatar: user.avatar.clone(),
            initials: user.initials(),
            message: String::new(),
        },
        None => {
            let mut response = session_failure(String::new());
            response.auth_surface = match session.auth_surface() {
                AuthSurface::Login => "login",
                AuthSurface::Signup => "signup",
            }
            .to_string();
            response
        }
    }
}

fn session_failure(message: String) -> SessionResponse {
    SessionResponse {
        logged_in: false,
        auth_surface: "login".to_string(),
        name: String::new(),
        email: String::new(),
        bio: String::new(),
        avatar: String::new(),
        initials: String::new(),
        message,
    }
}

fn run_action(
    op: &'static str,
    f: impl FnOnce(&mut Desk<SqliteStorage>) -> Result<Option<EntityId>, String>,
) -> ActionResponse {
    match with_desk(f).and_then(|result| result) {
        Ok(Some(id)) => ActionResponse::success(format!("{op} ok."), id.to_string()),
        Ok(None) => ActionResponse::failure(format!("{op}: nothing changed.")),
        Err(err) => {
            warn!("event=ffi_call module=ffi op={op} status=error error={err}");
            ActionResponse::failure(format!("{op} failed: {err}"))
        }
    }
}

fn with_desk<T>(f: impl FnOnce(&mut Desk<SqliteStorage>) -> T) -> Result<T, String> {
    with_locked(shared_desk()?, f)
}

fn with_locked<T>(
    desk: &Mutex<Desk<SqliteStorage>>,
    f: impl FnOnce(&mut Desk<SqliteStorage>) -> T,
) -> Result<T, String> {
    let mut guard = desk.lock().map_err(|_| "desk lock poisoned".to_string())?;
    Ok(f(&mut *guard))
}

fn shared_desk() -> Result<&'static Mutex<Desk<SqliteStorage>>, String> {
    if let Some(desk) = DESK.get() {
        return Ok(desk);
    }

    let config = resolve_desk_config()?;
    match init_from_config(&config) {
        Ok(true) => info!(
            "event=ffi_logging module=ffi status=ok level={}",
            config.log_level
        ),
        Ok(false) => {}
        Err(err) => warn!("event=ffi_logging module=ffi status=error error={err}"),
    }
    let opened = open_sqlite_desk(&config).map_err(|err| format!("desk open failed: {err}"))?;
    // A concurrent first call may win the race; its desk is used instead.
    let _ = DESK.set(Mutex::new(opened));
    DESK.get().ok_or_else(|| "desk unavailable".to_string())
}

fn resolve_desk_config() -> Result<DeskConfig, String> {
    let mut config = DeskConfig::from_env().map_err(|err| err.to_string())?;
    if config.storage_path.is_none() {
        config.storage_path = Some(default_storage_path());
    }
    Ok(config)
}

fn default_storage_path() -> PathBuf {
    std::env::temp_dir().join(DESK_DB_FILE_NAME)
}

fn parse_id(raw: &str) -> Result<EntityId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid id `{raw}`"))
}

fn parse_kind(raw: &str) -> Result<ItemKind, String> {
    ItemKind::parse(raw).ok_or_else(|| format!("unknown item kind `{raw}`"))
}

fn parse_priority(raw: &str) -> Result<Priority, String> {
    Priority::parse(raw).ok_or_else(|| format!("unknown priority `{raw}`"))
}

fn parse_date(raw: &str) -> Result<chrono::NaiveDate, String> {
    chrono::NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid date `{raw}`, expected YYYY-MM-DD"))
}

fn count(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        add_folder, add_folder_item, add_note, add_task, core_version, desk_search, init_logging,
        link_categories, list_folder_items, list_folders, list_notes, note_categories, ping,
        remove_folder_item, remove_note, save_profile, toggle_note_pin, update_note,
    };
    use mydesk_core::{
        Desk, DeskConfig, LocalStorage, ProfilePatch, SqliteStorage, UserProfile,
        USER_STORAGE_KEY,
    };
    use std::sync::Mutex;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn blank_note_is_rejected_without_error() {
        let before = list_notes().len();
        let response = add_note("  ".to_string(), "body".to_string(), None);
        assert!(!response.ok);
        assert!(response.id.is_none());
        assert!(list_notes().len() >= before);
    }

    #[test]
    fn created_note_is_searchable_and_toggles() {
        let token = unique_token("ffi-note");
        let created = add_note(token.clone(), "body".to_string(), Some("OS".to_string()));
        assert!(created.ok, "{}", created.message);
        let id = created.id.expect("created note should return id");

        let response = desk_search(token.to_uppercase(), None);
        assert!(response.searching);
        assert!(response
            .items
            .iter()
            .any(|item| item.id == id && item.kind == "note"));

        assert!(toggle_note_pin(id.clone()).ok);
        let pinned = list_notes().into_iter().find(|note| note.id == id).unwrap();
        assert!(pinned.pinned);
        assert_eq!(pinned.category, "OS");

        let renamed = update_note(id.clone(), Some(String::new()), None, None, None);
        assert!(!renamed.ok);

        assert!(remove_note(id.clone()).ok);
        assert!(!remove_note(id).ok);
    }

    #[test]
    fn blank_search_is_not_searching() {
        let response = desk_search("   ".to_string(), None);
        assert!(!response.searching);
        assert!(response.items.is_empty());
    }

    #[test]
    fn search_kind_filter_is_applied_and_validated() {
        let token = unique_token("ffi-kind");
        assert!(add_note(token.clone(), "body".to_string(), None).ok);
        assert!(add_task(token.clone(), None, None).ok);

        let tasks_only = desk_search(token.clone(), Some("Task".to_string()));
        assert!(tasks_only.searching);
        assert_eq!(tasks_only.items.len(), 1);
        assert_eq!(tasks_only.items[0].kind, "task");

        let everything = desk_search(token.clone(), None);
        assert_eq!(everything.items.len(), 2);

        let rejected = desk_search(token, Some("folder".to_string()));
        assert!(!rejected.searching);
        assert!(rejected.message.contains("folder"));
    }

    #[test]
    fn category_lists_start_with_general() {
        let notes = note_categories();
        assert_eq!(notes[0], "General");
        assert!(notes.iter().any(|name| name == "DBMS"));

        let links = link_categories();
        assert_eq!(links[0], "General");
        assert!(links.iter().any(|name| name == "Daily Use"));
    }

    #[test]
    fn profile_save_waits_then_persists() {
        let desk = logged_in_desk(Duration::from_millis(40));
        let mut waited = None;

        let response = save_profile(&desk, bio_patch("compiler nerd"), |delay| {
            waited = Some(delay)
        });

        assert_eq!(waited, Some(Duration::from_millis(40)));
        assert!(response.logged_in);
        assert!(response.message.is_empty(), "{}", response.message);
        assert_eq!(response.bio, "compiler nerd");
        assert_eq!(response.name, "Ada Lovelace");

        let guard = desk.lock().unwrap();
        let stored = guard
            .session()
            .storage()
            .get_item(USER_STORAGE_KEY)
            .unwrap()
            .expect("user record should be stored");
        assert!(stored.contains("compiler nerd"));
    }

    #[test]
    fn logout_during_profile_save_is_not_undone() {
        let desk = logged_in_desk(Duration::ZERO);

        let response = save_profile(&desk, bio_patch("too late"), |_| {
            desk.lock().unwrap().logout().unwrap();
        });

        assert!(!response.logged_in);
        assert!(response.message.contains("no active session"), "{}", response.message);
        let guard = desk.lock().unwrap();
        assert!(guard.session().current_user().is_none());
        assert_eq!(
            guard.session().storage().get_item(USER_STORAGE_KEY).unwrap(),
            None
        );
    }

    #[test]
    fn invalid_inputs_return_failure_envelopes() {
        assert!(!remove_note("not-a-uuid".to_string()).ok);
        let bad_priority = add_task("t".to_string(), Some("urgent".to_string()), None);
        assert!(bad_priority.message.contains("urgent"));
        let bad_date = add_task("t".to_string(), None, Some("16/10/2026".to_string()));
        assert!(!bad_date.ok);
    }

    #[test]
    fn folder_item_count_follows_items() {
        let folder = add_folder(unique_token("ffi-folder"), String::new());
        let folder_id = folder.id.expect("folder id");
        let count = || {
            list_folders()
                .into_iter()
                .find(|entry| entry.id == folder_id)
                .map(|entry| entry.item_count)
        };
        assert_eq!(count(), Some(0));

        let item = add_folder_item(
            folder_id.clone(),
            "link".to_string(),
            "Docs".to_string(),
            "ignored content".to_string(),
            "https://docs.rs".to_string(),
            String::new(),
            None,
        );
        assert!(item.ok, "{}", item.message);
        assert_eq!(count(), Some(1));

        let entries = list_folder_items(folder_id.clone());
        assert_eq!(entries[0].kind, "link");
        assert_eq!(entries[0].content, None);
        assert_eq!(entries[0].url.as_deref(), Some("https://docs.rs"));

        assert!(remove_folder_item(folder_id.clone(), item.id.unwrap()).ok);
        assert_eq!(count(), Some(0));
    }

    fn logged_in_desk(save_delay: Duration) -> Mutex<Desk<SqliteStorage>> {
        let config = DeskConfig {
            profile_save_delay: save_delay,
            ..DeskConfig::default()
        };
        let storage = SqliteStorage::open_in_memory().unwrap();
        let mut desk = Desk::open(storage, &config).unwrap();
        desk.login(UserProfile::new("Ada Lovelace", "ada@example.com"))
            .unwrap();
        Mutex::new(desk)
    }

    fn bio_patch(bio: &str) -> ProfilePatch {
        ProfilePatch {
            bio: Some(bio.to_string()),
            ..ProfilePatch::default()
        }
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
