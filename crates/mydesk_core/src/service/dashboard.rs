//! Dashboard overview projections.
//!
//! # Responsibility
//! - Count notes, links, pending tasks and folders.
//! - Pick the most recent records and derive note previews from markdown.
//!
//! # Invariants
//! - "Recent" means collection order (newest first), capped at
//!   [`RECENT_LIMIT`].
//! - Previews never exceed [`PREVIEW_MAX_CHARS`] characters.

use crate::model::link::Link;
use crate::model::note::Note;
use crate::model::task::Task;
use crate::service::entity_store::EntityStore;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const RECENT_LIMIT: usize = 3;
pub const PREVIEW_MAX_CHARS: usize = 100;

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Plain-text projection of a markdown note body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarkdownPreview {
    pub text: Option<String>,
    /// First image path referenced by the body.
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteCard {
    pub note: Note,
    pub preview: MarkdownPreview,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub note_count: usize,
    pub link_count: usize,
    /// Tasks not yet completed.
    pub pending_task_count: usize,
    pub folder_count: usize,
    pub recent_notes: Vec<NoteCard>,
    pub recent_links: Vec<Link>,
    pub recent_tasks: Vec<Task>,
}

impl DashboardSummary {
    pub fn collect(store: &EntityStore) -> Self {
        Self {
            note_count: store.notes().len(),
            link_count: store.links().len(),
            pending_task_count: store.tasks().iter().filter(|task| !task.completed).count(),
            folder_count: store.folders().len(),
            recent_notes: store
                .notes()
                .iter()
                .take(RECENT_LIMIT)
                .map(|note| NoteCard {
                    note: note.clone(),
                    preview: derive_markdown_preview(&note.content),
                })
                .collect(),
            recent_links: store.links().iter().take(RECENT_LIMIT).cloned().collect(),
            recent_tasks: store.tasks().iter().take(RECENT_LIMIT).cloned().collect(),
        }
    }
}

/// Derives a note preview from markdown.
///
/// - `image`: first markdown image path.
/// - `text`: images dropped, links reduced to their label, markdown symbols
///   stripped, whitespace collapsed, first [`PREVIEW_MAX_CHARS`] chars kept.
pub fn derive_markdown_preview(content: &str) -> MarkdownPreview {
    let image = MARKDOWN_IMAGE_RE
        .captures(content)
        .and_then(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|value| !value.is_empty());

    let without_images = MARKDOWN_IMAGE_RE.replace_all(content, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    let text = if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    };

    MarkdownPreview { text, image }
}
