//! Case-insensitive substring search across notes, links and tasks.
//!
//! # Responsibility
//! - Match a query against the searchable fields of each collection.
//! - Return hits tagged with their origin type.
//!
//! # Invariants
//! - Blank queries return no hits and `searching = false`.
//! - Hit order is notes, then links, then tasks; inside each group the
//!   collection order is kept. No ranking, no deduplication.

use crate::model::entity::{EntityId, ItemKind};
use crate::model::link::Link;
use crate::model::note::Note;
use crate::model::task::Task;
use serde::Serialize;

/// Borrowed view of the collections a search runs over.
#[derive(Debug, Clone, Copy)]
pub struct SearchCorpus<'a> {
    pub notes: &'a [Note],
    pub links: &'a [Link],
    pub tasks: &'a [Task],
}

/// Search options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Raw user input. Only used trimmed for the blank check.
    pub text: String,
    /// Optional origin-type filter.
    pub kind: Option<ItemKind>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: None,
        }
    }

    pub fn only(mut self, kind: ItemKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn wants(&self, kind: ItemKind) -> bool {
        self.kind.map_or(true, |wanted| wanted == kind)
    }
}

/// One search hit, serialized as the record plus a `type` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchHit {
    Note(Note),
    Link(Link),
    Task(Task),
}

impl SearchHit {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Note(_) => ItemKind::Note,
            Self::Link(_) => ItemKind::Link,
            Self::Task(_) => ItemKind::Task,
        }
    }

    pub fn id(&self) -> EntityId {
        match self {
            Self::Note(note) => note.id,
            Self::Link(link) => link.id,
            Self::Task(task) => task.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Note(note) => &note.title,
            Self::Link(link) => &link.title,
            Self::Task(task) => &task.title,
        }
    }
}

/// Search result plus whether a search is active at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub searching: bool,
    pub hits: Vec<SearchHit>,
}

impl SearchOutcome {
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Runs a query over the corpus.
pub fn search_all(corpus: SearchCorpus<'_>, query: &SearchQuery) -> SearchOutcome {
    if query.is_blank() {
        return SearchOutcome::idle();
    }

    let needle = query.text.to_lowercase();
    let matches = |haystack: &str| haystack.to_lowercase().contains(&needle);
    let mut hits = Vec::new();

    if query.wants(ItemKind::Note) {
        hits.extend(
            corpus
                .notes
                .iter()
                .filter(|note| matches(&note.title) || matches(&note.content))
                .cloned()
                .map(SearchHit::Note),
        );
    }

    if query.wants(ItemKind::Link) {
        hits.extend(
            corpus
                .links
                .iter()
                .filter(|link| matches(&link.title) || matches(&link.description))
                .cloned()
                .map(SearchHit::Link),
        );
    }

    if query.wants(ItemKind::Task) {
        hits.extend(
            corpus
                .tasks
                .iter()
                .filter(|task| matches(&task.title))
                .cloned()
                .map(SearchHit::Task),
        );
    }

    SearchOutcome {
        searching: true,
        hits,
    }
}

#[cfg(test)]
mod tests {
    use super::{search_all, SearchCorpus, SearchQuery};

    #[test]
    fn empty_corpus_still_reports_searching() {
        let corpus = SearchCorpus {
            notes: &[],
            links: &[],
            tasks: &[],
        };
        let outcome = search_all(corpus, &SearchQuery::new("x"));
        assert!(outcome.searching);
        assert!(outcome.hits.is_empty());
    }

    #[test]
    fn whitespace_query_is_idle() {
        let corpus = SearchCorpus {
            notes: &[],
            links: &[],
            tasks: &[],
        };
        let outcome = search_all(corpus, &SearchQuery::new(" \t\n"));
        assert!(!outcome.searching);
    }
}
