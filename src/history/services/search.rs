//! Local search over the loaded window.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use super::MessageStore;
use crate::history::domain::{HighlightMarker, Highlighter, Message, SearchResult};

/// Resolves free-text queries against the store's index and window.
///
/// Matching is by case-insensitive substring. The index pass finds every
/// token containing the query; the fallback scan catches matches spanning or
/// splitting tokens. Results are deduplicated by identifier and ordered
/// newest first. The latest result list is kept as the active search until
/// cleared.
#[derive(Debug)]
pub struct SearchEngine {
    store: MessageStore,
    marker: HighlightMarker,
    active: RwLock<Option<Vec<SearchResult>>>,
}

impl SearchEngine {
    /// Creates a search engine over `store`.
    #[must_use]
    pub const fn new(store: MessageStore, marker: HighlightMarker) -> Self {
        Self {
            store,
            marker,
            active: RwLock::new(None),
        }
    }

    /// Runs `query` and makes the results the active search.
    ///
    /// A blank query clears the active search and returns no results.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            self.clear();
            return Vec::new();
        }
        let needle = query.to_lowercase();
        let highlighter = Highlighter::new(&needle, &self.marker);
        let results: Vec<SearchResult> = self
            .collect_matches(&needle)
            .into_iter()
            .map(|message| SearchResult::new(message, &highlighter))
            .collect();
        debug!(query = %needle, hits = results.len(), "search resolved");
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = Some(results.clone());
        results
    }

    /// Drops the active search.
    pub fn clear(&self) {
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Returns `true` while a search is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Returns the active results, empty when no search is active.
    #[must_use]
    pub fn results(&self) -> Vec<SearchResult> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_default()
    }

    fn collect_matches(&self, needle: &str) -> Vec<Message> {
        self.store.with_view(|window, index| {
            let mut seen = HashSet::new();
            let mut matches = Vec::new();

            for id in index.matching(needle) {
                if seen.contains(id) {
                    continue;
                }
                if let Some(message) = window.lookup(id) {
                    seen.insert(id.clone());
                    matches.push(message.clone());
                }
            }

            for message in window.messages() {
                if !seen.contains(message.id()) && message.text().to_lowercase().contains(needle) {
                    seen.insert(message.id().clone());
                    matches.push(message.clone());
                }
            }

            matches.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
            matches
        })
    }
}
