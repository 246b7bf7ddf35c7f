//! Inverted index from lower-cased tokens to message identifiers.

use super::{Message, MessageId};
use std::collections::{BTreeMap, BTreeSet};

/// Splits text into lower-cased, whitespace-delimited tokens.
///
/// # Examples
///
/// ```
/// use backscroll::history::domain::tokenize;
///
/// let tokens = tokenize("Hello  big\tWORLD");
/// assert_eq!(tokens, ["hello", "big", "world"]);
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Token to message-id postings built over every merged message.
///
/// The index is additive only. Messages are indexed once, when first merged,
/// and no entry is ever removed for the lifetime of the session.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: BTreeMap<String, BTreeSet<MessageId>>,
}

impl InvertedIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every token of `message` to the index.
    pub fn index(&mut self, message: &Message) {
        for token in tokenize(message.text()) {
            self.postings
                .entry(token)
                .or_default()
                .insert(message.id().clone());
        }
    }

    /// Indexes a batch of messages.
    pub fn index_all<'a>(&mut self, messages: impl IntoIterator<Item = &'a Message>) {
        for message in messages {
            self.index(message);
        }
    }

    /// Returns the identifiers posted under exactly `token`.
    #[must_use]
    pub fn postings(&self, token: &str) -> Option<&BTreeSet<MessageId>> {
        self.postings.get(token)
    }

    /// Returns identifiers of every key that contains `needle` as a substring.
    ///
    /// Keys are visited in lexical order and identifiers may repeat across
    /// keys; callers dedupe.
    pub fn matching<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a MessageId> + 'a {
        self.postings
            .iter()
            .filter(move |(token, _)| token.contains(needle))
            .flat_map(|(_, ids)| ids.iter())
    }

    /// Returns the number of distinct tokens.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    /// Returns `true` when nothing has been indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}
