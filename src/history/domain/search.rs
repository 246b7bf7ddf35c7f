//! Search results and query highlighting.

use super::Message;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::debug;

/// Markers wrapped around each highlighted occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HighlightMarker {
    /// Text inserted before a match.
    pub open: String,
    /// Text inserted after a match.
    pub close: String,
}

impl Default for HighlightMarker {
    fn default() -> Self {
        Self {
            open: "<mark>".to_owned(),
            close: "</mark>".to_owned(),
        }
    }
}

impl HighlightMarker {
    /// Creates a marker pair.
    #[must_use]
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    fn replacement(&self) -> String {
        format!(
            "{}${{1}}{}",
            self.open.replace('$', "$$"),
            self.close.replace('$', "$$")
        )
    }
}

/// Highlighting for one query, with its pattern compiled once.
///
/// The query is used as a pattern without escaping, so pattern syntax in
/// the query is interpreted rather than matched literally. A query that is
/// not a valid pattern leaves every text unhighlighted.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
    replacement: String,
}

impl Highlighter {
    /// Compiles `query` for case-insensitive highlighting with `marker`.
    #[must_use]
    pub fn new(query: &str, marker: &HighlightMarker) -> Self {
        let pattern = match RegexBuilder::new(&format!("({query})"))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => Some(pattern),
            Err(error) => {
                debug!(%query, %error, "query is not a valid highlight pattern");
                None
            }
        };
        Self {
            pattern,
            replacement: marker.replacement(),
        }
    }

    /// Returns `true` when the query compiled to a pattern.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    /// Wraps every match in `text` in the markers.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        match &self.pattern {
            Some(pattern) if !text.is_empty() => pattern
                .replace_all(text, self.replacement.as_str())
                .into_owned(),
            _ => text.to_owned(),
        }
    }
}

/// Wraps every case-insensitive occurrence of `query` in `marker`.
///
/// Compiles the query on each call; use [`Highlighter`] to mark many texts
/// with the same query.
///
/// # Examples
///
/// ```
/// use backscroll::history::domain::{HighlightMarker, highlight};
///
/// let marked = highlight("Hello WORLD", "world", &HighlightMarker::default());
/// assert_eq!(marked, "Hello <mark>WORLD</mark>");
/// ```
#[must_use]
pub fn highlight(text: &str, query: &str, marker: &HighlightMarker) -> String {
    Highlighter::new(query, marker).apply(text)
}

/// A message matching a search, with its highlighted rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    message: Message,
    highlighted_text: String,
}

impl SearchResult {
    /// Builds a result, highlighting the message text with `highlighter`.
    #[must_use]
    pub fn new(message: Message, highlighter: &Highlighter) -> Self {
        let highlighted_text = highlighter.apply(message.text());
        Self {
            message,
            highlighted_text,
        }
    }

    /// Returns the matched message.
    #[must_use]
    pub const fn message(&self) -> &Message {
        &self.message
    }

    /// Returns the message text with highlight markers inserted.
    #[must_use]
    pub fn highlighted_text(&self) -> &str {
        &self.highlighted_text
    }
}
