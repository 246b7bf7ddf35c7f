//! Tunables for pagination, search highlighting, and jumps.

use super::{domain::HighlightMarker, error::ConfigError};
use serde::Deserialize;

/// Configuration for a chat history session.
///
/// Every field has a default, so a partial JSON document only overrides
/// what it names.
///
/// # Examples
///
/// ```
/// use backscroll::history::config::HistoryConfig;
///
/// let config = HistoryConfig::default();
/// assert_eq!(config.batch_size, 20);
/// assert_eq!(config.max_jump_attempts, 10);
///
/// let tuned = HistoryConfig::from_json(r#"{ "batch_size": 50 }"#).expect("valid config");
/// assert_eq!(tuned.batch_size, 50);
/// assert_eq!(tuned.scroll_threshold_px, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Number of messages requested per page.
    pub batch_size: usize,
    /// Upper bound on `load_more` calls issued by one jump.
    pub max_jump_attempts: usize,
    /// Scroll offset from the top, in pixels, under which older pages load.
    pub scroll_threshold_px: u32,
    /// Markers wrapped around search matches.
    pub highlight: HighlightMarker,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            batch_size: 20,
            max_jump_attempts: 10,
            scroll_threshold_px: 50,
            highlight: HighlightMarker::default(),
        }
    }
}

impl HistoryConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidValue`] when validation fails.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the jump attempt bound.
    #[must_use]
    pub fn with_max_jump_attempts(mut self, attempts: usize) -> Self {
        self.max_jump_attempts = attempts;
        self
    }

    /// Sets the highlight markers.
    #[must_use]
    pub fn with_highlight(mut self, highlight: HighlightMarker) -> Self {
        self.highlight = highlight;
        self
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the page size or the jump
    /// attempt bound is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "batch_size",
                reason: "must be at least 1",
            });
        }
        if self.max_jump_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_jump_attempts",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
