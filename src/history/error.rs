//! Error types for the history subsystem.
//!
//! Uses `thiserror` for typed variants. None of these reach the callers of
//! the page loader or jump resolver: the services log them and degrade to a
//! fail-soft outcome.

use std::sync::Arc;
use thiserror::Error;

/// Errors raised by a [`LogSource`](super::ports::LogSource).
#[derive(Debug, Clone, Error)]
pub enum LogSourceError {
    /// The log could not be reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// The log rejected the query.
    #[error("query error: {0}")]
    Query(String),

    /// Backend-specific failure.
    #[error("log backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl LogSourceError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }

    /// Wraps a backend error.
    #[must_use]
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}

/// Errors raised while loading or validating [`HistoryConfig`](super::config::HistoryConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value outside its accepted range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}
