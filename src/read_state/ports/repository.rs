//! Repository port for remote read-state records.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::read_state::domain::{ReadState, ReadStateKey};

/// Result type for read-state repository operations.
pub type ReadStateResult<T> = Result<T, ReadStateError>;

/// Remote store of read-state records keyed by (user, room).
///
/// Writes are merges: marking read touches only `lastRead` and never
/// replaces the record wholesale. Records are never deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReadStateRepository: Send + Sync {
    /// Fetches the record for `key`.
    ///
    /// Returns `None` until the first mark.
    ///
    /// # Errors
    ///
    /// Returns [`ReadStateError`] when the store cannot be queried.
    async fn find(&self, key: &ReadStateKey) -> ReadStateResult<Option<ReadState>>;

    /// Stamps the store's current time as the record's last-read instant.
    ///
    /// Creates the record on first use. Returns the instant written.
    ///
    /// # Errors
    ///
    /// Returns [`ReadStateError`] when the write fails.
    async fn mark_read(&self, key: &ReadStateKey) -> ReadStateResult<DateTime<Utc>>;
}

/// Errors returned by read-state repositories.
#[derive(Debug, Clone, Error)]
pub enum ReadStateError {
    /// The store could not be reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReadStateError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
