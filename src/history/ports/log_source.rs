//! Port for the remote, append-only message log.
//!
//! The log is queried newest-first with a page size and an exclusive
//! cursor, and observed through a live change feed.

use crate::history::{
    domain::{Cursor, LogChange, Message, RoomId},
    error::LogSourceError,
};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Result type for log source operations.
pub type LogSourceResult<T> = Result<T, LogSourceError>;

/// Parameters of a single page query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    limit: usize,
    before: Option<Cursor>,
}

impl PageRequest {
    /// Requests the newest `limit` messages.
    #[must_use]
    pub const fn newest(limit: usize) -> Self {
        Self {
            limit,
            before: None,
        }
    }

    /// Requests up to `limit` messages strictly older than `cursor`.
    #[must_use]
    pub const fn older_than(cursor: Cursor, limit: usize) -> Self {
        Self {
            limit,
            before: Some(cursor),
        }
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the exclusive cursor, if any.
    #[must_use]
    pub const fn before(&self) -> Option<&Cursor> {
        self.before.as_ref()
    }
}

/// Receiving end of a room's live change feed.
///
/// Dropping the feed unsubscribes it; the source prunes closed feeds on its
/// next delivery.
#[derive(Debug)]
pub struct ChangeFeed {
    receiver: mpsc::UnboundedReceiver<LogChange>,
}

impl ChangeFeed {
    /// Creates a connected sender and feed pair.
    #[must_use]
    pub fn channel() -> (mpsc::UnboundedSender<LogChange>, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (sender, Self { receiver })
    }

    /// Waits for the next change. Returns `None` once the source hangs up.
    pub async fn next_change(&mut self) -> Option<LogChange> {
        self.receiver.recv().await
    }
}

/// Remote ordered log of message records.
///
/// # Implementation Notes
///
/// Implementations must:
/// - Return pages newest-first in a stable total order (timestamp, then
///   insertion order), so consecutive pages neither overlap nor leave gaps
/// - Treat the cursor as exclusive: the anchor message is never returned again
/// - Deliver change events in the same ordering domain as the paged query
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Fetches one page of messages, newest first.
    ///
    /// An empty page means no older messages remain.
    ///
    /// # Errors
    ///
    /// Returns [`LogSourceError`] when the log cannot be queried.
    async fn fetch_page(
        &self,
        room: &RoomId,
        request: &PageRequest,
    ) -> LogSourceResult<Vec<Message>>;

    /// Subscribes to changes appended to the room's log from now on.
    ///
    /// # Errors
    ///
    /// Returns [`LogSourceError`] when the subscription cannot be opened.
    fn subscribe(&self, room: &RoomId) -> LogSourceResult<ChangeFeed>;
}
