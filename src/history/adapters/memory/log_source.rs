//! In-memory implementation of the `LogSource` port.
//!
//! Keeps one ordered log per room and fans appended records out to live
//! subscribers. Suitable for tests and local composition; nothing persists.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use crate::history::{
    domain::{LogChange, Message, MessageId, RoomId, UserId},
    error::LogSourceError,
    ports::{ChangeFeed, LogSource, LogSourceResult, PageRequest},
};

#[derive(Debug, Default)]
struct RoomLog {
    /// Ascending by timestamp; equal timestamps in append order.
    entries: Vec<Message>,
    subscribers: Vec<mpsc::UnboundedSender<LogChange>>,
}

impl RoomLog {
    fn publish(&mut self, change: &LogChange) {
        self.subscribers
            .retain(|subscriber| subscriber.send(change.clone()).is_ok());
    }

    /// Index one past the newest entry strictly older than the request cursor.
    fn end_of_page(&self, request: &PageRequest) -> usize {
        let Some(cursor) = request.before() else {
            return self.entries.len();
        };
        self.entries
            .iter()
            .position(|m| m.id() == cursor.anchor())
            .unwrap_or_else(|| {
                self.entries
                    .partition_point(|m| m.timestamp() < cursor.timestamp())
            })
    }
}

#[derive(Debug, Default)]
struct LogState {
    rooms: HashMap<RoomId, RoomLog>,
    pending_failures: usize,
}

/// In-memory implementation of [`LogSource`].
///
/// Thread-safe via internal [`RwLock`]. Counts page requests and can be
/// told to fail upcoming requests, which makes pagination behaviour
/// observable in tests.
///
/// # Example
///
/// ```
/// use backscroll::history::adapters::memory::InMemoryLogSource;
/// use backscroll::history::domain::{RoomId, UserId};
/// use chrono::Utc;
///
/// let source = InMemoryLogSource::new();
/// let room = RoomId::new("lobby");
/// source
///     .post(&room, UserId::new("ada"), "hello", Utc::now())
///     .expect("append succeeds");
/// assert_eq!(source.len(&room), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryLogSource {
    state: Arc<RwLock<LogState>>,
    requests: Arc<AtomicUsize>,
}

impl InMemoryLogSource {
    /// Creates a source with no rooms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record to the room's log and notifies subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`LogSourceError::Query`] if the identifier already exists in
    /// the room, or [`LogSourceError::Connection`] if the lock is poisoned.
    pub fn append(&self, room: &RoomId, message: Message) -> LogSourceResult<()> {
        let mut guard = self
            .state
            .write()
            .map_err(|e| LogSourceError::connection(format!("lock poisoned: {e}")))?;
        let log = guard.rooms.entry(room.clone()).or_default();
        if log.entries.iter().any(|m| m.id() == message.id()) {
            return Err(LogSourceError::query(format!(
                "message {} already exists in room {room}",
                message.id()
            )));
        }
        let at = log
            .entries
            .partition_point(|m| m.timestamp() <= message.timestamp());
        log.entries.insert(at, message.clone());
        log.publish(&LogChange::Added(message));
        Ok(())
    }

    /// Appends a text record with a generated identifier.
    ///
    /// # Errors
    ///
    /// See [`InMemoryLogSource::append`].
    pub fn post(
        &self,
        room: &RoomId,
        sender: UserId,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> LogSourceResult<Message> {
        let message = Message::new(MessageId::generate(), sender, text, timestamp);
        self.append(room, message.clone())?;
        Ok(message)
    }

    /// Rewrites an existing record in place and notifies subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`LogSourceError::Query`] if the record does not exist, or
    /// [`LogSourceError::Connection`] if the lock is poisoned.
    pub fn modify(&self, room: &RoomId, message: Message) -> LogSourceResult<()> {
        let mut guard = self
            .state
            .write()
            .map_err(|e| LogSourceError::connection(format!("lock poisoned: {e}")))?;
        let log = guard
            .rooms
            .get_mut(room)
            .ok_or_else(|| LogSourceError::query(format!("unknown room {room}")))?;
        let slot = log
            .entries
            .iter_mut()
            .find(|m| m.id() == message.id())
            .ok_or_else(|| LogSourceError::query(format!("unknown message {}", message.id())))?;
        *slot = message.clone();
        log.publish(&LogChange::Modified(message));
        Ok(())
    }

    /// Makes the next `count` page requests fail with a connection error.
    pub fn fail_next(&self, count: usize) {
        if let Ok(mut guard) = self.state.write() {
            guard.pending_failures = count;
        }
    }

    /// Returns how many page requests have been received.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Returns the number of records in the room's log.
    ///
    /// Returns `0` if the room is unknown or the lock is poisoned.
    #[must_use]
    pub fn len(&self, room: &RoomId) -> usize {
        self.state
            .read()
            .map(|guard| guard.rooms.get(room).map_or(0, |log| log.entries.len()))
            .unwrap_or(0)
    }

    /// Returns `true` if the room's log holds no records.
    #[must_use]
    pub fn is_empty(&self, room: &RoomId) -> bool {
        self.len(room) == 0
    }
}

#[async_trait]
impl LogSource for InMemoryLogSource {
    async fn fetch_page(
        &self,
        room: &RoomId,
        request: &PageRequest,
    ) -> LogSourceResult<Vec<Message>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let mut guard = self
            .state
            .write()
            .map_err(|e| LogSourceError::connection(format!("lock poisoned: {e}")))?;

        if guard.pending_failures > 0 {
            guard.pending_failures -= 1;
            return Err(LogSourceError::connection("injected failure"));
        }

        let Some(log) = guard.rooms.get(room) else {
            return Ok(Vec::new());
        };
        let end = log.end_of_page(request);
        let start = end.saturating_sub(request.limit());
        Ok(log
            .entries
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .rev()
            .cloned()
            .collect())
    }

    fn subscribe(&self, room: &RoomId) -> LogSourceResult<ChangeFeed> {
        let mut guard = self
            .state
            .write()
            .map_err(|e| LogSourceError::connection(format!("lock poisoned: {e}")))?;
        let (sender, feed) = ChangeFeed::channel();
        guard.rooms.entry(room.clone()).or_default().subscribers.push(sender);
        Ok(feed)
    }
}
