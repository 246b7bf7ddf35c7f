//! The ordered, deduplicated window of loaded messages.

use super::{Message, MessageId};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Contiguous slice of the remote log held in memory, oldest first.
///
/// # Invariants
///
/// - Message identifiers are unique within the window.
/// - Messages are sorted ascending by timestamp. Equal timestamps keep the
///   order in which the log produced them.
///
/// # Examples
///
/// ```
/// use backscroll::history::domain::{Message, MessageId, MessageWindow, UserId};
/// use chrono::{Duration, Utc};
///
/// let now = Utc::now();
/// let older = Message::new(MessageId::new("a"), UserId::new("u"), "first", now - Duration::seconds(5));
/// let newer = Message::new(MessageId::new("b"), UserId::new("u"), "second", now);
///
/// let mut window = MessageWindow::new();
/// window.prepend(vec![newer.clone()]);
/// let inserted = window.prepend(vec![older, newer]);
///
/// assert_eq!(inserted.len(), 1);
/// assert_eq!(window.len(), 2);
/// assert_eq!(window.oldest().map(Message::text), Some("first"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageWindow {
    messages: Vec<Message>,
    timestamps: HashMap<MessageId, DateTime<Utc>>,
}

impl MessageWindow {
    /// Creates an empty window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an older page at the front of the window.
    ///
    /// Messages whose identifier is already present are skipped. The batch is
    /// expected in ascending order and entirely older than the window; input
    /// that breaks either expectation is still placed in timestamp order.
    ///
    /// Returns the messages that were actually inserted, in ascending order.
    pub fn prepend(&mut self, batch: Vec<Message>) -> Vec<Message> {
        let mut fresh = self.take_unseen(batch);
        fresh.sort_by_key(Message::timestamp);
        if fresh.is_empty() {
            return fresh;
        }

        let existing = std::mem::take(&mut self.messages);
        let mut merged = Vec::with_capacity(existing.len() + fresh.len());
        let mut rest = existing.into_iter().peekable();
        for message in &fresh {
            while let Some(earlier) = rest.next_if(|m| m.timestamp() < message.timestamp()) {
                merged.push(earlier);
            }
            merged.push(message.clone());
        }
        merged.extend(rest);
        self.messages = merged;
        fresh
    }

    /// Inserts a newly appended message at the tail of the window.
    ///
    /// Returns `false` when the identifier is already present.
    pub fn append(&mut self, message: Message) -> bool {
        if !self.claim(&message) {
            return false;
        }
        let at = self
            .messages
            .partition_point(|m| m.timestamp() <= message.timestamp());
        self.messages.insert(at, message);
        true
    }

    /// Looks a message up by identifier.
    #[must_use]
    pub fn lookup(&self, id: &MessageId) -> Option<&Message> {
        let timestamp = *self.timestamps.get(id)?;
        let start = self
            .messages
            .partition_point(|m| m.timestamp() < timestamp);
        self.messages[start..]
            .iter()
            .take_while(|m| m.timestamp() == timestamp)
            .find(|m| m.id() == id)
    }

    /// Returns `true` when the identifier is loaded.
    #[must_use]
    pub fn contains(&self, id: &MessageId) -> bool {
        self.timestamps.contains_key(id)
    }

    /// Returns the loaded messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the oldest loaded message.
    #[must_use]
    pub fn oldest(&self) -> Option<&Message> {
        self.messages.first()
    }

    /// Returns the newest loaded message.
    #[must_use]
    pub fn newest(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Returns the timestamp span covered by the window.
    #[must_use]
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.oldest()?.timestamp(), self.newest()?.timestamp()))
    }

    /// Returns the number of loaded messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` when nothing has been loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drops messages already in the window, and repeats within the batch.
    fn take_unseen(&mut self, batch: Vec<Message>) -> Vec<Message> {
        batch
            .into_iter()
            .filter(|message| self.claim(message))
            .collect()
    }

    /// Records the identifier; `false` when it is already known.
    fn claim(&mut self, message: &Message) -> bool {
        match self.timestamps.entry(message.id().clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(message.timestamp());
                true
            }
        }
    }
}
