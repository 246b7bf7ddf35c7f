//! Shared handle over the loaded window and its search index.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::history::domain::{InvertedIndex, Message, MessageId, MessageWindow};

#[derive(Debug, Default)]
struct StoreState {
    window: MessageWindow,
    index: InvertedIndex,
}

/// The message store: window and inverted index updated together.
///
/// Cloning the store clones the handle; all clones see the same window.
/// Every insertion indexes the newly inserted messages under the same
/// write lock, so a reader never sees a message the index does not know.
///
/// # Examples
///
/// ```
/// use backscroll::history::domain::{Message, MessageId, UserId};
/// use backscroll::history::services::MessageStore;
/// use chrono::Utc;
///
/// let store = MessageStore::new();
/// let message = Message::new(MessageId::new("m1"), UserId::new("bob"), "hi there", Utc::now());
/// store.merge(vec![message.clone(), message]);
///
/// assert_eq!(store.len(), 1);
/// assert!(store.lookup(&MessageId::new("m1")).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    state: Arc<RwLock<StoreState>>,
}

impl MessageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges an older page at the front of the window and indexes it.
    ///
    /// Returns the newly inserted messages, oldest first.
    pub fn merge(&self, batch: Vec<Message>) -> Vec<Message> {
        let mut state = self.write();
        let inserted = state.window.prepend(batch);
        state.index.index_all(&inserted);
        inserted
    }

    /// Appends a live message at the tail of the window and indexes it.
    ///
    /// Returns `false` if the message was already loaded.
    pub fn append_live(&self, message: Message) -> bool {
        let mut state = self.write();
        if state.window.contains(message.id()) {
            return false;
        }
        state.index.index(&message);
        state.window.append(message)
    }

    /// Returns a copy of the message with identifier `id`.
    #[must_use]
    pub fn lookup(&self, id: &MessageId) -> Option<Message> {
        self.read().window.lookup(id).cloned()
    }

    /// Returns `true` if the identifier is loaded.
    #[must_use]
    pub fn contains(&self, id: &MessageId) -> bool {
        self.read().window.contains(id)
    }

    /// Returns the number of loaded messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().window.len()
    }

    /// Returns `true` when nothing is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().window.is_empty()
    }

    /// Returns a copy of the window, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Message> {
        self.read().window.messages().to_vec()
    }

    /// Runs `f` against the window and index under one read lock.
    pub fn with_view<T>(&self, f: impl FnOnce(&MessageWindow, &InvertedIndex) -> T) -> T {
        let state = self.read();
        f(&state.window, &state.index)
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
