//! Unread bookkeeping for the open room.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, warn};

use crate::history::{domain::SessionContext, services::MessageStore};
use crate::read_state::{
    domain::{ReadStateKey, count_unread},
    ports::ReadStateRepository,
};

/// Tracks how many loaded messages the viewer has not read yet.
///
/// The count is derived from the message store and the remote last-read
/// instant; only the derived number is cached locally. Remote failures are
/// logged and leave the cached count unchanged.
pub struct ReadTracker<R>
where
    R: ReadStateRepository,
{
    repository: Arc<R>,
    store: MessageStore,
    session: SessionContext,
    key: ReadStateKey,
    unread: AtomicUsize,
}

impl<R> ReadTracker<R>
where
    R: ReadStateRepository,
{
    /// Creates a tracker for the session's (user, room) record.
    #[must_use]
    pub fn new(repository: Arc<R>, store: MessageStore, session: SessionContext) -> Self {
        let key = ReadStateKey::from(&session);
        Self {
            repository,
            store,
            session,
            key,
            unread: AtomicUsize::new(0),
        }
    }

    /// Recomputes the unread count from the window and the remote record.
    ///
    /// Returns the cached count when the record cannot be fetched.
    pub async fn compute_unread(&self) -> usize {
        let last_read = match self.repository.find(&self.key).await {
            Ok(record) => record.and_then(|state| state.last_read()),
            Err(error) => {
                warn!(room = %self.session.room(), %error, "failed to fetch read state");
                return self.unread_count();
            }
        };
        let count = self.store.with_view(|window, _| {
            count_unread(window.messages(), self.session.user(), last_read)
        });
        self.unread.store(count, Ordering::Release);
        debug!(room = %self.session.room(), count, "unread count updated");
        count
    }

    /// Marks the room read at the repository's current time.
    ///
    /// Resets the cached count to zero and returns `true` on success; a
    /// failed write is logged, changes nothing, and returns `false`.
    pub async fn mark_read(&self) -> bool {
        match self.repository.mark_read(&self.key).await {
            Ok(at) => {
                self.unread.store(0, Ordering::Release);
                debug!(room = %self.session.room(), %at, "room marked read");
                true
            }
            Err(error) => {
                warn!(room = %self.session.room(), %error, "failed to mark room read");
                false
            }
        }
    }

    /// Returns the last computed unread count.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.unread.load(Ordering::Acquire)
    }
}
