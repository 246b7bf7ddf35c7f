//! Backward pagination over the remote log.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use super::MessageStore;
use crate::history::{
    domain::{Cursor, LoadOutcome, Message, RoomId},
    ports::{LogSource, PageRequest, RenderAdapter, RenderMode},
};

/// Releases the in-flight flag when dropped, whatever way the load ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Loads pages of the room's log, newest first, into the message store.
///
/// At most one load runs at a time: a call made while another is in flight
/// returns [`LoadOutcome::Busy`] without touching the log. Once the log
/// returns an empty page the loader is exhausted for good and issues no
/// further requests. Transport failures are logged and reported as
/// [`LoadOutcome::Failed`]; nothing is retried.
pub struct PageLoader<S, V>
where
    S: LogSource,
    V: RenderAdapter,
{
    source: Arc<S>,
    renderer: Arc<V>,
    store: MessageStore,
    room: RoomId,
    batch_size: usize,
    cursor: Mutex<Option<Cursor>>,
    in_flight: AtomicBool,
    exhausted: AtomicBool,
    requests: AtomicUsize,
}

impl<S, V> PageLoader<S, V>
where
    S: LogSource,
    V: RenderAdapter,
{
    /// Creates a loader for `room` feeding `store`.
    #[must_use]
    pub fn new(
        source: Arc<S>,
        renderer: Arc<V>,
        store: MessageStore,
        room: RoomId,
        batch_size: usize,
    ) -> Self {
        Self {
            source,
            renderer,
            store,
            room,
            batch_size,
            cursor: Mutex::new(None),
            in_flight: AtomicBool::new(false),
            exhausted: AtomicBool::new(false),
            requests: AtomicUsize::new(0),
        }
    }

    /// Loads the newest page of the log.
    pub async fn load_initial(&self) -> LoadOutcome {
        self.load(PageRequest::newest(self.batch_size)).await
    }

    /// Loads the page immediately older than the cursor.
    ///
    /// Without a cursor (nothing loaded yet) this requests the newest page.
    pub async fn load_more(&self) -> LoadOutcome {
        let request = match self.cursor() {
            Some(cursor) => PageRequest::older_than(cursor, self.batch_size),
            None => PageRequest::newest(self.batch_size),
        };
        self.load(request).await
    }

    /// Returns `true` once the log has reported that nothing older remains.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted.load(Ordering::Acquire)
    }

    /// Returns `true` while a load is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Returns the current cursor.
    #[must_use]
    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns how many remote page requests have been issued.
    #[must_use]
    pub fn requests_issued(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    async fn load(&self, request: PageRequest) -> LoadOutcome {
        if self.is_exhausted() {
            debug!(room = %self.room, "log exhausted; skipping page request");
            return LoadOutcome::Exhausted;
        }
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            debug!(room = %self.room, "page load already in flight");
            return LoadOutcome::Busy;
        };

        self.requests.fetch_add(1, Ordering::Relaxed);
        let page = match self.source.fetch_page(&self.room, &request).await {
            Ok(page) => page,
            Err(error) => {
                warn!(room = %self.room, %error, "failed to load messages");
                return LoadOutcome::Failed;
            }
        };

        if page.is_empty() {
            self.exhausted.store(true, Ordering::Release);
            debug!(room = %self.room, "log returned an empty page; no older messages");
            return LoadOutcome::Exhausted;
        }

        LoadOutcome::Loaded(self.absorb(page))
    }

    /// Reverses a newest-first page, advances the cursor, and merges it.
    fn absorb(&self, mut page: Vec<Message>) -> Vec<Message> {
        page.reverse();
        if let Some(oldest) = page.first() {
            self.advance_cursor(Cursor::at(oldest));
        }
        let inserted = self.store.merge(page);
        debug!(room = %self.room, count = inserted.len(), "merged page");
        if !inserted.is_empty() {
            self.renderer.render_batch(&inserted, RenderMode::Prepend);
        }
        inserted
    }

    /// Moves the cursor, never forward in time.
    fn advance_cursor(&self, candidate: Cursor) {
        let mut cursor = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
        let moves_back = cursor
            .as_ref()
            .is_none_or(|current| candidate.timestamp() <= current.timestamp());
        if moves_back {
            *cursor = Some(candidate);
        }
    }
}
