//! Composition root wiring the pagination, search, jump, and read-state
//! components for one open room.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use super::{JumpResolver, LiveFeedHandle, MessageStore, PageLoader, SearchEngine};
use crate::history::{
    config::HistoryConfig,
    domain::{JumpOutcome, LoadOutcome, LogChange, MessageId, SearchResult, SessionContext},
    error::{ConfigError, LogSourceError},
    ports::{LogSource, RenderAdapter, RenderMode},
};
use crate::read_state::{ports::ReadStateRepository, services::ReadTracker};

/// One user's session on one room.
///
/// Owns the message store and hands it to every component, along with the
/// session context. UI events enter through the methods here: scrolling,
/// search input, result selection, focus changes, and live-feed changes.
pub struct ChatSession<S, R, V>
where
    S: LogSource,
    R: ReadStateRepository,
    V: RenderAdapter,
{
    session: SessionContext,
    config: HistoryConfig,
    source: Arc<S>,
    renderer: Arc<V>,
    store: MessageStore,
    loader: Arc<PageLoader<S, V>>,
    search: Arc<SearchEngine>,
    jumps: JumpResolver<S, V>,
    reads: ReadTracker<R>,
    active: AtomicBool,
}

impl<S, R, V> ChatSession<S, R, V>
where
    S: LogSource,
    R: ReadStateRepository,
    V: RenderAdapter,
{
    /// Wires a session.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when `config` fails validation.
    pub fn new(
        session: SessionContext,
        config: HistoryConfig,
        source: Arc<S>,
        read_states: Arc<R>,
        renderer: Arc<V>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let store = MessageStore::new();
        let loader = Arc::new(PageLoader::new(
            Arc::clone(&source),
            Arc::clone(&renderer),
            store.clone(),
            session.room().clone(),
            config.batch_size,
        ));
        let search = Arc::new(SearchEngine::new(store.clone(), config.highlight.clone()));
        let jumps = JumpResolver::new(
            Arc::clone(&loader),
            store.clone(),
            Arc::clone(&search),
            Arc::clone(&renderer),
            config.max_jump_attempts,
        );
        let reads = ReadTracker::new(read_states, store.clone(), session.clone());
        Ok(Self {
            session,
            config,
            source,
            renderer,
            store,
            loader,
            search,
            jumps,
            reads,
            active: AtomicBool::new(false),
        })
    }

    /// Loads the newest page and computes the unread count.
    pub async fn open(&self) -> LoadOutcome {
        let outcome = self.loader.load_initial().await;
        self.reads.compute_unread().await;
        outcome
    }

    /// Reacts to the view being scrolled to `scroll_top_px` from the top.
    ///
    /// Loads an older page when the offset is under the configured threshold,
    /// the log may hold more, and no load is running. Returns `None` when no
    /// load was attempted.
    pub async fn on_scroll(&self, scroll_top_px: u32) -> Option<LoadOutcome> {
        let near_top = scroll_top_px < self.config.scroll_threshold_px;
        if !near_top || self.loader.is_exhausted() || self.loader.is_loading() {
            return None;
        }
        Some(self.loader.load_more().await)
    }

    /// Loads the next older page.
    pub async fn load_more(&self) -> LoadOutcome {
        self.loader.load_more().await
    }

    /// Searches the loaded window; a blank query clears the search.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        self.search.search(query)
    }

    /// Returns the active search results.
    #[must_use]
    pub fn search_results(&self) -> Vec<SearchResult> {
        self.search.results()
    }

    /// Clears the active search.
    pub fn clear_search(&self) {
        self.search.clear();
    }

    /// Jumps to a message, loading older pages as needed.
    pub async fn jump_to(&self, target: &MessageId) -> JumpOutcome {
        self.jumps.resolve(target).await
    }

    /// Recomputes the unread count.
    pub async fn compute_unread(&self) -> usize {
        self.reads.compute_unread().await
    }

    /// Marks the room read.
    pub async fn mark_read(&self) -> bool {
        self.reads.mark_read().await
    }

    /// Returns the last computed unread count.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.reads.unread_count()
    }

    /// Records whether the room is in front of the user.
    ///
    /// Becoming active marks the room read.
    pub async fn set_active(&self, active: bool) {
        let was_active = self.active.swap(active, Ordering::AcqRel);
        if active && !was_active {
            self.reads.mark_read().await;
        }
    }

    /// Returns `true` while the room is in front of the user.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Applies one change from the live feed.
    ///
    /// Appended messages join the tail of the window and are rendered below;
    /// while the room is active, one from another sender marks the room read.
    /// Other change types are ignored. Returns `true` if a message was added.
    pub async fn handle_change(&self, change: LogChange) -> bool {
        let kind = change.kind();
        let Some(message) = change.into_added() else {
            debug!(room = %self.session.room(), kind, "ignoring live change");
            return false;
        };
        let from_other = message.is_from_other(self.session.user());
        let rendered = message.clone();
        if !self.store.append_live(message) {
            return false;
        }
        self.renderer
            .render_batch(std::slice::from_ref(&rendered), RenderMode::Append);
        if from_other && self.is_active() {
            self.reads.mark_read().await;
        }
        true
    }

    /// Returns the session context.
    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Returns the message store.
    #[must_use]
    pub const fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Returns the page loader.
    #[must_use]
    pub fn loader(&self) -> &PageLoader<S, V> {
        &self.loader
    }
}

impl<S, R, V> ChatSession<S, R, V>
where
    S: LogSource + 'static,
    R: ReadStateRepository + 'static,
    V: RenderAdapter + 'static,
{
    /// Subscribes to the room's live feed and applies changes as they come.
    ///
    /// # Errors
    ///
    /// Returns [`LogSourceError`] if the subscription cannot be opened.
    pub fn spawn_live_feed(self: &Arc<Self>) -> Result<LiveFeedHandle, LogSourceError> {
        let mut feed = self.source.subscribe(self.session.room())?;
        let session = Arc::clone(self);
        let task = tokio::spawn(async move {
            while let Some(change) = feed.next_change().await {
                session.handle_change(change).await;
            }
            debug!(room = %session.session.room(), "live feed closed");
        });
        Ok(LiveFeedHandle::new(task))
    }
}
