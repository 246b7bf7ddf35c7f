//! Jump-to-message resolution.

use std::sync::Arc;

use tracing::{debug, info};

use super::{MessageStore, PageLoader, SearchEngine};
use crate::history::{
    domain::{JumpOutcome, LoadOutcome, MessageId},
    ports::{LogSource, RenderAdapter},
};

/// Locates a message, loading older pages until it appears.
///
/// The resolver makes at most `max_attempts` `load_more` calls per jump and
/// stops early when the target turns up or the log is exhausted. A call
/// refused because another load is in flight spends an attempt but is not
/// counted in the reported `loads`.
///
/// Finding the target scrolls to it, highlights it, and clears the active
/// search. The other outcomes change nothing.
pub struct JumpResolver<S, V>
where
    S: LogSource,
    V: RenderAdapter,
{
    loader: Arc<PageLoader<S, V>>,
    store: MessageStore,
    search: Arc<SearchEngine>,
    renderer: Arc<V>,
    max_attempts: usize,
}

impl<S, V> JumpResolver<S, V>
where
    S: LogSource,
    V: RenderAdapter,
{
    /// Creates a resolver driving `loader`.
    #[must_use]
    pub const fn new(
        loader: Arc<PageLoader<S, V>>,
        store: MessageStore,
        search: Arc<SearchEngine>,
        renderer: Arc<V>,
        max_attempts: usize,
    ) -> Self {
        Self {
            loader,
            store,
            search,
            renderer,
            max_attempts,
        }
    }

    /// Resolves a jump to `target`.
    pub async fn resolve(&self, target: &MessageId) -> JumpOutcome {
        let mut attempts = 0;
        let mut loads = 0;
        while !self.store.contains(target) {
            if self.loader.is_exhausted() {
                debug!(%target, loads, "jump target not in log");
                return JumpOutcome::Exhausted { loads };
            }
            if attempts >= self.max_attempts {
                debug!(%target, attempts, loads, "jump attempt bound reached");
                return JumpOutcome::AttemptsExceeded { loads };
            }
            let outcome = self.loader.load_more().await;
            attempts += 1;
            if !matches!(outcome, LoadOutcome::Busy) {
                loads += 1;
            }
            if outcome.is_exhausted() && !self.store.contains(target) {
                debug!(%target, loads, "jump target not in log");
                return JumpOutcome::Exhausted { loads };
            }
        }

        info!(%target, loads, "jump target located");
        self.renderer.scroll_to_message(target);
        self.renderer.highlight_message(target);
        self.search.clear();
        JumpOutcome::Found { loads }
    }
}
