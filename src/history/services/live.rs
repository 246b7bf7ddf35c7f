//! Cancellation handle for a running live-feed listener.

use tokio::task::JoinHandle;

/// Handle to the task draining a room's change feed.
///
/// Cancelling, or dropping the handle, stops the listener; the feed is
/// dropped with it, which unsubscribes from the source.
#[derive(Debug)]
pub struct LiveFeedHandle {
    task: JoinHandle<()>,
}

impl LiveFeedHandle {
    pub(crate) const fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    /// Stops the listener.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Returns `true` once the listener has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for LiveFeedHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
