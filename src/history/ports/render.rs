//! Port for whatever presents the loaded window to the user.

use crate::history::domain::{Message, MessageId};

/// Where a rendered batch goes relative to what is already shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Older messages inserted above; the visible content must stay put.
    Prepend,
    /// Newer messages added below.
    Append,
}

/// Consumer of ordered message batches.
///
/// The core calls these hooks and never inspects presentation state.
/// Implementations prepending a batch must keep the topmost visible message
/// at the same offset from the viewport top.
pub trait RenderAdapter: Send + Sync {
    /// Renders `messages` (oldest first) in the given mode.
    fn render_batch(&self, messages: &[Message], mode: RenderMode);

    /// Brings the message into view.
    fn scroll_to_message(&self, id: &MessageId);

    /// Draws attention to the message.
    fn highlight_message(&self, id: &MessageId);
}
