//! Change events delivered by the live feed of a log source.

use super::{Message, MessageId};

/// A change observed on the remote log.
///
/// Only [`LogChange::Added`] feeds the loaded window; the other variants are
/// delivered for completeness and ignored by the pagination core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogChange {
    /// A record was appended to the log.
    Added(Message),
    /// An existing record was rewritten (for example, delivery receipts).
    Modified(Message),
    /// A record was removed.
    Removed(MessageId),
}

impl LogChange {
    /// Returns the appended message for `Added` events.
    #[must_use]
    pub fn into_added(self) -> Option<Message> {
        match self {
            Self::Added(message) => Some(message),
            Self::Modified(_) | Self::Removed(_) => None,
        }
    }

    /// Returns a short name of the change type, for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Added(_) => "added",
            Self::Modified(_) => "modified",
            Self::Removed(_) => "removed",
        }
    }
}
