//! Pagination cursor into the remote log.

use super::{Message, MessageId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marker for the oldest message currently loaded.
///
/// The page loader treats the cursor as opaque and hands it back to the log
/// source to request the next older page. Log sources resolve it by anchor
/// identifier first and fall back to the timestamp when the anchor is
/// unknown to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    anchor: MessageId,
    timestamp: DateTime<Utc>,
}

impl Cursor {
    /// Creates a cursor positioned on `message`.
    #[must_use]
    pub fn at(message: &Message) -> Self {
        Self {
            anchor: message.id().clone(),
            timestamp: message.timestamp(),
        }
    }

    /// Returns the identifier of the message the cursor sits on.
    #[must_use]
    pub const fn anchor(&self) -> &MessageId {
        &self.anchor
    }

    /// Returns the timestamp of the anchor message.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
