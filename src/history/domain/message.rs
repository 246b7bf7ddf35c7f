//! The message record held in the loaded window.
//!
//! Messages are immutable once loaded. Read-state annotations live outside
//! the record and only reference it by identifier.

use super::{MessageId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single record of the remote message log.
///
/// # Examples
///
/// ```
/// use backscroll::history::domain::{Message, MessageId, UserId};
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc
///     .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
///     .single()
///     .expect("valid instant");
/// let message = Message::new(MessageId::new("m1"), UserId::new("alice"), "hello", at)
///     .with_image_url("https://example.invalid/cat.png");
///
/// assert_eq!(message.text(), "hello");
/// assert!(message.image_url().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    id: MessageId,
    sender_id: UserId,
    #[serde(default)]
    text: String,
    timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

impl Message {
    /// Creates a text message.
    #[must_use]
    pub fn new(
        id: MessageId,
        sender_id: UserId,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            sender_id,
            text: text.into(),
            timestamp,
            image_url: None,
        }
    }

    /// Attaches an image reference to the message.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> &MessageId {
        &self.id
    }

    /// Returns the sender identifier.
    #[must_use]
    pub const fn sender_id(&self) -> &UserId {
        &self.sender_id
    }

    /// Returns the message text. Image-only messages have empty text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the instant the log assigned to the message.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the attached image reference, if any.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns `true` when the message was sent by someone other than `viewer`.
    #[must_use]
    pub fn is_from_other(&self, viewer: &UserId) -> bool {
        &self.sender_id != viewer
    }
}
