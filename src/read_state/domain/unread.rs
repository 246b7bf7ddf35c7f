//! Unread counting over the loaded window.

use chrono::{DateTime, Utc};

use crate::history::domain::{Message, UserId};

/// Counts messages from other senders newer than `last_read`.
///
/// With no `last_read`, every message from another sender counts. Messages
/// stamped exactly at `last_read` are read.
///
/// # Examples
///
/// ```
/// use backscroll::history::domain::{Message, MessageId, UserId};
/// use backscroll::read_state::domain::count_unread;
/// use chrono::{Duration, Utc};
///
/// let marked = Utc::now();
/// let me = UserId::new("me");
/// let them = UserId::new("them");
/// let window = vec![
///     Message::new(MessageId::new("a"), them.clone(), "old", marked - Duration::seconds(1)),
///     Message::new(MessageId::new("b"), them, "new", marked + Duration::seconds(1)),
///     Message::new(MessageId::new("c"), me.clone(), "mine", marked + Duration::seconds(2)),
/// ];
///
/// assert_eq!(count_unread(&window, &me, Some(marked)), 1);
/// assert_eq!(count_unread(&window, &me, None), 2);
/// ```
#[must_use]
pub fn count_unread(
    messages: &[Message],
    viewer: &UserId,
    last_read: Option<DateTime<Utc>>,
) -> usize {
    messages
        .iter()
        .filter(|message| message.is_from_other(viewer))
        .filter(|message| last_read.is_none_or(|marked| message.timestamp() > marked))
        .count()
}
