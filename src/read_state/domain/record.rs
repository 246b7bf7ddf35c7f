//! The per-user, per-room read-state record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::history::domain::{RoomId, SessionContext, UserId};

/// Key of a read-state record: one per (user, room) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReadStateKey {
    user: UserId,
    room: RoomId,
}

impl ReadStateKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(user: UserId, room: RoomId) -> Self {
        Self { user, room }
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user(&self) -> &UserId {
        &self.user
    }

    /// Returns the room.
    #[must_use]
    pub const fn room(&self) -> &RoomId {
        &self.room
    }
}

impl From<&SessionContext> for ReadStateKey {
    fn from(session: &SessionContext) -> Self {
        Self::new(session.user().clone(), session.room().clone())
    }
}

/// Remote read-state record.
///
/// Besides `lastRead` the record may carry fields written by other parts of
/// the client; marking read merges into the record and leaves them intact.
///
/// # Examples
///
/// ```
/// use backscroll::read_state::domain::ReadState;
/// use chrono::Utc;
/// use serde_json::json;
///
/// let mut state = ReadState::default().with_field("roomId", json!("lobby"));
/// let now = Utc::now();
/// state.mark_read_at(now);
///
/// assert_eq!(state.last_read(), Some(now));
/// assert_eq!(state.field("roomId"), Some(&json!("lobby")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_read: Option<DateTime<Utc>>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl ReadState {
    /// Creates a record already marked at `last_read`.
    #[must_use]
    pub fn read_at(last_read: DateTime<Utc>) -> Self {
        Self {
            last_read: Some(last_read),
            fields: Map::new(),
        }
    }

    /// Adds an unrelated field to the record.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Records `at` as the last-read instant, keeping every other field.
    pub const fn mark_read_at(&mut self, at: DateTime<Utc>) {
        self.last_read = Some(at);
    }

    /// Returns the last-read instant, absent until the first mark.
    #[must_use]
    pub const fn last_read(&self) -> Option<DateTime<Utc>> {
        self.last_read
    }

    /// Returns an unrelated field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
