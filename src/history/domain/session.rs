//! Session context shared by the components of one open room.

use super::{RoomId, UserId};

/// The viewing user and the room being browsed.
///
/// Built once by the composition root and handed to each component, so no
/// component reaches for ambient "current user" state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionContext {
    user: UserId,
    room: RoomId,
}

impl SessionContext {
    /// Creates a session context.
    #[must_use]
    pub const fn new(user: UserId, room: RoomId) -> Self {
        Self { user, room }
    }

    /// Returns the viewing user.
    #[must_use]
    pub const fn user(&self) -> &UserId {
        &self.user
    }

    /// Returns the open room.
    #[must_use]
    pub const fn room(&self) -> &RoomId {
        &self.room
    }
}
