//! Domain types for read-state tracking.

mod record;
mod unread;

pub use record::{ReadState, ReadStateKey};
pub use unread::count_unread;
