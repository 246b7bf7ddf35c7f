//! Domain types for the history subsystem.
//!
//! Pure data structures with no runtime or transport dependencies: the
//! message record, the loaded window, the inverted index, and the outcome
//! types the services report.

mod change;
mod cursor;
mod ids;
mod index;
mod message;
mod outcome;
mod search;
mod session;
mod window;

pub use change::LogChange;
pub use cursor::Cursor;
pub use ids::{MessageId, RoomId, UserId};
pub use index::{InvertedIndex, tokenize};
pub use message::Message;
pub use outcome::{JumpOutcome, LoadOutcome};
pub use search::{HighlightMarker, Highlighter, SearchResult, highlight};
pub use session::SessionContext;
pub use window::MessageWindow;
