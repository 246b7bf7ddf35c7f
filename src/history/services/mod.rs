//! Application services for browsing and searching a room's history.

mod jump;
mod live;
mod page_loader;
mod search;
mod session;
mod store;

pub use jump::JumpResolver;
pub use live::LiveFeedHandle;
pub use page_loader::PageLoader;
pub use search::SearchEngine;
pub use session::ChatSession;
pub use store::MessageStore;
