//! Paged browsing and local search over a room's message log.
//!
//! The remote log is too large to load at once, so the window grows backward
//! one page at a time as the user scrolls up. Every loaded page feeds an
//! inverted index that local search runs against, and jumping to a message
//! keeps loading pages until it turns up.
//!
//! # Architecture
//!
//! The module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types ([`domain::Message`], [`domain::MessageWindow`], [`domain::InvertedIndex`], etc.)
//! - **Ports**: Abstract trait interfaces ([`ports::LogSource`], [`ports::RenderAdapter`])
//! - **Adapters**: Concrete implementations ([`adapters::memory::InMemoryLogSource`], [`adapters::viewport::ViewportRenderer`])
//! - **Services**: Pagination, search, jump, and the [`services::ChatSession`] composition root
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use backscroll::history::adapters::{memory::InMemoryLogSource, viewport::{ViewportConfig, ViewportRenderer}};
//! use backscroll::history::config::HistoryConfig;
//! use backscroll::history::domain::{RoomId, SessionContext, UserId};
//! use backscroll::history::services::ChatSession;
//! use backscroll::read_state::adapters::memory::InMemoryReadStateRepository;
//! use chrono::{Duration, Utc};
//! use mockable::DefaultClock;
//!
//! # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
//! let room = RoomId::new("lobby");
//! let source = Arc::new(InMemoryLogSource::new());
//! let start = Utc::now() - Duration::minutes(10);
//! for minute in 0..3 {
//!     source
//!         .post(&room, UserId::new("grace"), format!("note {minute}"), start + Duration::minutes(minute))
//!         .expect("append succeeds");
//! }
//!
//! let clock = Arc::new(DefaultClock);
//! let session = ChatSession::new(
//!     SessionContext::new(UserId::new("ada"), room),
//!     HistoryConfig::default(),
//!     source,
//!     Arc::new(InMemoryReadStateRepository::new(Arc::clone(&clock))),
//!     Arc::new(ViewportRenderer::new(ViewportConfig::default(), clock)),
//! )
//! .expect("valid configuration");
//!
//! let page = session.open().await;
//! assert_eq!(page.batch().len(), 3);
//! assert_eq!(session.unread_count(), 3);
//! assert_eq!(session.search("NOTE 1").len(), 1);
//! # });
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
