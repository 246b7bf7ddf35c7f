//! Backscroll: paged history, local search, and read tracking for chat rooms.
//!
//! This crate lets a client browse a large, append-only, remotely stored
//! message log without loading all of it: older pages load on demand, an
//! inverted index grows with every page, and unread counts derive from the
//! same loaded window.
//!
//! # Architecture
//!
//! Backscroll follows hexagonal architecture principles:
//!
//! - **Domain**: Pure data structures with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the remote log, the read-state
//!   store, and the presentation layer
//! - **Adapters**: Concrete implementations of ports (in-memory, viewport)
//!
//! # Modules
//!
//! - [`history`]: Pagination, message store, search, and jump-to-message
//! - [`read_state`]: Last-read records and unread counting
//! - [`telemetry`]: Tracing subscriber setup

pub mod history;
pub mod read_state;
pub mod telemetry;
