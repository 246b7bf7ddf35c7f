//! Read-state tracking for the open room.
//!
//! A remote record per (user, room) holds the last instant the user read the
//! room. The [`services::ReadTracker`] compares it against the loaded window
//! to derive an unread count and moves it forward on demand. The module
//! follows the same hexagonal layout as [`crate::history`]:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
