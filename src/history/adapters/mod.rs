//! Adapters for the history ports.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryLogSource`]: in-memory remote log with a live feed
//! - [`viewport::ViewportRenderer`]: in-memory scroll container honouring
//!   prepend anchoring

pub mod memory;
pub mod viewport;
