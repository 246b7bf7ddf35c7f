//! In-memory adapter implementations.
//!
//! Thread-safe and dependency-free; they back the tests and any local
//! composition that has no remote log.

mod log_source;

pub use log_source::InMemoryLogSource;
