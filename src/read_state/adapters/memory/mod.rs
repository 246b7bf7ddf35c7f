//! In-memory adapter implementations for testing and local composition.

mod repository;

pub use repository::InMemoryReadStateRepository;
