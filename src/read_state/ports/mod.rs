//! Port trait definitions for read-state tracking.

pub mod repository;

pub use repository::{ReadStateError, ReadStateRepository, ReadStateResult};
