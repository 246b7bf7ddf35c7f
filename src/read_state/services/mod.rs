//! Application services for read-state tracking.

mod tracker;

pub use tracker::ReadTracker;
