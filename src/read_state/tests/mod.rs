//! Unit tests for read-state tracking.
