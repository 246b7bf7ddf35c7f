//! Adapters for the read-state ports.

pub mod memory;
