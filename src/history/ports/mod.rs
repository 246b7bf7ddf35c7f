//! Port trait definitions for the history subsystem.
//!
//! Ports are the seams to infrastructure: the remote log the pages come
//! from and the presentation layer the pages go to.

pub mod log_source;
pub mod render;

pub use log_source::{ChangeFeed, LogSource, LogSourceResult, PageRequest};
pub use render::{RenderAdapter, RenderMode};
