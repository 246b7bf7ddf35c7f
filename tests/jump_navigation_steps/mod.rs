//! Step definitions for jump navigation scenarios.

mod given;
mod then;
mod when;
