//! Step definitions for task storage scenarios.

mod given;
mod when;
pub mod world;
