//! Adapters implementing the task storage ports.

pub mod memory;
pub mod postgres;
