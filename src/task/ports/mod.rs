//! Port contracts for task storage.
//!
//! Ports define infrastructure-agnostic interfaces implemented by the
//! adapters in [`crate::task::adapters`].

pub mod labels;
pub mod repository;

pub use labels::LabelStore;
pub use repository::{TaskStore, TaskStoreError, TaskStoreResult};
