//! In-memory adapter for task storage.

mod task;

pub use task::InMemoryTaskStore;
