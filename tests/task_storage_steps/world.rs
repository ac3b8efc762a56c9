//! Shared world state for task storage BDD scenarios.

use std::collections::HashMap;

use rstest::fixture;
use taskdb::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{LabelId, Task, TaskId},
    ports::TaskStoreResult,
};

/// Scenario world for task storage behaviour tests.
#[derive(Default)]
pub struct TaskStorageWorld {
    pub store: InMemoryTaskStore,
    pub labels: HashMap<String, LabelId>,
    pub last_created: Option<TaskId>,
    pub listing: Option<TaskStoreResult<Vec<Task>>>,
    pub fetched: Option<TaskStoreResult<Task>>,
    pub last_outcome: Option<TaskStoreResult<()>>,
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskStorageWorld {
    TaskStorageWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
