//! In-memory task store for tests and embedding.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::task::{
    domain::{
        LabelId, NewTask, PersistedTaskData, Task, TaskFilter, TaskId, TaskUpdate, UserId,
    },
    ports::{LabelStore, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Mirrors the `PostgreSQL` schema defaults: identifiers start at `1` and are
/// never reused, `opened` is stamped from the clock, and deleting a task drops
/// its label associations.
#[derive(Clone)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryState>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

#[derive(Debug)]
struct InMemoryState {
    tasks: BTreeMap<TaskId, Task>,
    labels: BTreeMap<LabelId, String>,
    task_labels: BTreeSet<(TaskId, LabelId)>,
    next_task_id: Option<i32>,
    next_label_id: Option<i32>,
}

impl Default for InMemoryState {
    fn default() -> Self {
        Self {
            tasks: BTreeMap::new(),
            labels: BTreeMap::new(),
            task_labels: BTreeSet::new(),
            next_task_id: Some(1),
            next_label_id: Some(1),
        }
    }
}

impl InMemoryTaskStore {
    /// Creates an empty store stamping tasks with the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Creates an empty store stamping tasks with the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryState::default())),
            clock,
        }
    }

    fn read(&self) -> TaskStoreResult<RwLockReadGuard<'_, InMemoryState>> {
        self.state.read().map_err(|err| {
            TaskStoreError::connection(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskStoreResult<RwLockWriteGuard<'_, InMemoryState>> {
        self.state.write().map_err(|err| {
            TaskStoreError::connection(std::io::Error::other(err.to_string()))
        })
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryTaskStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTaskStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Hands out the next identifier from a sequence, like a `SERIAL` column.
///
/// `i32::MAX` is still issued; only the call after it fails.
fn take_next(sequence: &mut Option<i32>, what: &str) -> TaskStoreResult<i32> {
    let current = sequence.ok_or_else(|| {
        TaskStoreError::query(std::io::Error::other(format!(
            "{what} identifier sequence exhausted"
        )))
    })?;
    *sequence = current.checked_add(1);
    Ok(current)
}

fn constraint_violation(message: String) -> TaskStoreError {
    TaskStoreError::query(std::io::Error::other(message))
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn tasks(&self, filter: TaskFilter) -> TaskStoreResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect())
    }

    async fn new_task(&self, task: &NewTask) -> TaskStoreResult<TaskId> {
        let opened = self.clock.utc().timestamp();
        let mut state = self.write()?;
        let id = TaskId::new(take_next(&mut state.next_task_id, "task")?);

        let created = Task::from_persisted(PersistedTaskData {
            id,
            opened,
            closed: 0,
            author_id: UserId::UNSET,
            assigned_id: UserId::UNSET,
            title: task.title().to_owned(),
            content: task.content().to_owned(),
        });
        state.tasks.insert(id, created);
        debug!(task_id = %id, "created task");
        Ok(id)
    }

    async fn tasks_by_author(&self, author_id: UserId) -> TaskStoreResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.author_id() == author_id)
            .cloned()
            .collect())
    }

    async fn tasks_by_label(&self, label: &str) -> TaskStoreResult<Vec<Task>> {
        let state = self.read()?;
        let label_ids: Vec<LabelId> = state
            .labels
            .iter()
            .filter(|(_, name)| name.as_str() == label)
            .map(|(id, _)| *id)
            .collect();

        Ok(state
            .tasks
            .values()
            .filter(|task| {
                label_ids
                    .iter()
                    .any(|label_id| state.task_labels.contains(&(task.id(), *label_id)))
            })
            .cloned()
            .collect())
    }

    async fn task_by_id(&self, id: TaskId) -> TaskStoreResult<Task> {
        let state = self.read()?;
        state
            .tasks
            .get(&id)
            .cloned()
            .ok_or(TaskStoreError::NotFound(id))
    }

    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        let Some(current) = state.tasks.get(&id) else {
            debug!(task_id = %id, rows = 0, "updated task");
            return Ok(());
        };
        let replaced = current.overwritten_by(update);
        state.tasks.insert(id, replaced);
        debug!(task_id = %id, rows = 1, "updated task");
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        let removed = state.tasks.remove(&id).is_some();
        state.task_labels.retain(|(task_id, _)| *task_id != id);
        debug!(task_id = %id, rows = usize::from(removed), "deleted task");
        Ok(())
    }
}

#[async_trait]
impl LabelStore for InMemoryTaskStore {
    async fn create_label(&self, name: &str) -> TaskStoreResult<LabelId> {
        let mut state = self.write()?;
        if state.labels.values().any(|existing| existing == name) {
            return Err(constraint_violation(format!("duplicate label: {name}")));
        }
        let id = LabelId::new(take_next(&mut state.next_label_id, "label")?);
        state.labels.insert(id, name.to_owned());
        Ok(id)
    }

    async fn attach_label(&self, task_id: TaskId, label_id: LabelId) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&task_id) {
            return Err(constraint_violation(format!(
                "task {task_id} does not exist"
            )));
        }
        if !state.labels.contains_key(&label_id) {
            return Err(constraint_violation(format!(
                "label {label_id} does not exist"
            )));
        }
        state.task_labels.insert((task_id, label_id));
        Ok(())
    }
}
