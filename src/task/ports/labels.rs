//! Storage port for the labels a task can carry.

use super::TaskStoreResult;
use crate::task::domain::{LabelId, TaskId};
use async_trait::async_trait;

/// Label relation management.
///
/// Labels are what [`TaskStore::tasks_by_label`](super::TaskStore::tasks_by_label)
/// resolves against.
#[async_trait]
pub trait LabelStore: Send + Sync {
    /// Creates a label and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Query`](super::TaskStoreError::Query) when a
    /// label with the same name already exists.
    async fn create_label(&self, name: &str) -> TaskStoreResult<LabelId>;

    /// Associates a label with a task. Attaching the same pair twice is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Query`](super::TaskStoreError::Query) when the
    /// task or the label does not exist.
    async fn attach_label(&self, task_id: TaskId, label_id: LabelId) -> TaskStoreResult<()>;
}
