//! Storage port for task lookup, creation, overwrite, and removal.

use crate::task::domain::{NewTask, Task, TaskFilter, TaskId, TaskUpdate, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task storage operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task storage contract.
///
/// Every operation is one independent round trip to the backing store. List
/// operations return tasks in ascending identifier order and an empty vector
/// when nothing matches.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Lists tasks matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Query`] when the store rejects the query and
    /// [`TaskStoreError::Mapping`] when a row cannot be decoded.
    async fn tasks(&self, filter: TaskFilter) -> TaskStoreResult<Vec<Task>>;

    /// Creates a task and returns its store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Connection`] when no connection can be
    /// acquired and [`TaskStoreError::Query`] on constraint violations or
    /// failures during the round trip.
    async fn new_task(&self, task: &NewTask) -> TaskStoreResult<TaskId>;

    /// Lists tasks written by the given author.
    ///
    /// Unlike [`TaskFilter`], [`UserId::UNSET`] is matched literally.
    ///
    /// # Errors
    ///
    /// Same as [`TaskStore::tasks`].
    async fn tasks_by_author(&self, author_id: UserId) -> TaskStoreResult<Vec<Task>>;

    /// Lists tasks carrying the label with exactly this name.
    ///
    /// # Errors
    ///
    /// Same as [`TaskStore::tasks`].
    async fn tasks_by_label(&self, label: &str) -> TaskStoreResult<Vec<Task>>;

    /// Fetches a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when no task has this identifier.
    async fn task_by_id(&self, id: TaskId) -> TaskStoreResult<Task>;

    /// Overwrites every mutable field of a task.
    ///
    /// Updating an identifier that does not exist succeeds without effect.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Query`] when the store rejects the update.
    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> TaskStoreResult<()>;

    /// Removes a task. Removing a missing task is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Connection`] when no connection can be
    /// acquired and [`TaskStoreError::Query`] when the store rejects the
    /// delete.
    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()>;
}

/// Errors returned by task storage implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The pool could not be built or could not hand out a connection.
    #[error("connection error: {0}")]
    Connection(Arc<dyn std::error::Error + Send + Sync>),

    /// The store rejected the statement or the round trip failed.
    #[error("query error: {0}")]
    Query(Arc<dyn std::error::Error + Send + Sync>),

    /// No task has the requested identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A returned row could not be decoded into a task.
    #[error("row mapping error: {0}")]
    Mapping(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a pool or connection failure.
    pub fn connection(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Connection(Arc::new(err))
    }

    /// Wraps a statement or round-trip failure.
    pub fn query(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Query(Arc::new(err))
    }

    /// Wraps a row decoding failure.
    pub fn mapping(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Mapping(Arc::new(err))
    }

    /// Returns `true` when the error reports a missing task.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
