//! Optional task filters for the list query.

use super::{Task, TaskId, UserId};

/// Narrowing criteria for listing tasks.
///
/// Each criterion is optional. Storage adapters bind an absent criterion as
/// the `0` wildcard so the list query keeps a single static shape, which is
/// also why a raw `0` passed to [`TaskFilter::from_raw`] means "any".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TaskFilter {
    task_id: Option<TaskId>,
    author_id: Option<UserId>,
}

impl TaskFilter {
    /// Matches every task.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            task_id: None,
            author_id: None,
        }
    }

    /// Builds a filter from raw identifiers, treating `0` as a wildcard.
    #[must_use]
    pub const fn from_raw(task_id: i32, author_id: i32) -> Self {
        Self::all()
            .with_task(TaskId::new(task_id))
            .with_author(UserId::new(author_id))
    }

    /// Restricts the result to one task identifier.
    ///
    /// A zero identifier clears the restriction.
    #[must_use]
    pub const fn with_task(mut self, task_id: TaskId) -> Self {
        self.task_id = if task_id.into_inner() == 0 {
            None
        } else {
            Some(task_id)
        };
        self
    }

    /// Restricts the result to one author.
    ///
    /// Passing [`UserId::UNSET`] clears the restriction.
    #[must_use]
    pub const fn with_author(mut self, author_id: UserId) -> Self {
        self.author_id = if author_id.is_unset() {
            None
        } else {
            Some(author_id)
        };
        self
    }

    /// Returns the task restriction, if any.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        self.task_id
    }

    /// Returns the author restriction, if any.
    #[must_use]
    pub const fn author_id(&self) -> Option<UserId> {
        self.author_id
    }

    /// Returns the task restriction as a bind value, `0` meaning any.
    #[must_use]
    pub const fn task_id_param(&self) -> i32 {
        match self.task_id {
            Some(id) => id.into_inner(),
            None => 0,
        }
    }

    /// Returns the author restriction as a bind value, `0` meaning any.
    #[must_use]
    pub const fn author_id_param(&self) -> i32 {
        match self.author_id {
            Some(id) => id.into_inner(),
            None => 0,
        }
    }

    /// Evaluates the filter against a task in memory.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.task_id.is_none_or(|id| task.id() == id)
            && self.author_id.is_none_or(|id| task.author_id() == id)
    }
}
