//! Task entity and the payloads used to create and overwrite it.

use super::{TaskId, UserId};
use serde::{Deserialize, Serialize};

/// A task as persisted by the store.
///
/// Timestamps are Unix seconds. A `closed` value of `0` means the task is
/// still open.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    opened: i64,
    closed: i64,
    author_id: UserId,
    assigned_id: UserId,
    title: String,
    content: String,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Creation timestamp.
    pub opened: i64,
    /// Close timestamp, `0` while open.
    pub closed: i64,
    /// Author reference.
    pub author_id: UserId,
    /// Assignee reference.
    pub assigned_id: UserId,
    /// Short summary.
    pub title: String,
    /// Free-form body.
    pub content: String,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        let PersistedTaskData {
            id,
            opened,
            closed,
            author_id,
            assigned_id,
            title,
            content,
        } = data;
        Self {
            id,
            opened,
            closed,
            author_id,
            assigned_id,
            title,
            content,
        }
    }

    /// Rebuilds the task under the same identifier with every mutable field
    /// replaced by `update`.
    #[must_use]
    pub fn overwritten_by(&self, update: &TaskUpdate) -> Self {
        Self {
            id: self.id,
            opened: update.opened,
            closed: update.closed,
            author_id: update.author_id,
            assigned_id: update.assigned_id,
            title: update.title.clone(),
            content: update.content.clone(),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn opened(&self) -> i64 {
        self.opened
    }

    /// Returns the close timestamp, `0` while the task is open.
    #[must_use]
    pub const fn closed(&self) -> i64 {
        self.closed
    }

    /// Returns `true` once a close timestamp has been recorded.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed != 0
    }

    /// Returns the author reference.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Returns the assignee reference.
    #[must_use]
    pub const fn assigned_id(&self) -> UserId {
        self.assigned_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Payload for creating a task.
///
/// Only the title and body are supplied by callers; the identifier,
/// timestamps and user references come from store defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTask {
    title: String,
    content: String,
}

impl NewTask {
    /// Creates a payload with the given title and body.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Returns the title to persist.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the body to persist.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl From<&Task> for NewTask {
    fn from(task: &Task) -> Self {
        Self::new(task.title(), task.content())
    }
}

/// Full replacement state written by an update.
///
/// Updates overwrite every mutable column. Callers preserving a field must
/// read the current task first and carry the value over, which
/// `TaskUpdate::from(&task)` does for all fields at once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskUpdate {
    opened: i64,
    closed: i64,
    author_id: UserId,
    assigned_id: UserId,
    title: String,
    content: String,
}

impl TaskUpdate {
    /// Creates an update with the given text and every other field zeroed.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn with_opened(mut self, opened: i64) -> Self {
        self.opened = opened;
        self
    }

    /// Sets the close timestamp.
    #[must_use]
    pub const fn with_closed(mut self, closed: i64) -> Self {
        self.closed = closed;
        self
    }

    /// Sets the author reference.
    #[must_use]
    pub const fn with_author(mut self, author_id: UserId) -> Self {
        self.author_id = author_id;
        self
    }

    /// Sets the assignee reference.
    #[must_use]
    pub const fn with_assignee(mut self, assigned_id: UserId) -> Self {
        self.assigned_id = assigned_id;
        self
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replaces the body.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Returns the creation timestamp to write.
    #[must_use]
    pub const fn opened(&self) -> i64 {
        self.opened
    }

    /// Returns the close timestamp to write.
    #[must_use]
    pub const fn closed(&self) -> i64 {
        self.closed
    }

    /// Returns the author reference to write.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Returns the assignee reference to write.
    #[must_use]
    pub const fn assigned_id(&self) -> UserId {
        self.assigned_id
    }

    /// Returns the title to write.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the body to write.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl From<&Task> for TaskUpdate {
    fn from(task: &Task) -> Self {
        Self {
            opened: task.opened,
            closed: task.closed,
            author_id: task.author_id,
            assigned_id: task.assigned_id,
            title: task.title.clone(),
            content: task.content.clone(),
        }
    }
}
