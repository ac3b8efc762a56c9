//! Domain model for task storage.
//!
//! Plain value types with no infrastructure dependencies: the task entity,
//! its create and overwrite payloads, identifier newtypes, and list filters.

mod filter;
mod ids;
mod task;

pub use filter::TaskFilter;
pub use ids::{LabelId, TaskId, UserId};
pub use task::{NewTask, PersistedTaskData, Task, TaskUpdate};
