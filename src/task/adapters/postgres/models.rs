//! Diesel row models for task persistence.

use super::schema::{task_labels, tasks};
use diesel::prelude::*;

/// Query result row for task records.
///
/// Decoded by column name, so every read query must select the seven task
/// columns under their table names.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned task identifier.
    #[diesel(sql_type = diesel::sql_types::Int4)]
    pub id: i32,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Int8)]
    pub opened: i64,
    /// Close timestamp.
    #[diesel(sql_type = diesel::sql_types::Int8)]
    pub closed: i64,
    /// Author reference.
    #[diesel(sql_type = diesel::sql_types::Int4)]
    pub author_id: i32,
    /// Assignee reference.
    #[diesel(sql_type = diesel::sql_types::Int4)]
    pub assigned_id: i32,
    /// Short summary.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub title: String,
    /// Free-form body.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub content: String,
}

/// Insert model for task records. Remaining columns take schema defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow<'a> {
    /// Short summary.
    pub title: &'a str,
    /// Free-form body.
    pub content: &'a str,
}

/// Changeset overwriting every mutable task column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset<'a> {
    /// Creation timestamp.
    pub opened: i64,
    /// Close timestamp.
    pub closed: i64,
    /// Author reference.
    pub author_id: i32,
    /// Assignee reference.
    pub assigned_id: i32,
    /// Short summary.
    pub title: &'a str,
    /// Free-form body.
    pub content: &'a str,
}

/// Insert model for task-to-label associations.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = task_labels)]
pub struct NewTaskLabelRow {
    /// Labelled task.
    pub task_id: i32,
    /// Attached label.
    pub label_id: i32,
}
