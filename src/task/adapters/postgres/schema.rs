//! Diesel schema for task storage.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int4,
        /// Creation timestamp in Unix seconds.
        opened -> Int8,
        /// Close timestamp in Unix seconds, `0` while open.
        closed -> Int8,
        /// Author reference.
        author_id -> Int4,
        /// Assignee reference.
        assigned_id -> Int4,
        /// Short summary.
        title -> Text,
        /// Free-form body.
        content -> Text,
    }
}

diesel::table! {
    /// Label names.
    labels (id) {
        /// Store-assigned label identifier.
        id -> Int4,
        /// Unique label name.
        label -> Text,
    }
}

diesel::table! {
    /// Task-to-label associations.
    task_labels (task_id, label_id) {
        /// Labelled task.
        task_id -> Int4,
        /// Attached label.
        label_id -> Int4,
    }
}
