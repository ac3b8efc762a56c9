//! `PostgreSQL` task store backed by an r2d2 connection pool.

use super::{
    config::{ConfigError, MAX_CONNECTIONS_VAR, MIN_IDLE_VAR, TaskStoreConfig, redact_password},
    models::{NewTaskLabelRow, NewTaskRow, TaskChangeset, TaskRow},
    schema::{labels, task_labels, tasks},
};
use crate::task::{
    domain::{
        LabelId, NewTask, PersistedTaskData, Task, TaskFilter, TaskId, TaskUpdate, UserId,
    },
    ports::{LabelStore, TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::Error as DieselError;
use diesel::sql_types::{Int4, Text};
use tracing::{debug, info, warn};

/// `PostgreSQL` connection pool type used by the task store.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Filtered list query. An unset criterion is bound as `0` so the statement
/// shape never changes.
const SELECT_TASKS: &str = concat!(
    "SELECT id, opened, closed, author_id, assigned_id, title, content ",
    "FROM tasks ",
    "WHERE ($1 = 0 OR id = $1) AND ($2 = 0 OR author_id = $2) ",
    "ORDER BY id",
);

const SELECT_TASKS_BY_LABEL: &str = concat!(
    "SELECT t.id, t.opened, t.closed, t.author_id, t.assigned_id, t.title, t.content ",
    "FROM tasks t ",
    "INNER JOIN task_labels tl ON t.id = tl.task_id ",
    "INNER JOIN labels l ON tl.label_id = l.id ",
    "WHERE l.label = $1 ",
    "ORDER BY t.id",
);

/// `PostgreSQL`-backed task store.
///
/// Cloning is cheap and shares the underlying pool.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

impl PostgresTaskStore {
    /// Creates a store from an existing connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool from `config` and wraps it in a store.
    ///
    /// The pool opens its idle connections before returning, or checks out
    /// one connection when the idle floor is zero, so an unreachable server
    /// or a malformed connection string fails here.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Connection`] when the pool settings are
    /// inconsistent or the initial connections cannot be established.
    pub fn connect(config: &TaskStoreConfig) -> TaskStoreResult<Self> {
        validate_pool_sizing(config).map_err(TaskStoreError::connection)?;

        let manager = ConnectionManager::<PgConnection>::new(config.database_url());
        let pool = Pool::builder()
            .max_size(config.max_connections())
            .min_idle(config.min_idle())
            .connection_timeout(config.connection_timeout())
            .build(manager)
            .and_then(|pool| ensure_reachable(pool, config.min_idle()))
            .map_err(|err| {
                warn!(
                    database_url = %redact_password(config.database_url()),
                    error = %err,
                    "failed to establish task store pool"
                );
                TaskStoreError::connection(err)
            })?;

        info!(
            database_url = %redact_password(config.database_url()),
            max_connections = config.max_connections(),
            "task store pool established"
        );
        Ok(Self::new(pool))
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &TaskPgPool {
        &self.pool
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(|err| {
                warn!(error = %err, "failed to acquire pooled connection");
                TaskStoreError::connection(err)
            })?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::connection)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn tasks(&self, filter: TaskFilter) -> TaskStoreResult<Vec<Task>> {
        let task_id = filter.task_id_param();
        let author_id = filter.author_id_param();
        debug!(task_id, author_id, "listing tasks");

        self.run_blocking(move |connection| {
            diesel::sql_query(SELECT_TASKS)
                .bind::<Int4, _>(task_id)
                .bind::<Int4, _>(author_id)
                .load::<TaskRow>(connection)
                .map(rows_to_tasks)
                .map_err(classify)
        })
        .await
    }

    async fn new_task(&self, task: &NewTask) -> TaskStoreResult<TaskId> {
        let payload = task.clone();

        let id = self
            .run_blocking(move |connection| {
                diesel::insert_into(tasks::table)
                    .values(&NewTaskRow {
                        title: payload.title(),
                        content: payload.content(),
                    })
                    .returning(tasks::id)
                    .get_result::<i32>(connection)
                    .map(TaskId::new)
                    .map_err(classify)
            })
            .await?;
        debug!(task_id = %id, "created task");
        Ok(id)
    }

    async fn tasks_by_author(&self, author_id: UserId) -> TaskStoreResult<Vec<Task>> {
        debug!(author_id = %author_id, "listing tasks by author");

        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::author_id.eq(author_id.into_inner()))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map(rows_to_tasks)
                .map_err(classify)
        })
        .await
    }

    async fn tasks_by_label(&self, label: &str) -> TaskStoreResult<Vec<Task>> {
        let label_name = label.to_owned();
        debug!(label = %label_name, "listing tasks by label");

        self.run_blocking(move |connection| {
            diesel::sql_query(SELECT_TASKS_BY_LABEL)
                .bind::<Text, _>(label_name.as_str())
                .load::<TaskRow>(connection)
                .map(rows_to_tasks)
                .map_err(classify)
        })
        .await
    }

    async fn task_by_id(&self, id: TaskId) -> TaskStoreResult<Task> {
        debug!(task_id = %id, "fetching task");

        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(classify)?;
            row.map(row_to_task).ok_or(TaskStoreError::NotFound(id))
        })
        .await
    }

    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> TaskStoreResult<()> {
        let replacement = update.clone();

        let rows = self
            .run_blocking(move |connection| {
                diesel::update(tasks::table.find(id.into_inner()))
                    .set(&TaskChangeset {
                        opened: replacement.opened(),
                        closed: replacement.closed(),
                        author_id: replacement.author_id().into_inner(),
                        assigned_id: replacement.assigned_id().into_inner(),
                        title: replacement.title(),
                        content: replacement.content(),
                    })
                    .execute(connection)
                    .map_err(classify)
            })
            .await?;
        debug!(task_id = %id, rows, "updated task");
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        let rows = self
            .run_blocking(move |connection| {
                diesel::delete(tasks::table.find(id.into_inner()))
                    .execute(connection)
                    .map_err(classify)
            })
            .await?;
        debug!(task_id = %id, rows, "deleted task");
        Ok(())
    }
}

#[async_trait]
impl LabelStore for PostgresTaskStore {
    async fn create_label(&self, name: &str) -> TaskStoreResult<LabelId> {
        let label_name = name.to_owned();

        self.run_blocking(move |connection| {
            diesel::insert_into(labels::table)
                .values(labels::label.eq(label_name.as_str()))
                .returning(labels::id)
                .get_result::<i32>(connection)
                .map(LabelId::new)
                .map_err(classify)
        })
        .await
    }

    async fn attach_label(&self, task_id: TaskId, label_id: LabelId) -> TaskStoreResult<()> {
        let row = NewTaskLabelRow {
            task_id: task_id.into_inner(),
            label_id: label_id.into_inner(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(task_labels::table)
                .values(&row)
                .on_conflict_do_nothing()
                .execute(connection)
                .map_err(classify)?;
            Ok(())
        })
        .await
    }
}

/// Decodes one task row. Shared by every read path.
fn row_to_task(row: TaskRow) -> Task {
    let TaskRow {
        id,
        opened,
        closed,
        author_id,
        assigned_id,
        title,
        content,
    } = row;

    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        opened,
        closed,
        author_id: UserId::new(author_id),
        assigned_id: UserId::new(assigned_id),
        title,
        content,
    })
}

fn rows_to_tasks(rows: Vec<TaskRow>) -> Vec<Task> {
    rows.into_iter().map(row_to_task).collect()
}

/// Separates row decoding failures from statement and transport failures.
fn classify(err: DieselError) -> TaskStoreError {
    if matches!(err, DieselError::DeserializationError(_)) {
        TaskStoreError::mapping(err)
    } else {
        TaskStoreError::query(err)
    }
}

/// With a zero idle floor `build` opens nothing, so one checkout stands in
/// for the eager connections.
fn ensure_reachable(pool: TaskPgPool, min_idle: Option<u32>) -> Result<TaskPgPool, PoolError> {
    if min_idle == Some(0) {
        drop(pool.get()?);
    }
    Ok(pool)
}

/// r2d2 panics on these sizings, so they are rejected up front.
fn validate_pool_sizing(config: &TaskStoreConfig) -> Result<(), ConfigError> {
    if config.max_connections() == 0 {
        return Err(ConfigError::Invalid {
            name: MAX_CONNECTIONS_VAR,
            value: "0".to_owned(),
            reason: "pool size must be positive".to_owned(),
        });
    }
    match config.min_idle() {
        Some(min_idle) if min_idle > config.max_connections() => Err(ConfigError::Invalid {
            name: MIN_IDLE_VAR,
            value: min_idle.to_string(),
            reason: format!("exceeds pool size {}", config.max_connections()),
        }),
        _ => Ok(()),
    }
}
