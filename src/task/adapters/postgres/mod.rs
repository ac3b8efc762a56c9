//! `PostgreSQL` adapter for task storage.

mod config;
mod models;
mod repository;
mod schema;

pub use config::{
    CONNECTION_TIMEOUT_VAR, ConfigError, DATABASE_URL_VAR, MAX_CONNECTIONS_VAR, MIN_IDLE_VAR,
    TaskStoreConfig,
};
pub use repository::{PostgresTaskStore, TaskPgPool};
