//! Taskdb: task storage over a pooled `PostgreSQL` connection set.
//!
//! The crate exposes create, read, update, and delete operations for a single
//! task entity, plus the label lookups that join against it.
//!
//! # Architecture
//!
//! Taskdb follows hexagonal architecture principles:
//!
//! - **Domain**: Plain task values and filters with no infrastructure
//!   dependencies
//! - **Ports**: Abstract storage traits and their error taxonomy
//! - **Adapters**: `PostgreSQL` and in-memory implementations of the ports
//!
//! # Modules
//!
//! - [`task`]: Task entity, storage ports, and adapters

pub mod task;
