//! Task storage.
//!
//! Every operation is a single independent round trip: build a parameterized
//! query, borrow a connection from the pool, map rows to [`domain::Task`]
//! values, and return either the value or one typed
//! [`ports::TaskStoreError`]. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
