//! # tick-store
//!
//! Durable storage for [`Task`](tick_core::Task) records:
//!
//! - [`connection`]: `r2d2` pool over `rusqlite` with WAL and foreign keys
//! - [`migrations`]: version-tracked schema evolution
//! - [`TaskRepository`]: stateless SQL CRUD over the `tasks` table
//!
//! Not-found is encoded in return values (`Option` / `bool`), never raised;
//! the service layer decides whether a stale id is an error.

#![deny(unsafe_code)]

pub mod connection;
pub mod errors;
pub mod migrations;
pub mod repository;

pub use connection::{ConnectionConfig, ConnectionPool, PooledConnection, new_file, new_in_memory};
pub use errors::{Result, StoreError};
pub use repository::TaskRepository;
