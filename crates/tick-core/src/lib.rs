//! # tick-core
//!
//! Shared foundation for the tick to-do engine:
//!
//! - [`Task`]: the persisted record (id, description, completion flag)
//! - [`query`]: the pure search → filter → sort pipeline applied for display
//! - [`settings`]: database path resolution with env overrides
//! - [`logging`]: `tracing` subscriber setup

#![deny(unsafe_code)]

pub mod logging;
pub mod query;
pub mod settings;
pub mod task;

pub use query::TaskQuery;
pub use task::{SortKey, StatusFilter, Task};
