//! Error types for the task service.
//!
//! The original design dropped invalid input and stale ids silently; the
//! service surfaces both as typed variants so the contract stays testable.

use thiserror::Error;
use tick_store::StoreError;

/// Errors returned by [`TaskService`](crate::TaskService) operations.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The supplied description was blank.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No task with this id exists in the store.
    #[error("task not found: {0}")]
    NotFound(i64),

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A blocking database task failed to run to completion.
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Convenience type alias for service results.
pub type Result<T> = std::result::Result<T, TaskError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
