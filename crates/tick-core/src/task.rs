//! The task entity and the user-facing query enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A to-do item as persisted in the store.
///
/// `id` is assigned by the store on creation and never reused after
/// deletion. There is no creation timestamp; "by date" ordering is a
/// documented proxy using `id` ascending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned unique identifier, immutable for the task's lifetime.
    pub id: i64,
    /// User-supplied text, mutable, non-blank.
    pub description: String,
    /// Completion flag, false at creation.
    pub is_completed: bool,
}

/// Completion-status filter applied by the query pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Pass every task through.
    #[default]
    All,
    /// Keep only completed tasks.
    Completed,
    /// Keep only pending tasks.
    Pending,
}

/// Sort key applied by the query pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending lexicographic by description.
    #[default]
    Name,
    /// Ascending by id (creation-order proxy).
    Date,
    /// Pending before completed.
    Status,
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            other => Err(format!(
                "unknown filter: {other} (expected all, completed, or pending)"
            )),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "date" => Ok(Self::Date),
            "status" => Ok(Self::Status),
            other => Err(format!(
                "unknown sort key: {other} (expected name, date, or status)"
            )),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Completed => write!(f, "completed"),
            Self::Pending => write!(f, "pending"),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Date => write!(f, "date"),
            Self::Status => write!(f, "status"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
