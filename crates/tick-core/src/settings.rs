//! Database path resolution.
//!
//! Precedence, highest first: explicit caller override (the `--db` flag),
//! the `TICK_DB` environment variable, then the compiled default
//! `~/.tick/tasks.db`.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Resolve the path to the task database (`~/.tick/tasks.db`).
pub fn default_db_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".tick").join("tasks.db")
}

/// Resolve the database path from an optional caller override.
pub fn resolve_db_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    if let Some(path) = std::env::var_os("TICK_DB") {
        debug!(?path, "using database path from TICK_DB");
        return PathBuf::from(path);
    }
    default_db_path()
}

/// Create the parent directory of `path` if it does not exist.
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
