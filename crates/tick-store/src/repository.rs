//! SQL data access layer for tasks.
//!
//! All methods take a `&Connection` parameter and are stateless — pure
//! translations between [`Task`] and SQL. Ids come from SQLite's
//! `AUTOINCREMENT`, so they are unique for the lifetime of the database
//! and never reused after deletion.

use rusqlite::{Connection, OptionalExtension, params};
use tick_core::Task;

use crate::errors::Result;

/// Task repository for SQL CRUD operations.
pub struct TaskRepository;

impl TaskRepository {
    /// Return every persisted task, ordered by id for determinism.
    ///
    /// Callers re-sort for display; the contract only promises the full set.
    pub fn list_tasks(conn: &Connection) -> Result<Vec<Task>> {
        let mut stmt =
            conn.prepare("SELECT id, description, is_completed FROM tasks ORDER BY id")?;
        let tasks = stmt
            .query_map([], task_from_row)?
            .filter_map(std::result::Result::ok)
            .collect();
        Ok(tasks)
    }

    /// Get a task by id.
    pub fn get_task(conn: &Connection, id: i64) -> Result<Option<Task>> {
        let task = conn
            .query_row(
                "SELECT id, description, is_completed FROM tasks WHERE id = ?1",
                params![id],
                task_from_row,
            )
            .optional()?;
        Ok(task)
    }

    /// Create a new pending task and return the created row.
    pub fn insert_task(conn: &Connection, description: &str) -> Result<Task> {
        let _ = conn.execute(
            "INSERT INTO tasks (description, is_completed) VALUES (?1, 0)",
            params![description],
        )?;
        let id = conn.last_insert_rowid();
        let task = conn.query_row(
            "SELECT id, description, is_completed FROM tasks WHERE id = ?1",
            params![id],
            task_from_row,
        )?;
        Ok(task)
    }

    /// Overwrite the stored record matching `task.id` with the given field
    /// values. Returns the updated task, or `None` if the id does not exist.
    pub fn update_task(conn: &Connection, task: &Task) -> Result<Option<Task>> {
        let changed = conn.execute(
            "UPDATE tasks SET description = ?1, is_completed = ?2 WHERE id = ?3",
            params![task.description, task.is_completed, task.id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        Self::get_task(conn, task.id)
    }

    /// Delete a task by id. Returns true if a row was deleted.
    pub fn delete_task(conn: &Connection, id: i64) -> Result<bool> {
        let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Empty the table. Returns the number of rows removed.
    pub fn delete_all_tasks(conn: &Connection) -> Result<usize> {
        let changed = conn.execute("DELETE FROM tasks", [])?;
        Ok(changed)
    }
}

fn task_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        description: row.get(1)?,
        is_completed: row.get(2)?,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
