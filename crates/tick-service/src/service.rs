//! The task service: observable list plus store orchestration.
//!
//! Every mutation follows the same sequence: validate, write, reload the
//! full list from the store, publish. The reload-after-write keeps the
//! observable list store-consistent without incremental diffing — one
//! extra full read per mutation, an explicit design choice. The only
//! exception is [`TaskService::delete_all`], which publishes the
//! known-empty list without a reload round-trip.
//!
//! Mutations serialize through a single writer mutex held across the
//! write+reload pair, so two in-flight mutations can never publish their
//! reloads out of order. All SQL runs on the blocking pool; the calling
//! context never blocks on the database.

use rusqlite::Connection;
use tokio::sync::{Mutex, watch};
use tokio::task;
use tracing::debug;

use tick_core::Task;
use tick_store::{ConnectionPool, StoreError, TaskRepository};

use crate::errors::{Result, TaskError};

/// Mediator between the presentation layer and the store.
///
/// Holds the single observable current-list value; subscribers see the
/// current snapshot immediately and a notification after each mutation.
pub struct TaskService {
    pool: ConnectionPool,
    writer: Mutex<()>,
    tasks_tx: watch::Sender<Vec<Task>>,
}

impl TaskService {
    /// Open the service over a migrated pool and load the initial list.
    pub async fn open(pool: ConnectionPool) -> Result<Self> {
        let (tasks_tx, _) = watch::channel(Vec::new());
        let service = Self {
            pool,
            writer: Mutex::new(()),
            tasks_tx,
        };
        service.refresh().await?;
        Ok(service)
    }

    /// Subscribe to the observable task list.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.tasks_tx.subscribe()
    }

    /// Current snapshot of the observable task list.
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks_tx.borrow().clone()
    }

    /// Add a new pending task.
    ///
    /// Blank or whitespace-only descriptions are rejected with
    /// [`TaskError::InvalidInput`] before anything reaches the store.
    pub async fn add_task(&self, description: &str) -> Result<Task> {
        validate_description(description)?;
        let _guard = self.writer.lock().await;
        let description = description.to_string();
        let created = self
            .with_conn(move |conn| TaskRepository::insert_task(conn, &description))
            .await?;
        debug!(id = created.id, "task added");
        self.refresh().await?;
        Ok(created)
    }

    /// Flip the completion flag on a copy of `task` and persist it.
    ///
    /// Returns [`TaskError::NotFound`] if the id is stale.
    pub async fn toggle_completion(&self, task: &Task) -> Result<Task> {
        let _guard = self.writer.lock().await;
        let updated = Task {
            is_completed: !task.is_completed,
            ..task.clone()
        };
        let stored = self
            .with_conn(move |conn| TaskRepository::update_task(conn, &updated))
            .await?
            .ok_or(TaskError::NotFound(task.id))?;
        debug!(id = stored.id, is_completed = stored.is_completed, "task toggled");
        self.refresh().await?;
        Ok(stored)
    }

    /// Replace the description on a copy of `task` and persist it.
    ///
    /// The completion flag is untouched. Blank descriptions are rejected;
    /// a stale id returns [`TaskError::NotFound`].
    pub async fn update_description(&self, task: &Task, new_description: &str) -> Result<Task> {
        validate_description(new_description)?;
        let _guard = self.writer.lock().await;
        let updated = Task {
            description: new_description.to_string(),
            ..task.clone()
        };
        let stored = self
            .with_conn(move |conn| TaskRepository::update_task(conn, &updated))
            .await?
            .ok_or(TaskError::NotFound(task.id))?;
        debug!(id = stored.id, "task description updated");
        self.refresh().await?;
        Ok(stored)
    }

    /// Delete `task` from the store by id.
    ///
    /// Returns [`TaskError::NotFound`] if the id is stale.
    pub async fn delete_task(&self, task: &Task) -> Result<()> {
        let _guard = self.writer.lock().await;
        let id = task.id;
        let deleted = self
            .with_conn(move |conn| TaskRepository::delete_task(conn, id))
            .await?;
        if !deleted {
            return Err(TaskError::NotFound(id));
        }
        debug!(id, "task deleted");
        self.refresh().await
    }

    /// Clear the store and set the observable list to empty.
    ///
    /// The result is known, so no reload round-trip happens.
    pub async fn delete_all(&self) -> Result<()> {
        let _guard = self.writer.lock().await;
        let removed = self.with_conn(TaskRepository::delete_all_tasks).await?;
        debug!(removed, "all tasks deleted");
        let _ = self.tasks_tx.send_replace(Vec::new());
        Ok(())
    }

    /// Re-fetch the full list from the store into the observable state.
    pub async fn reload(&self) -> Result<()> {
        let _guard = self.writer.lock().await;
        self.refresh().await
    }

    /// Fetch-and-publish without taking the writer lock; mutation paths
    /// call this while already holding it.
    async fn refresh(&self) -> Result<()> {
        let tasks = self.with_conn(TaskRepository::list_tasks).await?;
        let _ = self.tasks_tx.send_replace(tasks);
        Ok(())
    }

    /// Run a store operation on the blocking pool with a pooled connection.
    async fn with_conn<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> tick_store::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        let value = task::spawn_blocking(move || -> Result<T> {
            let conn = pool.get().map_err(StoreError::Pool)?;
            Ok(op(&conn)?)
        })
        .await??;
        Ok(value)
    }
}

fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(TaskError::InvalidInput(
            "task description must not be blank".to_string(),
        ));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tick_store::connection::{ConnectionConfig, new_file};
    use tick_store::migrations::run_migrations;

    struct Fixture {
        _dir: tempfile::TempDir,
        pool: ConnectionPool,
        service: TaskService,
    }

    async fn setup() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.db");
        let pool = new_file(path.to_str().unwrap(), &ConnectionConfig::default()).unwrap();
        {
            let conn = pool.get().unwrap();
            run_migrations(&conn).unwrap();
        }
        let service = TaskService::open(pool.clone()).await.unwrap();
        Fixture {
            _dir: dir,
            pool,
            service,
        }
    }

    #[tokio::test]
    async fn open_loads_existing_tasks() {
        let fixture = setup().await;
        {
            let conn = fixture.pool.get().unwrap();
            TaskRepository::insert_task(&conn, "pre-existing").unwrap();
        }
        let service = TaskService::open(fixture.pool.clone()).await.unwrap();
        let tasks = service.tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "pre-existing");
    }

    #[tokio::test]
    async fn add_task_round_trip() {
        let fixture = setup().await;
        let created = fixture.service.add_task("X").await.unwrap();
        assert_eq!(created.description, "X");
        assert!(!created.is_completed);
        assert!(created.id > 0);

        let tasks = fixture.service.tasks();
        assert_eq!(tasks, vec![created]);
    }

    #[tokio::test]
    async fn blank_descriptions_are_rejected() {
        let fixture = setup().await;
        assert_matches!(
            fixture.service.add_task("   ").await,
            Err(TaskError::InvalidInput(_))
        );
        assert!(fixture.service.tasks().is_empty());

        let task = fixture.service.add_task("real").await.unwrap();
        assert_matches!(
            fixture.service.update_description(&task, "\t").await,
            Err(TaskError::InvalidInput(_))
        );
        assert_eq!(fixture.service.tasks()[0].description, "real");
    }

    #[tokio::test]
    async fn toggle_is_an_involution() {
        let fixture = setup().await;
        let original = fixture.service.add_task("flip me").await.unwrap();

        let once = fixture.service.toggle_completion(&original).await.unwrap();
        assert!(once.is_completed);

        let twice = fixture.service.toggle_completion(&once).await.unwrap();
        assert_eq!(twice, original);
    }

    #[tokio::test]
    async fn update_description_preserves_completion() {
        let fixture = setup().await;
        let task = fixture.service.add_task("Call mom").await.unwrap();
        let done = fixture.service.toggle_completion(&task).await.unwrap();

        let renamed = fixture
            .service
            .update_description(&done, "Call dad")
            .await
            .unwrap();
        assert_eq!(renamed.description, "Call dad");
        assert!(renamed.is_completed);
        assert_eq!(renamed.id, task.id);
    }

    #[tokio::test]
    async fn stale_ids_surface_as_not_found() {
        let fixture = setup().await;
        let task = fixture.service.add_task("short-lived").await.unwrap();
        fixture.service.delete_task(&task).await.unwrap();

        assert_matches!(
            fixture.service.toggle_completion(&task).await,
            Err(TaskError::NotFound(id)) if id == task.id
        );
        assert_matches!(
            fixture.service.update_description(&task, "zombie").await,
            Err(TaskError::NotFound(_))
        );
        assert_matches!(
            fixture.service.delete_task(&task).await,
            Err(TaskError::NotFound(_))
        );
    }

    #[tokio::test]
    async fn delete_task_removes_only_that_task() {
        let fixture = setup().await;
        let a = fixture.service.add_task("a").await.unwrap();
        let b = fixture.service.add_task("b").await.unwrap();

        fixture.service.delete_task(&a).await.unwrap();
        assert_eq!(fixture.service.tasks(), vec![b]);
    }

    #[tokio::test]
    async fn delete_all_empties_store_and_observable_state() {
        let fixture = setup().await;
        fixture.service.add_task("a").await.unwrap();
        fixture.service.add_task("b").await.unwrap();

        fixture.service.delete_all().await.unwrap();
        assert!(fixture.service.tasks().is_empty());

        let conn = fixture.pool.get().unwrap();
        assert!(TaskRepository::list_tasks(&conn).unwrap().is_empty());
    }

    #[tokio::test]
    async fn subscribers_observe_mutations() {
        let fixture = setup().await;
        let mut rx = fixture.service.subscribe();
        assert!(rx.borrow().is_empty());

        fixture.service.add_task("observed").await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);
    }

    #[tokio::test]
    async fn observable_list_tracks_store_after_each_mutation() {
        let fixture = setup().await;
        let a = fixture.service.add_task("a").await.unwrap();
        let b = fixture.service.add_task("b").await.unwrap();
        fixture.service.toggle_completion(&a).await.unwrap();
        fixture.service.delete_task(&b).await.unwrap();

        let conn = fixture.pool.get().unwrap();
        assert_eq!(
            fixture.service.tasks(),
            TaskRepository::list_tasks(&conn).unwrap()
        );
    }
}
