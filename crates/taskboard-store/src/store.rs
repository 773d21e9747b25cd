//! The [`TaskStore`] seam and its pooled `SQLite` implementation.
//!
//! `rusqlite` is blocking, so each operation checks a connection out of the
//! pool inside `spawn_blocking`, runs one statement, and drops the
//! connection back into the pool whether the statement succeeded or not.

use async_trait::async_trait;
use rusqlite::Connection;
use taskboard_core::{NewTask, Task};
use tracing::{debug, instrument};

use crate::connection::{self, ConnectionPool};
use crate::errors::{Result, StoreError};
use crate::repository::TaskRepository;
use crate::schema;

/// Persistence operations the task service depends on.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Create the schema if it is absent. Idempotent.
    async fn ensure_schema(&self) -> Result<()>;

    /// All tasks, newest first.
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// Persist a validated task and return the stored row.
    async fn insert_task(&self, task: NewTask) -> Result<Task>;
}

/// [`TaskStore`] backed by an `r2d2` pool of `SQLite` connections.
#[derive(Clone)]
pub struct SqliteTaskStore {
    pool: ConnectionPool,
}

impl SqliteTaskStore {
    /// Wrap an existing pool.
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Run `op` on a pooled connection off the async runtime.
    async fn with_conn<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = connection::acquire(&pool)?;
            op(&conn)
        })
        .await
        .map_err(|e| StoreError::Internal(format!("blocking task failed: {e}")))?
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    #[instrument(skip(self))]
    async fn ensure_schema(&self) -> Result<()> {
        self.with_conn(schema::ensure_schema).await
    }

    #[instrument(skip(self))]
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let tasks = self.with_conn(TaskRepository::list).await?;
        debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    #[instrument(skip(self, task), fields(title_len = task.title().len()))]
    async fn insert_task(&self, task: NewTask) -> Result<Task> {
        let task = self
            .with_conn(move |conn| TaskRepository::insert(conn, &task))
            .await?;
        debug!(task_id = task.id, "task inserted");
        Ok(task)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
