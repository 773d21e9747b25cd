//! Task Resource Service: list and create tasks.
//!
//! Input is validated here, before the store is touched, so a bad title
//! comes back as [`TaskError::Validation`] instead of a constraint error.
//! Every store failure becomes [`TaskError::StorageUnavailable`] carrying the
//! underlying message; no retries.

use std::sync::Arc;

use taskboard_core::{CreateTaskRequest, NewTask, Task, TaskError};
use tracing::{info, instrument, warn};

use crate::store::TaskStore;

/// Validating front for a [`TaskStore`].
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    /// Build a service over an injected store.
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// All tasks, newest first.
    #[instrument(skip(self))]
    pub async fn list_tasks(&self) -> Result<Vec<Task>, TaskError> {
        self.store.list_tasks().await.map_err(|e| {
            warn!(error = %e, "list tasks failed");
            TaskError::from(e)
        })
    }

    /// Validate and persist a new task.
    #[instrument(skip_all)]
    pub async fn create_task(&self, req: CreateTaskRequest) -> Result<Task, TaskError> {
        let new_task = NewTask::try_from(req)?;
        let task = self.store.insert_task(new_task).await.map_err(|e| {
            warn!(error = %e, "create task failed");
            TaskError::from(e)
        })?;
        info!(task_id = task.id, "task created");
        Ok(task)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
