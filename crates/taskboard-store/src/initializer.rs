//! Persistence Initializer: ensure the schema exists at startup.
//!
//! Under [`SchemaPolicy::Lenient`] the ensure runs in the background and a
//! failure is only logged; the server keeps serving and requests fail with
//! `StorageUnavailable` until the table exists. Under
//! [`SchemaPolicy::FailFast`] the ensure is awaited and its error returned.

use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::errors::Result;
use crate::store::TaskStore;

/// What to do when the schema cannot be ensured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchemaPolicy {
    /// Log the failure and keep running.
    #[default]
    Lenient,
    /// Abort startup.
    FailFast,
}

impl SchemaPolicy {
    /// Map the `schema.failFast` setting onto a policy.
    pub fn from_fail_fast(fail_fast: bool) -> Self {
        if fail_fast { Self::FailFast } else { Self::Lenient }
    }
}

/// Result of [`SchemaInitializer::start`].
#[derive(Debug)]
pub enum SchemaInit {
    /// The schema was ensured before returning.
    Ready,
    /// The ensure is still running in the background.
    Pending(JoinHandle<()>),
}

/// Runs the schema ensure against a store.
#[derive(Clone)]
pub struct SchemaInitializer {
    store: Arc<dyn TaskStore>,
}

impl SchemaInitializer {
    /// Build an initializer for `store`.
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Ensure the schema once, logging the outcome.
    pub async fn ensure(&self) -> Result<()> {
        let started = Instant::now();
        match self.store.ensure_schema().await {
            Ok(()) => {
                info!(
                    duration_ms = started.elapsed().as_millis(),
                    "tasks schema ready"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    error = %e,
                    duration_ms = started.elapsed().as_millis(),
                    "failed to ensure tasks schema"
                );
                Err(e)
            }
        }
    }

    /// Start the ensure according to `policy`.
    ///
    /// Returns an error only under [`SchemaPolicy::FailFast`].
    pub async fn start(&self, policy: SchemaPolicy) -> Result<SchemaInit> {
        match policy {
            SchemaPolicy::FailFast => {
                self.ensure().await?;
                Ok(SchemaInit::Ready)
            }
            SchemaPolicy::Lenient => {
                let this = self.clone();
                let handle = tokio::spawn(async move {
                    // already logged by ensure(); the server keeps running
                    let _ = this.ensure().await;
                });
                Ok(SchemaInit::Pending(handle))
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use taskboard_core::{NewTask, Task};
    use taskboard_logging::capture_logs;
    use tracing::Level;

    use super::*;
    use crate::connection::{self, ConnectionConfig};
    use crate::errors::StoreError;
    use crate::store::SqliteTaskStore;
    use assert_matches::assert_matches;

    struct BrokenSchemaStore;

    #[async_trait]
    impl TaskStore for BrokenSchemaStore {
        async fn ensure_schema(&self) -> Result<()> {
            Err(StoreError::Internal("database is read-only".into()))
        }
        async fn list_tasks(&self) -> Result<Vec<Task>> {
            Ok(Vec::new())
        }
        async fn insert_task(&self, _task: NewTask) -> Result<Task> {
            Err(StoreError::Internal("unused".into()))
        }
    }

    fn sqlite_store() -> Arc<SqliteTaskStore> {
        Arc::new(SqliteTaskStore::new(
            connection::new_in_memory(&ConnectionConfig::default()).unwrap(),
        ))
    }

    #[test]
    fn policy_from_flag() {
        assert_eq!(SchemaPolicy::from_fail_fast(true), SchemaPolicy::FailFast);
        assert_eq!(SchemaPolicy::from_fail_fast(false), SchemaPolicy::Lenient);
        assert_eq!(SchemaPolicy::default(), SchemaPolicy::Lenient);
    }

    #[tokio::test]
    async fn fail_fast_ensures_before_returning() {
        let store = sqlite_store();
        let init = SchemaInitializer::new(store.clone());
        assert_matches!(init.start(SchemaPolicy::FailFast).await, Ok(SchemaInit::Ready));
        assert!(store.list_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lenient_ensures_in_background() {
        let store = sqlite_store();
        let init = SchemaInitializer::new(store.clone());
        let outcome = init.start(SchemaPolicy::Lenient).await.unwrap();
        let SchemaInit::Pending(handle) = outcome else {
            panic!("expected background ensure");
        };
        handle.await.unwrap();
        assert!(store.list_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fail_fast_returns_error() {
        let init = SchemaInitializer::new(Arc::new(BrokenSchemaStore));
        assert_matches!(
            init.start(SchemaPolicy::FailFast).await,
            Err(StoreError::Internal(_))
        );
    }

    #[tokio::test]
    async fn lenient_failure_is_logged_not_returned() {
        let (logs, _guard) = capture_logs();
        let init = SchemaInitializer::new(Arc::new(BrokenSchemaStore));

        let outcome = init.start(SchemaPolicy::Lenient).await.unwrap();
        let SchemaInit::Pending(handle) = outcome else {
            panic!("expected background ensure");
        };
        handle.await.unwrap();

        assert!(logs.has_event(Level::ERROR, "failed to ensure tasks schema"));
        let event = logs
            .events()
            .into_iter()
            .find(|e| e.level == Level::ERROR)
            .unwrap();
        assert_eq!(
            event.field("error"),
            Some("internal error: database is read-only")
        );
    }

    #[tokio::test]
    async fn ensure_is_idempotent() {
        let store = sqlite_store();
        let init = SchemaInitializer::new(store.clone());
        init.ensure().await.unwrap();
        init.ensure().await.unwrap();
    }
}
