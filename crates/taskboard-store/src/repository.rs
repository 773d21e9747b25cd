//! SQL data access for tasks.
//!
//! Stateless: every function takes a `&Connection` and runs exactly one
//! autocommit statement.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};
use taskboard_core::{NewTask, Task};

use crate::errors::{Result, StoreError};

const TASK_COLUMNS: &str = "id, title, description, completed, created_at";

/// A `tasks` row as stored, before timestamp decoding.
#[derive(Debug)]
struct TaskRow {
    id: i64,
    title: String,
    description: Option<String>,
    completed: bool,
    created_at: String,
}

impl TaskRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            completed: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

impl TryFrom<TaskRow> for Task {
    type Error = StoreError;

    fn try_from(row: TaskRow) -> Result<Self> {
        let created_at = parse_timestamp(&row.created_at)?;
        Ok(Task {
            id: row.id,
            title: row.title,
            description: row.description,
            completed: row.completed,
            created_at,
        })
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::CorruptRow {
            table: "tasks",
            column: "created_at",
            detail: format!("invalid timestamp {raw:?}: {e}"),
        })
}

/// Task repository for SQL operations.
pub struct TaskRepository;

impl TaskRepository {
    /// All tasks, newest first. Ties on `created_at` go to the higher id.
    pub fn list(conn: &Connection) -> Result<Vec<Task>> {
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt
            .query_map([], TaskRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(Task::try_from).collect()
    }

    /// Insert a task and return the stored row.
    pub fn insert(conn: &Connection, task: &NewTask) -> Result<Task> {
        let row = conn.query_row(
            &format!(
                "INSERT INTO tasks (title, description) VALUES (?1, ?2) RETURNING {TASK_COLUMNS}"
            ),
            params![task.title(), task.description()],
            TaskRow::from_row,
        )?;
        Task::try_from(row)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
