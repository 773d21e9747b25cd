//! DDL for the `tasks` table.
//!
//! Every statement is `IF NOT EXISTS`, so [`ensure_schema`] can run on every
//! start without touching existing rows. `created_at` is filled by the store
//! with millisecond precision in UTC, which keeps the text column sortable.

use rusqlite::Connection;

use crate::errors::Result;

/// Table and index definitions.
pub const CREATE_TABLES: &str = r"
CREATE TABLE IF NOT EXISTS tasks (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL CHECK (length(title) <= 255),
    description TEXT,
    completed   INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at DESC);
";

/// Create the `tasks` table and its index if they are absent.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_TABLES)?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
