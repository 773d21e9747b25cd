//! `SQLite` connection pool with WAL mode and a busy timeout.
//!
//! Uses `r2d2` connection pooling with the `r2d2_sqlite` backend. The
//! [`PragmaCustomizer`] runs on each new connection.
//!
//! Pools are built without connecting: an unreachable database does not stop
//! the process from starting, it surfaces on the first checkout as a pool
//! error once `acquire_timeout` elapses.

use std::path::{Path, PathBuf};
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use taskboard_settings::DatabaseSettings;
use tracing::{info, warn};

use crate::errors::{Result, StoreError};

/// Alias for the connection pool type.
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Alias for a pooled connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Configuration for the connection pool.
#[derive(Clone, Debug)]
pub struct ConnectionConfig {
    /// Maximum pool size (default: 10).
    pub pool_size: u32,
    /// Busy timeout in milliseconds (default: 5000).
    pub busy_timeout_ms: u32,
    /// Maximum wait for a free connection (default: 5s).
    pub acquire_timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            pool_size: 10,
            busy_timeout_ms: 5_000,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl From<&DatabaseSettings> for ConnectionConfig {
    fn from(settings: &DatabaseSettings) -> Self {
        Self {
            pool_size: settings.pool_size.max(1),
            busy_timeout_ms: settings.busy_timeout_ms,
            acquire_timeout: Duration::from_millis(settings.acquire_timeout_ms.max(1)),
        }
    }
}

/// Where the database lives, parsed from `DATABASE_URL`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// A private in-memory database.
    Memory,
    /// A database file.
    File(PathBuf),
}

impl DatabaseLocation {
    /// Parse a database URL.
    ///
    /// Accepts `:memory:`, `sqlite::memory:`, `sqlite://<path>`,
    /// `sqlite:<path>`, or a bare filesystem path. Any other URL scheme
    /// (e.g. `postgres://`) is rejected.
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(StoreError::UnsupportedUrl("empty database url".into()));
        }

        let rest = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"));

        let path = match rest {
            Some(rest) => rest,
            None if url.contains("://") => return Err(StoreError::UnsupportedUrl(url.into())),
            None => url,
        };

        match path {
            "" => Err(StoreError::UnsupportedUrl(url.into())),
            ":memory:" => Ok(Self::Memory),
            path => Ok(Self::File(PathBuf::from(path))),
        }
    }
}

/// `SQLite` pragma customizer that runs on each new connection.
#[derive(Debug)]
struct PragmaCustomizer {
    busy_timeout_ms: u32,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for PragmaCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout = {};\
             PRAGMA journal_mode = WAL;\
             PRAGMA foreign_keys = ON;\
             PRAGMA synchronous = NORMAL;",
            self.busy_timeout_ms
        ))
    }
}

/// Build a pool for a parsed location.
pub fn open(location: &DatabaseLocation, config: &ConnectionConfig) -> Result<ConnectionPool> {
    match location {
        DatabaseLocation::Memory => new_in_memory(config),
        DatabaseLocation::File(path) => new_file(path, config),
    }
}

/// Parse `url` and build a pool for it.
pub fn open_url(url: &str, config: &ConnectionConfig) -> Result<ConnectionPool> {
    open(&DatabaseLocation::parse(url)?, config)
}

/// Create an in-memory connection pool.
///
/// Every `SQLite` in-memory connection is its own database, so the pool holds
/// exactly one connection that never expires.
pub fn new_in_memory(config: &ConnectionConfig) -> Result<ConnectionPool> {
    let manager = SqliteConnectionManager::memory();
    let pool = Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connection_timeout(config.acquire_timeout)
        .connection_customizer(Box::new(PragmaCustomizer {
            busy_timeout_ms: config.busy_timeout_ms,
        }))
        .build_unchecked(manager);
    info!("in-memory database pool created");
    Ok(pool)
}

/// Create a file-backed connection pool.
pub fn new_file(path: &Path, config: &ConnectionConfig) -> Result<ConnectionPool> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!(path = %parent.display(), error = %e, "failed to create database directory");
        }
    }

    let manager = SqliteConnectionManager::file(path);
    let pool = Pool::builder()
        .max_size(config.pool_size)
        .connection_timeout(config.acquire_timeout)
        .connection_customizer(Box::new(PragmaCustomizer {
            busy_timeout_ms: config.busy_timeout_ms,
        }))
        .build_unchecked(manager);
    info!(path = %path.display(), pool_size = config.pool_size, "database pool created");
    Ok(pool)
}

/// Check out a connection, waiting at most the configured acquire timeout.
pub fn acquire(pool: &ConnectionPool) -> Result<PooledConnection> {
    Ok(pool.get()?)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
