//! # taskboard-server
//!
//! Axum HTTP API over the task service.
//!
//! - `GET /health`: liveness, never touches the store
//! - `GET /api/tasks`: all tasks, newest first
//! - `POST /api/tasks`: create a task
//! - Error mapping: validation to 400, storage failures to 500 (redacted in
//!   production)
//! - Graceful shutdown via `tokio::signal` + `CancellationToken`

#![deny(unsafe_code)]

pub mod config;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod server;
pub mod shutdown;

pub use config::ServerConfig;
pub use errors::{ApiError, ServerError};
pub use server::{AppState, TaskboardServer};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
