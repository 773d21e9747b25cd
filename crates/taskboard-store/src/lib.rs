//! # taskboard-store
//!
//! `SQLite` persistence for tasks.
//!
//! # Architecture
//!
//! - **[`connection`]**: `r2d2` connection pool with WAL mode and busy timeout
//!   applied to every connection, plus `DATABASE_URL` parsing.
//! - **[`schema`]**: idempotent DDL for the `tasks` table.
//! - **[`repository`]**: stateless SQL functions taking `&Connection`.
//! - **[`store`]**: the [`TaskStore`] seam and its pooled `SQLite` implementation.
//! - **[`service`]**: [`TaskService`], which validates input before it reaches
//!   the store and maps store failures onto [`TaskError`].
//! - **[`initializer`]**: runs the schema ensure at startup under a
//!   [`SchemaPolicy`].
//!
//! [`TaskError`]: taskboard_core::TaskError

#![deny(unsafe_code)]

pub mod connection;
pub mod errors;
pub mod initializer;
pub mod repository;
pub mod schema;
pub mod service;
pub mod store;

pub use connection::{ConnectionConfig, ConnectionPool, DatabaseLocation};
pub use errors::{Result, StoreError};
pub use initializer::{SchemaInit, SchemaInitializer, SchemaPolicy};
pub use service::TaskService;
pub use store::{SqliteTaskStore, TaskStore};
