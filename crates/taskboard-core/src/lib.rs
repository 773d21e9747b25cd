//! # taskboard-core
//!
//! Domain types shared by every taskboard crate.
//!
//! - [`Task`]: the persisted to-do item, exactly as it appears on the wire
//! - [`CreateTaskRequest`]: untrusted create payload straight off the wire
//! - [`NewTask`]: a create request that passed validation
//! - [`TaskError`]: the error taxonomy surfaced by the task service

#![deny(unsafe_code)]

pub mod errors;
pub mod task;

pub use errors::{TaskError, ValidationError};
pub use task::{CreateTaskRequest, NewTask, Task, TITLE_MAX_LEN};
