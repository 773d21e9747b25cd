//! Error taxonomy for task operations.
//!
//! [`TaskError`] is what the task service returns and what the HTTP layer
//! maps onto status codes. A missing schema is not a separate variant: the
//! store reports it like any other failed statement, as
//! [`TaskError::StorageUnavailable`].

use thiserror::Error;

/// Why a create request was rejected before reaching the store.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The `title` field was absent or `null`.
    #[error("title is required")]
    MissingTitle,
    /// The title was empty or only whitespace.
    #[error("title must not be empty")]
    EmptyTitle,
    /// The title exceeds the column width.
    #[error("title is too long ({len} > {max} characters)")]
    TitleTooLong {
        /// Observed length in UTF-16 code units.
        len: usize,
        /// Allowed maximum.
        max: usize,
    },
}

/// Errors returned by the task service.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The request was malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store could not be reached or a statement failed.
    #[error("{0}")]
    StorageUnavailable(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display() {
        assert_eq!(ValidationError::MissingTitle.to_string(), "title is required");
        assert_eq!(ValidationError::EmptyTitle.to_string(), "title must not be empty");
        assert_eq!(
            ValidationError::TitleTooLong { len: 300, max: 255 }.to_string(),
            "title is too long (300 > 255 characters)"
        );
    }

    #[test]
    fn validation_is_transparent() {
        let err: TaskError = ValidationError::EmptyTitle.into();
        assert_eq!(err.to_string(), "title must not be empty");
        assert!(matches!(err, TaskError::Validation(ValidationError::EmptyTitle)));
    }

    #[test]
    fn storage_unavailable_keeps_raw_message() {
        let err = TaskError::StorageUnavailable("no such table: tasks".into());
        assert_eq!(err.to_string(), "no such table: tasks");
    }
}
