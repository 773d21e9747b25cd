//! HTTP error mapping and server lifecycle errors.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use taskboard_core::TaskError;
use taskboard_settings::Environment;
use tracing::{error, warn};

/// Body sent in place of a storage error message in production.
pub const REDACTED_MESSAGE: &str = "Internal server error";

/// `{"error": "<message>"}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

/// An error ready to be written as an HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// A 400 with `message` as the body.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Map a service error onto a response.
    ///
    /// Validation errors are always returned verbatim. Storage errors carry
    /// the raw message in development and [`REDACTED_MESSAGE`] in
    /// production; the raw message is logged either way.
    pub fn from_task_error(err: &TaskError, environment: Environment) -> Self {
        match err {
            TaskError::Validation(v) => Self::bad_request(v.to_string()),
            TaskError::StorageUnavailable(raw) => {
                error!(error = %raw, "storage unavailable");
                let message = if environment.is_production() {
                    REDACTED_MESSAGE.to_string()
                } else {
                    raw.clone()
                };
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message,
                }
            }
        }
    }

    /// Map an unreadable request body onto a 400.
    pub fn from_rejection(rejection: &JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected request body");
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Errors starting or running the HTTP listener.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The listen address could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// I/O error on an already bound listener.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ServerError>;
