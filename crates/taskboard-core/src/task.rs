//! The `Task` entity and its create-side inputs.
//!
//! A task moves through exactly one transition, `absent → persisted`, when it
//! is created. Nothing in the service updates or deletes a task afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Maximum title length, in UTF-16 code units.
pub const TITLE_MAX_LEN: usize = 255;

/// A persisted task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier. Unique and strictly increasing.
    pub id: i64,
    /// Non-empty title.
    pub title: String,
    /// Free-form description. `None` when the client omitted it.
    pub description: Option<String>,
    /// Completion flag. Always `false` at creation.
    pub completed: bool,
    /// Store-assigned creation time.
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/tasks` before validation.
///
/// Every field is optional here so that a missing title is reported as a
/// validation error rather than a deserialization failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Requested title.
    #[serde(default)]
    pub title: Option<String>,
    /// Requested description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A create request whose title has been checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: Option<String>,
}

impl NewTask {
    /// Validate a title and description.
    ///
    /// The title must be present, contain something other than whitespace,
    /// and fit in [`TITLE_MAX_LEN`] UTF-16 code units. The title is kept
    /// verbatim (no trimming). An empty description is kept as an empty
    /// string; only an absent one becomes `None`.
    pub fn new(
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.ok_or(ValidationError::MissingTitle)?;
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let len = title.encode_utf16().count();
        if len > TITLE_MAX_LEN {
            return Err(ValidationError::TitleTooLong {
                len,
                max: TITLE_MAX_LEN,
            });
        }
        Ok(Self { title, description })
    }

    /// The validated title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The description, if one was supplied.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl TryFrom<CreateTaskRequest> for NewTask {
    type Error = ValidationError;

    fn try_from(req: CreateTaskRequest) -> Result<Self, Self::Error> {
        Self::new(req.title, req.description)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
