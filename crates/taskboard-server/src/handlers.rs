//! Handlers for `/api/tasks`.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use taskboard_core::{CreateTaskRequest, Task};
use tracing::instrument;

use crate::errors::ApiError;
use crate::server::AppState;

/// GET /api/tasks
#[instrument(skip_all)]
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    state
        .service
        .list_tasks()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_task_error(&e, state.environment))
}

/// POST /api/tasks
///
/// A body that is not valid JSON, or whose fields have the wrong types, is a
/// 400 like any other validation failure.
#[instrument(skip_all)]
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(req) = payload.map_err(|r| ApiError::from_rejection(&r))?;
    let task = state
        .service
        .create_task(req)
        .await
        .map_err(|e| ApiError::from_task_error(&e, state.environment))?;
    Ok((StatusCode::CREATED, Json(task)))
}
