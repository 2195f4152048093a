//! Task status and generated image handlers

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::tasks::TaskRecord;

/// GET /api/status/:task_id - Current state of a generation task
pub async fn get_status(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<TaskRecord>, AppError> {
    state
        .tasks()
        .get(&task_id)
        .await
        .map(Json)
        .ok_or(AppError::TaskNotFound(task_id))
}

/// GET /api/images/:filename - Serve a generated PNG
pub async fn get_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = state.images.read(&filename).await?;
    Ok(([(header::CONTENT_TYPE, "image/png")], bytes))
}
