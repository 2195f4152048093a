//! Feedback API handlers
//!
//! Both endpoints start a background generation task and return its ID
//! immediately; clients poll `/api/status/{task_id}` for the result.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::utils::{next_field, non_empty, read_base64, read_text};
use crate::design::DesignState;
use crate::error::AppError;
use crate::state::AppState;
use crate::tasks::{GenerationRequest, TaskId};

/// Response for a submitted feedback round
#[derive(Debug, Serialize)]
pub struct TaskCreatedResponse {
    pub task_id: TaskId,
}

/// Request body of `POST /api/feedback/simple`
#[derive(Debug, Deserialize)]
pub struct SimpleFeedbackRequest {
    pub feedback: String,
    pub state: DesignState,
    #[serde(default)]
    pub earth_location: Option<String>,
    #[serde(default)]
    pub mars_location: Option<String>,
}

/// POST /api/feedback - Submit feedback with optional uploaded images
///
/// Accepts multipart form data with:
/// - feedback: text feedback (required)
/// - state: current design state as a JSON string (required)
/// - earth_location / mars_location: optional location descriptions
/// - reference_images: zero or more image files
/// - environment_image: optional photo of the site
/// - sketch_image: optional hand sketch
pub async fn submit_feedback(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TaskCreatedResponse>, AppError> {
    let mut feedback: Option<String> = None;
    let mut raw_state: Option<String> = None;
    let mut earth_location = None;
    let mut mars_location = None;
    let mut reference_images = Vec::new();
    let mut environment_image = None;
    let mut sketch_image = None;

    while let Some(field) = next_field(&mut multipart).await? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "feedback" => feedback = Some(read_text(field).await?),
            "state" => raw_state = Some(read_text(field).await?),
            "earth_location" => earth_location = non_empty(read_text(field).await?),
            "mars_location" => mars_location = non_empty(read_text(field).await?),
            "reference_images" => {
                if let Some(image) = read_base64(field).await? {
                    reference_images.push(image);
                }
            }
            "environment_image" => environment_image = read_base64(field).await?,
            "sketch_image" => sketch_image = read_base64(field).await?,
            _ => {
                tracing::warn!("Unknown multipart field: {}", field_name);
            }
        }
    }

    let feedback = feedback.ok_or_else(|| AppError::InvalidRequest("Missing field 'feedback'".into()))?;
    let raw_state = raw_state.ok_or_else(|| AppError::InvalidRequest("Missing field 'state'".into()))?;
    let design_state: DesignState =
        serde_json::from_str(&raw_state).map_err(|_| AppError::InvalidStateJson)?;

    let mut images = reference_images;
    images.extend(environment_image);
    images.extend(sketch_image);

    let task_id = state
        .pipeline
        .submit(GenerationRequest {
            feedback,
            state: design_state,
            images,
            earth_location,
            mars_location,
        })
        .await;

    Ok(Json(TaskCreatedResponse { task_id }))
}

/// POST /api/feedback/simple - Submit text-only feedback as JSON
pub async fn submit_simple_feedback(
    State(state): State<AppState>,
    Json(request): Json<SimpleFeedbackRequest>,
) -> Result<Json<TaskCreatedResponse>, AppError> {
    let task_id = state
        .pipeline
        .submit(GenerationRequest {
            feedback: request.feedback,
            state: request.state,
            images: Vec::new(),
            earth_location: request.earth_location.and_then(non_empty),
            mars_location: request.mars_location.and_then(non_empty),
        })
        .await;

    Ok(Json(TaskCreatedResponse { task_id }))
}
