//! Voice input transcription

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use super::utils::{next_field, non_empty, read_bytes, read_text};
use crate::ai::AiError;
use crate::error::AppError;
use crate::state::AppState;

/// Transcription result returned to the frontend
#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub text: String,
    pub language: Option<String>,
    pub confidence: Option<f64>,
}

/// POST /api/transcribe - Transcribe a recorded audio clip
///
/// Multipart fields: `audio_file` (required) and `language` (optional
/// BCP-47 hint).
pub async fn transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>, AppError> {
    let mut audio: Option<Vec<u8>> = None;
    let mut language: Option<String> = None;

    while let Some(field) = next_field(&mut multipart).await? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "audio_file" => audio = Some(read_bytes(field).await?),
            "language" => language = non_empty(read_text(field).await?),
            _ => {
                tracing::warn!("Unknown multipart field: {}", field_name);
            }
        }
    }

    let audio = audio.ok_or_else(|| AppError::InvalidRequest("Missing field 'audio_file'".into()))?;
    tracing::info!(size = audio.len(), language = ?language, "Transcribing audio");

    let result = state
        .model
        .transcribe_audio(audio, language.as_deref())
        .await
        .map_err(|e| match e {
            AiError::Transcription(message) => AppError::Transcription(message),
            other => AppError::Transcription(other.to_string()),
        })?;

    Ok(Json(TranscribeResponse {
        text: result.text.unwrap_or_default(),
        language: result.detected_language,
        confidence: result.confidence,
    }))
}
