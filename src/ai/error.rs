//! Errors from the remote AI platform

use thiserror::Error;

/// Errors that can occur while calling the AI platform
#[derive(Error, Debug)]
pub enum AiError {
    /// No bearer token configured
    #[error("AI_BUILDER_TOKEN environment variable is required")]
    MissingToken,

    /// Upstream model is overloaded or temporarily unavailable
    #[error("Model overloaded, please retry: {0}")]
    Overloaded(String),

    /// Upstream returned a non-success status
    #[error("AI service returned error status {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// Request could not be sent or the body could not be read
    #[error("Failed to reach AI service: {0}")]
    Network(String),

    /// Response arrived but did not have the expected shape
    #[error("Invalid response from AI service: {0}")]
    InvalidResponse(String),

    /// Planning call failed for a non-transient reason
    #[error("Planning failed: {0}")]
    Planning(String),

    /// Transcription call failed
    #[error("Transcription failed: {0}")]
    Transcription(String),
}

impl AiError {
    /// Classify a non-success HTTP response
    pub fn from_status(status: u16, body: String) -> Self {
        if status == 503 || mentions_overload(&body) {
            AiError::Overloaded(format!("HTTP {}: {}", status, body))
        } else {
            AiError::Api { status, body }
        }
    }

    /// Classify a transport error
    pub fn from_transport(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.status().map(|s| s.as_u16()) == Some(503) || mentions_overload(&message) {
            AiError::Overloaded(message)
        } else {
            AiError::Network(message)
        }
    }

    /// Whether the call is worth retrying after a backoff
    pub fn is_transient(&self) -> bool {
        matches!(self, AiError::Overloaded(_))
    }
}

fn mentions_overload(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("overloaded") || lower.contains("unavailable")
}
