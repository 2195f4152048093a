//! Remote AI platform access
//!
//! A client for the OpenAI-compatible AI platform (chat completions, image
//! generation, audio transcription), the [`DesignModel`] trait the
//! generation pipeline is written against, and a backoff helper for
//! transient overload errors.

pub mod client;
pub mod error;
pub mod retry;
pub mod types;

pub use client::AiClient;
pub use error::AiError;
pub use retry::{retry_with_backoff, RetryPolicy};
pub use types::Transcription;

use crate::design::PlanResponse;
use async_trait::async_trait;

/// Generative backend used by the pipeline and the transcription endpoint
///
/// [`AiClient`] is the production implementation; tests substitute fakes.
#[async_trait]
pub trait DesignModel: Send + Sync {
    /// Ask the planning model for an updated state and image plan
    ///
    /// `images` are base64-encoded uploads attached as multimodal input.
    async fn generate_plan(&self, prompt: &str, images: &[String]) -> Result<PlanResponse, AiError>;

    /// Render a single image
    ///
    /// `Ok(None)` means the backend produced nothing usable for this prompt;
    /// only transient failures are returned as errors.
    async fn generate_image(&self, prompt: &str, size: &str) -> Result<Option<Vec<u8>>, AiError>;

    /// Transcribe recorded audio, with an optional BCP-47 language hint
    async fn transcribe_audio(
        &self,
        audio: Vec<u8>,
        language: Option<&str>,
    ) -> Result<Transcription, AiError>;
}
