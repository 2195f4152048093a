//! AI platform client
//!
//! Direct HTTP client for the OpenAI-compatible AI platform. One shared
//! `reqwest::Client` (connection pooling) serves planning, image generation
//! and transcription calls, all authenticated with the same bearer token.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart, GeminiExtension,
    ImageGenerationRequest, ImageGenerationResponse, ImageUrl, MessageContent, ThinkingConfig,
    Transcription,
};
use super::{AiError, DesignModel};
use crate::config::AiConfig;
use crate::design::PlanResponse;

const PLANNING_TEMPERATURE: f32 = 0.7;
const PLANNING_MAX_TOKENS: u32 = 8192;

/// Client for the AI platform
#[derive(Clone)]
pub struct AiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    planning_model: String,
    image_model: String,
    transcription_timeout: Duration,
}

impl AiClient {
    /// Create a client from configuration
    ///
    /// # Errors
    /// * Returns `AiError::MissingToken` if no token is configured
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    /// Create a client that reuses an existing `reqwest::Client`
    pub fn with_http_client(http: reqwest::Client, config: &AiConfig) -> Result<Self, AiError> {
        let token = config
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or(AiError::MissingToken)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
            planning_model: config.planning_model.clone(),
            image_model: config.image_model.clone(),
            transcription_timeout: config.transcription_timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, AiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(url = %url, "Calling AI platform");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(AiError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                status_code = status.as_u16(),
                error_body = %error_body,
                url = %url,
                "AI platform returned error status"
            );
            return Err(AiError::from_status(status.as_u16(), error_body));
        }

        let response_body = response.text().await.map_err(AiError::from_transport)?;
        serde_json::from_str(&response_body).map_err(|e| {
            AiError::InvalidResponse(format!(
                "Failed to parse JSON response: {} - Response body: {}",
                e, response_body
            ))
        })
    }

    async fn request_plan(&self, prompt: &str, images: &[String]) -> Result<PlanResponse, AiError> {
        let content = if images.is_empty() {
            MessageContent::Text(prompt.to_string())
        } else {
            let mut parts: Vec<ContentPart> = images
                .iter()
                .map(|b64| ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: format!("data:image/jpeg;base64,{}", b64),
                    },
                })
                .collect();
            parts.push(ContentPart::Text {
                text: prompt.to_string(),
            });
            MessageContent::Parts(parts)
        };

        let request = ChatCompletionRequest {
            model: self.planning_model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content,
            }],
            temperature: PLANNING_TEMPERATURE,
            max_tokens: PLANNING_MAX_TOKENS,
            gemini: Some(GeminiExtension {
                response_mime_type: "application/json".to_string(),
                thinking_config: ThinkingConfig {
                    thinking_level: "HIGH".to_string(),
                },
            }),
        };

        tracing::debug!(
            model = %self.planning_model,
            prompt_len = prompt.len(),
            image_count = images.len(),
            "Requesting design plan"
        );

        let response: ChatCompletionResponse = self.post_json("chat/completions", &request).await?;

        let message = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .ok_or_else(|| AiError::Planning("No content returned from model".to_string()))?;

        let content = message.content.unwrap_or_default();
        if content.trim().is_empty() {
            return Err(AiError::Planning("Empty content returned".to_string()));
        }

        parse_plan(&content)
    }
}

/// Parse the planning model's JSON answer
///
/// Tolerates a Markdown code fence around the document.
pub fn parse_plan(content: &str) -> Result<PlanResponse, AiError> {
    let trimmed = content.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(body.trim()).map_err(|e| {
        AiError::Planning(format!(
            "Failed to parse plan JSON: {} - Response: {}",
            e, content
        ))
    })
}

#[async_trait]
impl DesignModel for AiClient {
    async fn generate_plan(&self, prompt: &str, images: &[String]) -> Result<PlanResponse, AiError> {
        self.request_plan(prompt, images).await.map_err(|e| match e {
            e if e.is_transient() => e,
            AiError::Planning(msg) => AiError::Planning(msg),
            other => AiError::Planning(other.to_string()),
        })
    }

    async fn generate_image(&self, prompt: &str, size: &str) -> Result<Option<Vec<u8>>, AiError> {
        let request = ImageGenerationRequest {
            prompt: prompt.to_string(),
            model: self.image_model.clone(),
            size: size.to_string(),
            n: 1,
            response_format: "b64_json".to_string(),
        };

        let response: ImageGenerationResponse =
            match self.post_json("images/generations", &request).await {
                Ok(response) => response,
                Err(e) if e.is_transient() => return Err(e),
                Err(e) => {
                    tracing::warn!(error = %e, "Image generation failed");
                    return Ok(None);
                }
            };

        let Some(b64) = response
            .data
            .into_iter()
            .next()
            .and_then(|d| d.b64_json)
            .filter(|s| !s.is_empty())
        else {
            tracing::warn!("Image generation returned no data");
            return Ok(None);
        };

        match STANDARD.decode(b64.as_bytes()) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) => {
                tracing::warn!(error = %e, "Image payload was not valid base64");
                Ok(None)
            }
        }
    }

    async fn transcribe_audio(
        &self,
        audio: Vec<u8>,
        language: Option<&str>,
    ) -> Result<Transcription, AiError> {
        let part = Part::bytes(audio)
            .file_name("audio.webm")
            .mime_str("audio/webm")
            .map_err(|e| AiError::Transcription(e.to_string()))?;

        let mut form = Form::new().part("audio_file", part);
        if let Some(language) = language.filter(|l| !l.is_empty()) {
            form = form.text("language", language.to_string());
        }

        let response = self
            .http
            .post(self.url("audio/transcriptions"))
            .bearer_auth(&self.token)
            .multipart(form)
            .timeout(self.transcription_timeout)
            .send()
            .await
            .map_err(|e| AiError::Transcription(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AiError::Transcription(e.to_string()))?;

        if status != StatusCode::OK {
            tracing::error!(status_code = status.as_u16(), error_body = %body, "Transcription failed");
            return Err(AiError::Transcription(body));
        }

        serde_json::from_str(&body).map_err(|e| {
            AiError::Transcription(format!("Invalid transcription response: {}", e))
        })
    }
}
