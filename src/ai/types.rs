//! OpenAI-compatible API types
//!
//! Structs that mirror the JSON request and response formats of the
//! chat-completions, image-generation and transcription endpoints.

use serde::{Deserialize, Serialize};

/// Chat completion request
#[derive(Serialize, Debug)]
pub struct ChatCompletionRequest {
    /// Model name
    pub model: String,
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token cap
    pub max_tokens: u32,
    /// Provider-specific extension block, sent at the top level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiExtension>,
}

/// A single chat message
#[derive(Serialize, Debug)]
pub struct ChatMessage {
    /// Role of the author (always "user" here)
    pub role: String,
    /// Plain text or multimodal parts
    pub content: MessageContent,
}

/// Message content: a plain string, or a list of typed parts
#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum MessageContent {
    /// Text-only message
    Text(String),
    /// Multimodal message
    Parts(Vec<ContentPart>),
}

/// One part of a multimodal message
#[derive(Serialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Inline image
    ImageUrl {
        /// Image location (a data URL here)
        image_url: ImageUrl,
    },
    /// Text
    Text {
        /// The text content
        text: String,
    },
}

/// Image reference inside a content part
#[derive(Serialize, Debug)]
pub struct ImageUrl {
    /// `data:` URL or remote URL
    pub url: String,
}

/// Gemini settings forwarded through the compatible API
#[derive(Serialize, Debug)]
pub struct GeminiExtension {
    /// MIME type to force for the response (e.g. "application/json")
    pub response_mime_type: String,
    /// Reasoning budget
    pub thinking_config: ThinkingConfig,
}

/// Reasoning configuration
#[derive(Serialize, Debug)]
pub struct ThinkingConfig {
    /// "LOW" or "HIGH"
    pub thinking_level: String,
}

/// Chat completion response
#[derive(Deserialize, Debug)]
pub struct ChatCompletionResponse {
    /// Candidate completions
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One completion candidate
#[derive(Deserialize, Debug)]
pub struct Choice {
    /// Generated message
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

/// Generated message body
#[derive(Deserialize, Debug)]
pub struct ResponseMessage {
    /// Text content
    #[serde(default)]
    pub content: Option<String>,
}

/// Image generation request
#[derive(Serialize, Debug)]
pub struct ImageGenerationRequest {
    /// Prompt text
    pub prompt: String,
    /// Model name
    pub model: String,
    /// Size, e.g. "1536x1024"
    pub size: String,
    /// Number of images
    pub n: u32,
    /// Always "b64_json"
    pub response_format: String,
}

/// Image generation response
#[derive(Deserialize, Debug)]
pub struct ImageGenerationResponse {
    /// Generated images
    #[serde(default)]
    pub data: Vec<ImageData>,
}

/// One generated image
#[derive(Deserialize, Debug)]
pub struct ImageData {
    /// Base64-encoded image bytes
    #[serde(default)]
    pub b64_json: Option<String>,
}

/// Transcription result
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Transcription {
    /// Transcribed text
    #[serde(default)]
    pub text: Option<String>,
    /// Language detected by the service
    #[serde(default)]
    pub detected_language: Option<String>,
    /// Confidence score, when reported
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_multimodal_message_shape() {
        let message = ChatMessage {
            role: "user".into(),
            content: MessageContent::Parts(vec![
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: "data:image/jpeg;base64,AAAA".into(),
                    },
                },
                ContentPart::Text {
                    text: "hello".into(),
                },
            ]),
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "role": "user",
                "content": [
                    {"type": "image_url", "image_url": {"url": "data:image/jpeg;base64,AAAA"}},
                    {"type": "text", "text": "hello"}
                ]
            })
        );
    }

    #[test]
    fn test_text_message_is_plain_string() {
        let message = ChatMessage {
            role: "user".into(),
            content: MessageContent::Text("plan please".into()),
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["content"], "plan please");
    }
}
