//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults. A `.env` file in the working directory is loaded
//! before the environment is read.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::ai::RetryPolicy;

/// Default base URL of the OpenAI-compatible AI platform
pub const DEFAULT_AI_BASE_URL: &str = "https://space.ai-builders.com/backend/v1";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Remote AI platform configuration
    pub ai: AiConfig,
    /// Output and static file locations
    pub storage: StorageConfig,
    /// Backoff policy for transient upstream failures
    pub retry: RetryPolicy,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Remote AI platform configuration
#[derive(Clone)]
pub struct AiConfig {
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Bearer token (`AI_BUILDER_TOKEN`)
    pub token: Option<String>,
    /// Chat model used for planning
    pub planning_model: String,
    /// Model used for image generation
    pub image_model: String,
    /// Requested image size (16:9)
    pub image_size: String,
    /// Timeout for transcription uploads
    pub transcription_timeout: Duration,
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("planning_model", &self.planning_model)
            .field("image_model", &self.image_model)
            .field("image_size", &self.image_size)
            .field("transcription_timeout", &self.transcription_timeout)
            .finish()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_AI_BASE_URL.to_string(),
            token: None,
            planning_model: "gemini-3-flash-preview".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            image_size: "1536x1024".to_string(),
            transcription_timeout: Duration::from_secs(60),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory generated images are written to
    pub image_dir: PathBuf,
    /// Directory holding the built frontend
    pub static_dir: PathBuf,
    /// Oldest images beyond this count are deleted after each generation
    pub max_image_count: usize,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        // Missing .env is fine; real environment wins anyway
        let _ = dotenvy::dotenv();

        let output_dir = PathBuf::from(env::var("OUTPUT_DIR").unwrap_or_else(|_| "outputs".into()));
        let ai_defaults = AiConfig::default();
        let retry_defaults = RetryPolicy::default();

        Self {
            server: ServerConfig {
                port: parse_var("PORT").unwrap_or(8003),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            ai: AiConfig {
                base_url: env::var("AI_BASE_URL").unwrap_or(ai_defaults.base_url),
                token: env::var("AI_BUILDER_TOKEN").ok().filter(|t| !t.is_empty()),
                planning_model: env::var("PLANNING_MODEL").unwrap_or(ai_defaults.planning_model),
                image_model: env::var("IMAGE_MODEL").unwrap_or(ai_defaults.image_model),
                image_size: env::var("IMAGE_SIZE").unwrap_or(ai_defaults.image_size),
                transcription_timeout: ai_defaults.transcription_timeout,
            },
            storage: StorageConfig {
                image_dir: output_dir.join("images"),
                static_dir: PathBuf::from(
                    env::var("STATIC_DIR").unwrap_or_else(|_| "static".into()),
                ),
                max_image_count: parse_var("MAX_IMAGE_COUNT").unwrap_or(1000),
            },
            retry: RetryPolicy {
                max_retries: parse_var("RETRY_MAX_ATTEMPTS").unwrap_or(retry_defaults.max_retries),
                initial_delay: parse_var("RETRY_INITIAL_DELAY_SECS")
                    .map(Duration::from_secs)
                    .unwrap_or(retry_defaults.initial_delay),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        for key in [
            "PORT",
            "HOST",
            "MAX_IMAGE_COUNT",
            "OUTPUT_DIR",
            "RETRY_MAX_ATTEMPTS",
            "RETRY_INITIAL_DELAY_SECS",
        ] {
            env::remove_var(key);
        }

        let config = Config::from_env();
        assert_eq!(config.server.port, 8003);
        assert_eq!(config.server_addr(), "0.0.0.0:8003");
        assert_eq!(config.storage.max_image_count, 1000);
        assert_eq!(config.storage.image_dir, PathBuf::from("outputs").join("images"));
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.initial_delay, Duration::from_secs(2));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        env::set_var("PORT", "9100");
        env::set_var("MAX_IMAGE_COUNT", "12");
        env::set_var("RETRY_INITIAL_DELAY_SECS", "1");

        let config = Config::from_env();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.storage.max_image_count, 12);
        assert_eq!(config.retry.initial_delay, Duration::from_secs(1));

        env::remove_var("PORT");
        env::remove_var("MAX_IMAGE_COUNT");
        env::remove_var("RETRY_INITIAL_DELAY_SECS");
    }

    #[test]
    fn test_token_is_redacted_in_debug() {
        let ai = AiConfig {
            token: Some("secret-token".into()),
            ..AiConfig::default()
        };
        let rendered = format!("{:?}", ai);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
