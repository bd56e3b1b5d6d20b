//! Completion client abstraction.
//!
//! Every model call in the planner goes through [`LlmProvider`], so the Claude
//! provider can be swapped for [`FakeProvider`] in tests.

mod claude;
mod fake;

pub use claude::ClaudeProvider;
pub use fake::FakeProvider;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for LLM operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Unexpected response type: {0}")]
    UnexpectedResponse(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl LlmError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, LlmError::RateLimited { .. })
    }

    pub fn is_not_configured(&self) -> bool {
        matches!(self, LlmError::NotConfigured(_))
    }
}

/// Model identifier, output token budget and sampling temperature for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ModelSettings {
    pub const DEFAULT_GENERATION_MODEL: &'static str = "claude-3-5-haiku-20241022";
    pub const DEFAULT_EXTRACTION_MODEL: &'static str = "claude-3-haiku-20240307";

    /// Settings for recipe generation: long output, creative sampling.
    pub fn generation() -> Self {
        Self {
            model: Self::DEFAULT_GENERATION_MODEL.to_string(),
            max_tokens: 8000,
            temperature: 0.8,
        }
    }

    /// Settings for ingredient extraction: short output, conservative sampling.
    pub fn extraction() -> Self {
        Self {
            model: Self::DEFAULT_EXTRACTION_MODEL.to_string(),
            max_tokens: 1000,
            temperature: 0.3,
        }
    }
}

/// Trait for LLM providers.
///
/// One call to `complete` is one request to the model service. Providers never
/// retry, and any timeout must be layered on by the caller.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt and return the text of the reply's first content block.
    async fn complete(&self, prompt: &str, settings: &ModelSettings) -> Result<String, LlmError>;

    /// Whether the provider has what it needs (credentials) to make a call.
    fn is_configured(&self) -> bool {
        true
    }

    /// Get the provider name (e.g., "claude", "fake").
    fn provider_name(&self) -> &'static str;
}

/// Create the provider selected by the environment.
///
/// - SAISON_LLM_PROVIDER: "claude" (default) | "fake"
/// - ANTHROPIC_API_KEY: API key for Claude. A missing key is not an error here;
///   calls fail with [`LlmError::NotConfigured`] instead.
pub fn create_provider_from_env() -> Result<Box<dyn LlmProvider>, LlmError> {
    let provider = std::env::var("SAISON_LLM_PROVIDER").unwrap_or_else(|_| "claude".to_string());

    match provider.as_str() {
        "claude" => {
            let api_key = std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty());
            if api_key.is_none() {
                tracing::warn!("ANTHROPIC_API_KEY is not set, model calls will fail");
            }
            Ok(Box::new(ClaudeProvider::new(api_key)))
        }
        "fake" => Ok(Box::new(FakeProvider::default())),
        other => Err(LlmError::NotConfigured(format!(
            "Unknown provider: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(LlmError::RateLimited {
            retry_after_secs: Some(30)
        }
        .is_rate_limited());
        assert!(!LlmError::RequestFailed("boom".to_string()).is_rate_limited());
        assert!(LlmError::NotConfigured("no key".to_string()).is_not_configured());
    }

    #[test]
    fn test_default_settings() {
        let generation = ModelSettings::generation();
        assert_eq!(generation.model, "claude-3-5-haiku-20241022");
        assert_eq!(generation.max_tokens, 8000);

        let extraction = ModelSettings::extraction();
        assert_eq!(extraction.model, "claude-3-haiku-20240307");
        assert_eq!(extraction.max_tokens, 1000);
    }
}
