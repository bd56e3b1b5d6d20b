//! Fake LLM provider for testing.
//!
//! This provider returns deterministic responses based on prompt matching,
//! allowing tests to run without network access or API costs.

use super::{LlmError, LlmProvider, ModelSettings};
use async_trait::async_trait;
use std::sync::{PoisonError, RwLock};

/// A fake LLM provider for testing.
///
/// Responses are matched by checking if the prompt contains a registered
/// substring (case-insensitive). Patterns are tried in registration order.
#[derive(Debug)]
pub struct FakeProvider {
    responses: Vec<(String, Result<String, LlmError>)>,
    /// Reply when no pattern matches.
    default_response: Option<String>,
    configured: bool,
    prompts: RwLock<Vec<String>>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            responses: Vec::new(),
            default_response: Some("[]".to_string()),
            configured: true,
            prompts: RwLock::new(Vec::new()),
        }
    }
}

impl FakeProvider {
    /// Create a new FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self {
            default_response: None,
            ..Self::default()
        }
    }

    /// Create a FakeProvider that returns a specific response for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .push((prompt_contains.to_string(), Ok(response.to_string())));
    }

    /// Fail with `error` for prompts containing a specific substring.
    pub fn add_error(&mut self, prompt_contains: &str, error: LlmError) {
        self.responses.push((prompt_contains.to_string(), Err(error)));
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Behave like a provider with no credentials.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Every prompt received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str, _settings: &ModelSettings) -> Result<String, LlmError> {
        if !self.configured {
            return Err(LlmError::NotConfigured(
                "FakeProvider: not configured".to_string(),
            ));
        }

        self.prompts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in &self.responses {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return response.clone();
            }
        }

        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: No response configured for prompt (first 100 chars): {}",
                prompt.chars().take(100).collect::<String>()
            ))),
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
