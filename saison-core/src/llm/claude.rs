//! Claude (Anthropic) LLM provider.

use super::{LlmError, LlmProvider, ModelSettings};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude API provider.
#[derive(Debug)]
pub struct ClaudeProvider {
    api_key: Option<String>,
    client: reqwest::Client,
}

impl ClaudeProvider {
    /// Create a provider. Without an API key every call fails with
    /// [`LlmError::NotConfigured`] before touching the network.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

/// Claude API request format.
#[derive(Debug, Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ClaudeMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Claude API response format.
#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeContent>,
}

#[derive(Debug, Deserialize)]
struct ClaudeContent {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClaudeApiError {
    message: String,
}

/// Error response from Claude API.
#[derive(Debug, Deserialize)]
struct ClaudeErrorResponse {
    error: ClaudeApiError,
}

/// Take the first content block, which must be text.
fn first_text_block(response: ClaudeResponse) -> Result<String, LlmError> {
    let first = response
        .content
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::UnexpectedResponse("empty content".to_string()))?;

    match (first.content_type.as_str(), first.text) {
        ("text", Some(text)) => Ok(text),
        (other, _) => Err(LlmError::UnexpectedResponse(other.to_string())),
    }
}

#[async_trait]
impl LlmProvider for ClaudeProvider {
    async fn complete(&self, prompt: &str, settings: &ModelSettings) -> Result<String, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::NotConfigured("ANTHROPIC_API_KEY not set".to_string()))?;

        let request = ClaudeRequest {
            model: &settings.model,
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            messages: vec![ClaudeMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(
            model = %settings.model,
            max_tokens = settings.max_tokens,
            "Calling Claude API"
        );

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(LlmError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        if !(200..300).contains(&status) {
            if let Ok(error_response) = serde_json::from_str::<ClaudeErrorResponse>(&body) {
                return Err(LlmError::ApiError {
                    status,
                    message: error_response.error.message,
                });
            }
            return Err(LlmError::ApiError {
                status,
                message: body,
            });
        }

        let response: ClaudeResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::ParseError(e.to_string()))?;

        first_text_block(response)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn provider_name(&self) -> &'static str {
        "claude"
    }
}
