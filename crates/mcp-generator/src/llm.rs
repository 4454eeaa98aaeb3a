//! OpenAI-compatible chat completion client.
//!
//! Talks to OpenRouter by default; any endpoint implementing
//! `POST {base}/chat/completions` works.
//!
//! # Examples
//!
//! ```no_run
//! use shadcn_mcp_core::LlmSettings;
//! use shadcn_mcp_core::traits::{CompletionRequest, LlmClient};
//! use shadcn_mcp_generator::OpenRouterClient;
//!
//! # async fn example() -> shadcn_mcp_core::Result<()> {
//! let settings = LlmSettings::new("sk-or-...", "anthropic/claude-3.5-sonnet");
//! let client = OpenRouterClient::new(&settings)?;
//!
//! let text = client
//!     .complete(CompletionRequest::new("You are terse.", "Say hi", 16))
//!     .await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use shadcn_mcp_core::http::build_client;
use shadcn_mcp_core::traits::{CompletionRequest, LlmClient};
use shadcn_mcp_core::{Error, LlmSettings, Result};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Chat completion request body.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Chat completion response body.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// A failed attempt and whether trying again could help.
struct AttemptError {
    error: Error,
    retryable: bool,
}

/// [`LlmClient`] over an OpenAI-compatible HTTP API.
#[derive(Debug)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
    model: String,
    retry_backoff: Duration,
}

impl OpenRouterClient {
    /// Creates a client from LLM settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be built.
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        let client = build_client(settings.request_timeout)?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", settings.base_url),
            api_key: SecretString::from(settings.api_key.expose_secret().to_owned()),
            model: settings.model_id.clone(),
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        })
    }

    /// Sets the base delay between retries; it doubles after each attempt.
    #[must_use]
    pub const fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Model identifier sent with every request.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn attempt(&self, request: &CompletionRequest) -> std::result::Result<String, AttemptError> {
        let body = ChatRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| AttemptError {
                retryable: e.is_timeout() || e.is_connect() || e.is_request(),
                error: Error::Llm {
                    message: format!("request to {} failed: {e}", self.endpoint),
                    source: Some(Box::new(e)),
                },
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AttemptError {
                retryable: status.is_server_error() || status.as_u16() == 429,
                error: Error::Llm {
                    message: format!("provider returned {status}: {detail}"),
                    source: None,
                },
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| AttemptError {
            retryable: false,
            error: Error::Llm {
                message: format!("failed to read provider response: {e}"),
                source: Some(Box::new(e)),
            },
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AttemptError {
                retryable: false,
                error: Error::Llm {
                    message: "provider response contained no text".to_string(),
                    source: None,
                },
            })
    }
}

#[async_trait]
impl LlmClient for OpenRouterClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let mut backoff = self.retry_backoff;
        let mut attempt = 0u32;

        loop {
            debug!(
                model = %self.model,
                max_tokens = request.max_tokens,
                attempt,
                "sending completion request"
            );

            match self.attempt(&request).await {
                Ok(text) => return Ok(text),
                Err(failure) if failure.retryable && attempt < request.max_retries => {
                    warn!(error = %failure.error, attempt, "completion failed, retrying");
                    tokio::time::sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                    attempt += 1;
                }
                Err(failure) => return Err(failure.error),
            }
        }
    }
}
