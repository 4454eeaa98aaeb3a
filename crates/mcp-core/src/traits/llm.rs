//! Chat completion trait.
//!
//! The pipeline treats the LLM as an opaque function: a system prompt and one
//! user message in, text out, bounded by a token budget and a retry count.

use crate::Result;
use async_trait::async_trait;

/// A single-turn completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// System prompt
    pub system: String,

    /// User message
    pub user: String,

    /// Maximum tokens the model may generate
    pub max_tokens: u32,

    /// Additional attempts after a retryable failure
    pub max_retries: u32,
}

impl CompletionRequest {
    /// Creates a request with no retries.
    #[must_use]
    pub fn new(system: impl Into<String>, user: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            max_tokens,
            max_retries: 0,
        }
    }

    /// Sets the retry count.
    #[must_use]
    pub const fn with_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Produces text completions.
///
/// # Type Safety
///
/// All implementations must be `Send + Sync` to be shared across tool calls.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Runs one completion and returns the generated text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Llm`] if the provider cannot be reached, rejects
    /// the request, or returns no text, after exhausting retries.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = CompletionRequest::new("system", "user", 2000).with_retries(2);
        assert_eq!(request.system, "system");
        assert_eq!(request.user, "user");
        assert_eq!(request.max_tokens, 2000);
        assert_eq!(request.max_retries, 2);
    }

    #[test]
    fn test_default_no_retries() {
        let request = CompletionRequest::new("s", "u", 10);
        assert_eq!(request.max_retries, 0);
    }
}
