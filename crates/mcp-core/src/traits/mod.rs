//! Core traits for the shadcn-ui MCP server.
//!
//! # Module Structure
//!
//! - `llm` - chat completion provider trait
//!
//! # Examples
//!
//! ```
//! use shadcn_mcp_core::traits::{CompletionRequest, LlmClient};
//! use shadcn_mcp_core::Result;
//! use async_trait::async_trait;
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl LlmClient for Echo {
//!     async fn complete(&self, request: CompletionRequest) -> Result<String> {
//!         Ok(request.user)
//!     }
//! }
//! ```

mod llm;

pub use llm::{CompletionRequest, LlmClient};
