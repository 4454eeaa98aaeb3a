//! LLM-driven UI generation for shadcn-vue.
//!
//! - [`OpenRouterClient`] implements [`LlmClient`](shadcn_mcp_core::traits::LlmClient)
//!   over an OpenAI-compatible chat completions endpoint
//! - [`UiGenerator`] runs component selection, doc assembly and code
//!   generation, and refinement of existing files
//! - [`prompts`] holds the system prompts

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod llm;
mod pipeline;

pub mod prompts;

pub use llm::OpenRouterClient;
pub use pipeline::{
    GenerationSettings, UiGenerator, build_generation_message, build_refine_message,
    build_selection_message,
};
