//! Core types, configuration and errors for the shadcn-ui MCP server.
//!
//! This crate provides the foundational pieces shared by every other crate in
//! the workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - Error hierarchy with contextual information
//! - Server configuration read once at startup
//! - Selection domain types (`Catalog`, `FilterResult`, `UsageDoc`)
//! - The necessity tier and its threshold filter
//! - Tolerant JSON extraction and repair for LLM output
//! - The `LlmClient` trait
//! - Shared HTTP client construction and status checks

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod necessity;
mod parser;
mod types;

pub mod http;
pub mod traits;

pub use config::{CrawlSettings, DocsSettings, LlmSettings, ServerConfig};
pub use error::{Error, Result};
pub use necessity::{HasNecessity, Necessity, NecessityFilter};
pub use parser::{parse_message_to_json, repair_json};
pub use types::{Catalog, ComponentDescriptor, DocKind, FilterResult, UsageDoc, normalize_filter_keys};

/// Returns `true` if `name` is a valid documentation identifier:
/// non-empty, lowercase ASCII letters, digits and single hyphens.
///
/// # Examples
///
/// ```
/// use shadcn_mcp_core::is_kebab_case;
///
/// assert!(is_kebab_case("date-picker"));
/// assert!(!is_kebab_case("DatePicker"));
/// assert!(!is_kebab_case("../secrets"));
/// ```
#[must_use]
pub fn is_kebab_case(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.contains("--")
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
