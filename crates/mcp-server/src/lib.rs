//! MCP server for shadcn-vue UI generation and Tailwind CSS docs.
//!
//! # Tools
//!
//! 1. **`read-usage-doc`** / **`read-full-doc`** - component documentation
//! 2. **`create-ui`** - pick components for a description, gather their
//!    usage docs and have the LLM write the UI
//! 3. **`refine-code`** - send an existing file back to the LLM with a
//!    refinement request
//! 4. **`tailwind_url_query`** / **`tailwind_doc_query`** - discover and
//!    scrape Tailwind CSS documentation pages within a deadline
//!
//! The `tailwindcss-docs` resource serves a plain-text dump of the
//! Tailwind CSS docs.
//!
//! # Examples
//!
//! ```no_run
//! use rmcp::ServiceExt;
//! use rmcp::transport::stdio;
//! use shadcn_mcp_core::ServerConfig;
//! use shadcn_mcp_server::ShadcnUiService;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::from_env()?;
//! let service = ShadcnUiService::new(&config)?.serve(stdio()).await?;
//! service.waiting().await?;
//! # Ok(())
//! # }
//! ```

pub mod resource;
pub mod service;
pub mod types;

pub use resource::{RESOURCE_MIME_TYPE, RESOURCE_NAME, RESOURCE_URI, TailwindDocsResource};
pub use service::{NO_DOCUMENTATION, ShadcnUiService};
pub use types::{
    CreateUiParams, DEFAULT_URL_QUERY_TIMEOUT_MS, ReadDocParams, RefineCodeParams,
    TailwindDocQueryParams, TailwindUrlQueryParams, TailwindUrlQueryResult,
};
