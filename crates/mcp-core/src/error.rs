//! Error types for the shadcn-ui MCP server.
//!
//! One error hierarchy is shared by every crate in the workspace. Each variant
//! carries enough context (URL, offending text, field) to be useful when it is
//! surfaced to the calling agent.
//!
//! # Examples
//!
//! ```
//! use shadcn_mcp_core::{Error, Result};
//!
//! fn require_model(model: &str) -> Result<()> {
//!     if model.is_empty() {
//!         return Err(Error::ConfigError {
//!             message: "OPENROUTER_MODEL_ID is not set".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_model("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use thiserror::Error;

/// Main error type for the shadcn-ui MCP server.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    ///
    /// Raised at startup when a required setting (API key, model id) is
    /// missing or a value is out of range. Fatal: the server does not start.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Upstream fetch failed.
    ///
    /// Covers catalog listings, documentation files and the docs resource.
    /// Callers usually degrade to empty content instead of propagating it.
    #[error("Failed to fetch {url}: {message}")]
    Fetch {
        /// URL that was requested
        url: String,
        /// Description of the failure (transport error or HTTP status)
        message: String,
        /// Underlying transport error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Crawl failed before producing any usable result.
    ///
    /// Only the single-page link discovery crawl raises this; the content
    /// crawler skips failed pages instead.
    #[error("Crawl of {url} failed: {message}")]
    Crawl {
        /// Page that could not be crawled
        url: String,
        /// Description of the failure
        message: String,
    },

    /// LLM output did not match the expected structure.
    ///
    /// Fatal to the current tool invocation.
    #[error("Schema validation failed: {message}")]
    SchemaValidation {
        /// Description of the mismatch
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// JSON could not be recovered from LLM output, even after repair.
    #[error("Failed to parse JSON from {source_kind}: {message}\n\n{text}")]
    JsonRepair {
        /// Where the JSON candidate came from (e.g. "json code block")
        source_kind: String,
        /// Parser diagnostic
        message: String,
        /// The text that failed to parse
        text: String,
    },

    /// LLM provider call failed.
    #[error("LLM request failed: {message}")]
    Llm {
        /// Description of the failure
        message: String,
        /// Underlying error cause
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid argument error.
    ///
    /// Raised when tool parameters are malformed (e.g. a component name that
    /// is not kebab-case).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use shadcn_mcp_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "missing key".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is an upstream fetch error.
    #[must_use]
    pub const fn is_fetch_error(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }

    /// Returns `true` if this is a crawl error.
    #[must_use]
    pub const fn is_crawl_error(&self) -> bool {
        matches!(self, Self::Crawl { .. })
    }

    /// Returns `true` if this is a schema validation error.
    #[must_use]
    pub const fn is_schema_error(&self) -> bool {
        matches!(self, Self::SchemaValidation { .. })
    }

    /// Returns `true` if this is a JSON repair failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use shadcn_mcp_core::Error;
    ///
    /// let err = Error::JsonRepair {
    ///     source_kind: "raw input".to_string(),
    ///     message: "EOF while parsing".to_string(),
    ///     text: "{".to_string(),
    /// };
    /// assert!(err.is_json_repair_error());
    /// assert!(err.to_string().contains("EOF while parsing"));
    /// ```
    #[must_use]
    pub const fn is_json_repair_error(&self) -> bool {
        matches!(self, Self::JsonRepair { .. })
    }

    /// Returns `true` if this is an LLM provider error.
    #[must_use]
    pub const fn is_llm_error(&self) -> bool {
        matches!(self, Self::Llm { .. })
    }

    /// Returns `true` if this is an invalid argument error.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Result type alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;
