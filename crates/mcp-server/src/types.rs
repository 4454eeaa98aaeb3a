//! Parameter and result types for the MCP tools.
//!
//! Parameter structs derive [`JsonSchema`] so rmcp can advertise an input
//! schema for every tool. Field docs become the schema descriptions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shadcn_mcp_crawler::{CrawlStatus, UrlCrawlResult};
use std::time::Duration;

/// Default crawl deadline for `tailwind_url_query`, in milliseconds.
pub const DEFAULT_URL_QUERY_TIMEOUT_MS: u64 = 30_000;

// ============================================================================
// shadcn-vue documentation and generation
// ============================================================================

/// Parameters for `read-usage-doc` and `read-full-doc`.
///
/// # Examples
///
/// ```
/// use shadcn_mcp_server::types::ReadDocParams;
///
/// let params: ReadDocParams = serde_json::from_str(r#"{"name": "date-picker"}"#).unwrap();
/// assert_eq!(params.name, "date-picker");
/// ```
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReadDocParams {
    /// Component name in lowercase kebab-case (e.g. "button", "date-picker")
    pub name: String,
}

/// Parameters for `create-ui`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateUiParams {
    /// Description of the web UI to build
    pub description: String,
}

/// Parameters for `refine-code`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefineCodeParams {
    /// The user's full message describing the refinement
    pub user_message: String,

    /// Absolute path of the file to refine
    pub absolute_path_to_refining_file: String,

    /// Which part of the UI to refine and any surrounding context
    pub context: String,
}

// ============================================================================
// Tailwind CSS documentation
// ============================================================================

/// Parameters for `tailwind_url_query`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TailwindUrlQueryParams {
    /// Focused search query distilled from the user's Tailwind CSS question,
    /// using the key concepts and terminology of the official docs
    pub search_query: String,

    /// Crawl deadline in milliseconds (default 30000). Higher values give
    /// more thorough results, lower values answer sooner.
    #[serde(default)]
    pub timeout: Option<f64>,
}

impl TailwindUrlQueryParams {
    /// Crawl deadline for this query.
    ///
    /// Fractional milliseconds are kept; anything below one millisecond is
    /// raised to one. Returns `None` for zero, negative, non-finite or
    /// unrepresentable timeouts.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        let Some(ms) = self.timeout else {
            return Some(Duration::from_millis(DEFAULT_URL_QUERY_TIMEOUT_MS));
        };
        if !ms.is_finite() || ms <= 0.0 {
            return None;
        }
        Duration::try_from_secs_f64(ms / 1000.0)
            .ok()
            .map(|deadline| deadline.max(Duration::from_millis(1)))
    }
}

/// Parameters for `tailwind_doc_query`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TailwindDocQueryParams {
    /// Documentation paths or URLs returned by `tailwind_url_query`
    pub urls: Vec<String>,

    /// The search query passed to `tailwind_url_query`
    pub search_query: String,
}

/// `tailwind_url_query` output: the crawl result plus a summary line.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TailwindUrlQueryResult {
    /// Link discovery result
    #[serde(flatten)]
    pub crawl: UrlCrawlResult,

    /// Summary suitable for showing to the user
    pub user_message: String,
}

impl TailwindUrlQueryResult {
    /// Wraps a crawl result and derives its summary line.
    #[must_use]
    pub fn from_crawl(crawl: UrlCrawlResult) -> Self {
        let user_message = match (crawl.status, &crawl.message) {
            (CrawlStatus::Complete, _) => {
                format!("Found {} relevant documentation pages", crawl.results.len())
            }
            (_, Some(message)) => message.clone(),
            (_, None) => "Search finished but the results may be incomplete".to_string(),
        };
        Self { crawl, user_message }
    }
}
