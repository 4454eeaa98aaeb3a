//! Crawl result types.
//!
//! Both crawlers report a [`CrawlStatus`]. A `timeout` is a degraded success
//! carrying partial results, not an error.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// How a crawl ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CrawlStatus {
    /// Every queued page was processed.
    Complete,
    /// The deadline fired first; results are partial.
    Timeout,
    /// The crawl task failed unexpectedly; results are partial.
    Error,
}

impl CrawlStatus {
    /// Returns `true` for [`CrawlStatus::Complete`].
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Timeout => "timeout",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of link discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UrlCrawlResult {
    /// Documentation paths in discovery order, without duplicates
    pub results: Vec<String>,

    /// Query the crawl was run for
    pub query: String,

    /// Documentation version label
    pub version: String,

    /// How the crawl ended
    pub status: CrawlStatus,

    /// Human-readable detail for non-complete outcomes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One scraped documentation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DocPage {
    /// Text of the page's first `h1`
    pub title: String,

    /// Resolved URL the page was fetched from
    pub url: String,

    /// Extracted text blocks, each followed by a blank line
    pub content: String,
}

/// Result of content scraping.
///
/// No two pages share a `url` or a `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DocCrawlResult {
    /// Scraped pages in arrival order
    pub results: Vec<DocPage>,

    /// Query the crawl was run for
    pub query: String,

    /// How the crawl ended
    pub status: CrawlStatus,

    /// Human-readable detail for non-complete outcomes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DocCrawlResult {
    /// Renders the pages as markdown, one section per page.
    ///
    /// Returns `None` when nothing was scraped.
    #[must_use]
    pub fn to_markdown(&self) -> Option<String> {
        if self.results.is_empty() {
            return None;
        }

        let sections: Vec<String> = self
            .results
            .iter()
            .map(|page| {
                format!(
                    "## {}\n\nSource: {}\n\n{}",
                    page.title,
                    page.url,
                    page.content.trim_end()
                )
            })
            .collect();
        Some(sections.join("\n\n---\n\n"))
    }
}

/// Message attached to a timed-out crawl.
pub(crate) fn timeout_message(timeout: Duration, collected: usize) -> String {
    let millis = timeout.as_millis();
    if collected > 0 {
        format!("Crawl timed out after {millis}ms, returning {collected} partial results")
    } else {
        format!("Crawl timed out after {millis}ms before any results were collected")
    }
}
