//! Tailwind CSS documentation crawling.
//!
//! Two crawlers, both bounded by a wall-clock deadline:
//!
//! - [`LinkDiscoveryCrawler`] visits the docs index page and returns the
//!   documentation paths it links to
//! - [`ContentScraper`] fetches a set of pages with bounded parallelism and
//!   extracts a title and text content from each
//!
//! A crawl that runs past its deadline returns early with status
//! [`CrawlStatus::Timeout`] and the results recorded so far. The crawl task
//! is detached, not cancelled.
//!
//! # Examples
//!
//! ```no_run
//! use shadcn_mcp_core::CrawlSettings;
//! use shadcn_mcp_crawler::{ContentScraper, LinkDiscoveryCrawler, resolve_doc_urls};
//! use std::time::Duration;
//! use url::Url;
//!
//! # async fn example() -> shadcn_mcp_core::Result<()> {
//! let settings = CrawlSettings::default();
//! let links = LinkDiscoveryCrawler::new(&settings)?
//!     .crawl("padding", Some(Duration::from_secs(10)))
//!     .await?;
//!
//! let base = Url::parse(&settings.base_url).expect("valid base");
//! let urls = resolve_doc_urls(&base, &links.results[..3.min(links.results.len())]);
//! let pages = ContentScraper::new(&settings)?.scrape(urls, "padding", None).await;
//! println!("{}", pages.to_markdown().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod content;
mod deadline;
mod fetch;
mod links;
mod types;

pub mod html;

pub use content::{ContentScraper, resolve_doc_urls};
pub use links::{DOCS_VERSION, LinkDiscoveryCrawler};
pub use types::{CrawlStatus, DocCrawlResult, DocPage, UrlCrawlResult};
