//! Bounded-concurrency content scraping.

use crate::deadline::{RaceOutcome, race, settle};
use crate::fetch::{build_client, fetch_page};
use crate::html::extract_page;
use crate::types::{CrawlStatus, DocCrawlResult, DocPage};
use shadcn_mcp_core::{CrawlSettings, Result};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use url::Url;

/// Seen URLs, seen titles and results, guarded together so every
/// check-and-insert is atomic with the push it guards.
#[derive(Debug, Default)]
struct ScrapeState {
    seen_urls: HashSet<String>,
    seen_titles: HashSet<String>,
    results: Vec<DocPage>,
}

/// Scrapes title and text content from documentation pages.
#[derive(Debug, Clone)]
pub struct ContentScraper {
    client: reqwest::Client,
    max_connections: usize,
    default_timeout: Duration,
}

impl ContentScraper {
    /// Creates a scraper using the configured pool size and deadline.
    ///
    /// # Errors
    ///
    /// Returns [`shadcn_mcp_core::Error::ConfigError`] if the HTTP client
    /// cannot be built.
    pub fn new(settings: &CrawlSettings) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            max_connections: settings.max_connections.max(1),
            default_timeout: settings.default_timeout,
        })
    }

    /// Maximum simultaneous page fetches.
    #[must_use]
    pub const fn max_connections(&self) -> usize {
        self.max_connections
    }

    /// Fetches every URL with at most `max_connections` in flight.
    ///
    /// Pages are recorded in arrival order. A page whose resolved URL or
    /// title was already seen, or that has no title, is dropped. Fetch
    /// errors are logged and skipped. The result never fails: a deadline
    /// yields `timeout` and a crashed crawl yields `error`, both with the
    /// pages recorded so far.
    pub async fn scrape(
        &self,
        urls: Vec<String>,
        query: &str,
        timeout: Option<Duration>,
    ) -> DocCrawlResult {
        if urls.is_empty() {
            return DocCrawlResult {
                results: Vec::new(),
                query: query.to_string(),
                status: CrawlStatus::Complete,
                message: None,
            };
        }

        let deadline = timeout.unwrap_or(self.default_timeout);
        let state = Arc::new(Mutex::new(ScrapeState::default()));

        info!(
            pages = urls.len(),
            max_connections = self.max_connections,
            query,
            ?deadline,
            "starting content scrape"
        );

        let task = tokio::spawn(scrape_all(
            self.client.clone(),
            urls,
            self.max_connections,
            Arc::clone(&state),
        ));

        let outcome = race(task, deadline).await;
        if let RaceOutcome::Failed(message) = &outcome {
            warn!(%message, "content scrape failed");
        }

        let (status, message, results) = {
            let state = state.lock().await;
            settle(outcome, deadline, &state.results)
        };
        debug!(count = results.len(), %status, "content scrape finished");

        DocCrawlResult {
            results,
            query: query.to_string(),
            status,
            message,
        }
    }
}

/// Resolves documentation paths against `base`; absolute URLs pass through.
///
/// Entries that cannot be resolved are logged and dropped.
#[must_use]
pub fn resolve_doc_urls(base: &Url, paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .filter_map(|path| match base.join(path) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                warn!(path = %path, error = %e, "skipping unresolvable documentation path");
                None
            }
        })
        .collect()
}

async fn scrape_all(
    client: reqwest::Client,
    urls: Vec<String>,
    max_connections: usize,
    state: Arc<Mutex<ScrapeState>>,
) {
    let semaphore = Arc::new(Semaphore::new(max_connections));
    let mut pages = JoinSet::new();

    for url in urls {
        let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
            break;
        };
        let client = client.clone();
        let state = Arc::clone(&state);
        pages.spawn(async move {
            let _permit = permit;
            scrape_page(&client, &url, &state).await;
        });
    }

    while let Some(joined) = pages.join_next().await {
        if let Err(e) = joined
            && e.is_panic()
        {
            std::panic::resume_unwind(e.into_panic());
        }
    }
}

async fn scrape_page(client: &reqwest::Client, url: &str, state: &Mutex<ScrapeState>) {
    let page = match fetch_page(client, url).await {
        Ok(page) => page,
        Err(e) => {
            warn!(url, error = %e, "skipping page");
            return;
        }
    };

    if !state.lock().await.seen_urls.insert(page.url.clone()) {
        debug!(url = %page.url, "duplicate url");
        return;
    }

    let extracted = extract_page(&page.body);
    if extracted.title.is_empty() {
        debug!(url = %page.url, "page has no title");
        return;
    }

    let mut state = state.lock().await;
    if !state.seen_titles.insert(extracted.title.clone()) {
        debug!(url = %page.url, title = %extracted.title, "duplicate title");
        return;
    }
    state.results.push(DocPage {
        title: extracted.title,
        url: page.url,
        content: extracted.content,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_and_absolute() {
        let base = Url::parse("https://tailwindcss.com").unwrap();
        let resolved = resolve_doc_urls(
            &base,
            &[
                "/docs/padding".to_string(),
                "https://example.com/docs/margin".to_string(),
            ],
        );
        assert_eq!(
            resolved,
            vec![
                "https://tailwindcss.com/docs/padding",
                "https://example.com/docs/margin"
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_input_completes_immediately() {
        let scraper = ContentScraper::new(&CrawlSettings::default()).unwrap();
        let result = scraper
            .scrape(Vec::new(), "colors", Some(Duration::from_millis(1)))
            .await;

        assert_eq!(result.status, CrawlStatus::Complete);
        assert!(result.results.is_empty());
        assert!(result.message.is_none());
    }

    #[test]
    fn test_pool_size_floor() {
        let settings = CrawlSettings {
            max_connections: 0,
            ..CrawlSettings::default()
        };
        assert_eq!(ContentScraper::new(&settings).unwrap().max_connections(), 1);
    }
}
