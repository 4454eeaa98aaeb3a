//! Link discovery on the documentation index page.

use crate::deadline::{RaceOutcome, race, settle};
use crate::fetch::{build_client, fetch_page};
use crate::html::extract_doc_links;
use crate::types::UrlCrawlResult;
use shadcn_mcp_core::{CrawlSettings, Error, Result};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

/// Version label reported with every result.
pub const DOCS_VERSION: &str = "latest";

#[derive(Debug, Default)]
struct LinkState {
    seen: HashSet<String>,
    results: Vec<String>,
}

/// Discovers documentation paths linked from one index page.
///
/// Exactly one page is fetched per crawl. A failed index fetch fails the
/// whole operation, since there is nothing partial to return.
#[derive(Debug, Clone)]
pub struct LinkDiscoveryCrawler {
    client: reqwest::Client,
    index_url: Url,
    link_prefix: String,
    default_timeout: Duration,
}

impl LinkDiscoveryCrawler {
    /// Creates a crawler for the configured site.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the base URL or index path does not
    /// form a valid URL, or the HTTP client cannot be built.
    pub fn new(settings: &CrawlSettings) -> Result<Self> {
        let index_url = Url::parse(&settings.base_url)
            .and_then(|base| base.join(&settings.index_path))
            .map_err(|e| Error::ConfigError {
                message: format!(
                    "invalid crawl index URL '{}{}': {e}",
                    settings.base_url, settings.index_path
                ),
            })?;

        Ok(Self {
            client: build_client()?,
            index_url,
            link_prefix: settings.link_prefix.clone(),
            default_timeout: settings.default_timeout,
        })
    }

    /// The page this crawler visits.
    #[must_use]
    pub const fn index_url(&self) -> &Url {
        &self.index_url
    }

    /// Crawls the index page and collects documentation paths.
    ///
    /// `timeout` defaults to the configured crawl deadline. When the deadline
    /// fires first, the result has status `timeout` and holds whatever paths
    /// were recorded so far.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Crawl`] if the index page cannot be fetched.
    pub async fn crawl(&self, query: &str, timeout: Option<Duration>) -> Result<UrlCrawlResult> {
        let deadline = timeout.unwrap_or(self.default_timeout);
        let state = Arc::new(Mutex::new(LinkState::default()));

        info!(url = %self.index_url, query, ?deadline, "starting link discovery");

        let task = tokio::spawn(discover(
            self.client.clone(),
            self.index_url.to_string(),
            self.link_prefix.clone(),
            Arc::clone(&state),
        ));

        let outcome = match race(task, deadline).await {
            RaceOutcome::Finished(Err(e)) => {
                warn!(url = %self.index_url, error = %e, "link discovery failed");
                return Err(Error::Crawl {
                    url: self.index_url.to_string(),
                    message: e.to_string(),
                });
            }
            RaceOutcome::Finished(Ok(())) => RaceOutcome::Finished(()),
            RaceOutcome::TimedOut => RaceOutcome::TimedOut,
            RaceOutcome::Failed(message) => RaceOutcome::Failed(message),
        };

        let (status, message, results) = {
            let state = state.lock().await;
            settle(outcome, deadline, &state.results)
        };
        debug!(count = results.len(), %status, "link discovery finished");

        Ok(UrlCrawlResult {
            results,
            query: query.to_string(),
            version: DOCS_VERSION.to_string(),
            status,
            message,
        })
    }
}

async fn discover(
    client: reqwest::Client,
    url: String,
    prefix: String,
    state: Arc<Mutex<LinkState>>,
) -> Result<()> {
    let page = fetch_page(&client, &url).await?;
    let links = extract_doc_links(&page.body, &prefix);

    let mut state = state.lock().await;
    for link in links {
        if state.seen.insert(link.clone()) {
            state.results.push(link);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_url_resolution() {
        let crawler = LinkDiscoveryCrawler::new(&CrawlSettings::default()).unwrap();
        assert_eq!(
            crawler.index_url().as_str(),
            "https://tailwindcss.com/docs/installation/using-vite"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let settings = CrawlSettings {
            base_url: "not a url".to_string(),
            ..CrawlSettings::default()
        };
        let err = LinkDiscoveryCrawler::new(&settings).unwrap_err();
        assert!(err.is_config_error());
    }
}
