//! Page fetching shared by both crawlers.

use shadcn_mcp_core::http::{self, ensure_success};
use shadcn_mcp_core::{Error, Result};
use std::time::Duration;

/// Per-request timeout; the crawl deadline bounds the operation as a whole.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A fetched HTML page.
#[derive(Debug)]
pub(crate) struct FetchedPage {
    /// URL after redirects
    pub url: String,
    pub body: String,
}

pub(crate) fn build_client() -> Result<reqwest::Client> {
    http::build_client(REQUEST_TIMEOUT)
}

/// GETs `url` and reads the body as text.
///
/// Non-success statuses are errors.
pub(crate) async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<FetchedPage> {
    let fetch_error = |message: String, source: reqwest::Error| Error::Fetch {
        url: url.to_string(),
        message,
        source: Some(Box::new(source)),
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_error(e.to_string(), e))?;

    let response = ensure_success(url, response)?;
    let final_url = response.url().to_string();
    let body = response
        .text()
        .await
        .map_err(|e| fetch_error(format!("failed to read body: {e}"), e))?;

    Ok(FetchedPage {
        url: final_url,
        body,
    })
}
