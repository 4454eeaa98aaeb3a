//! The `tailwindcss-docs` resource.
//!
//! A plain-text dump of the Tailwind CSS documentation, fetched from the
//! configured URL on every read.

use shadcn_mcp_core::{CrawlSettings, Error, Result};
use shadcn_mcp_core::http::{build_client, ensure_success};
use tracing::debug;

/// URI the resource is listed under.
pub const RESOURCE_URI: &str = "tailwindcss://docs";

/// Resource name.
pub const RESOURCE_NAME: &str = "tailwindcss-docs";

/// MIME type of the resource body.
pub const RESOURCE_MIME_TYPE: &str = "text/plain";

/// Fetches the documentation dump behind [`RESOURCE_URI`].
#[derive(Debug, Clone)]
pub struct TailwindDocsResource {
    client: reqwest::Client,
    source_url: String,
}

impl TailwindDocsResource {
    /// Creates a resource backed by `settings.resource_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be built.
    pub fn new(settings: &CrawlSettings) -> Result<Self> {
        Ok(Self {
            client: build_client(settings.default_timeout)?,
            source_url: settings.resource_url.clone(),
        })
    }

    /// URL the text is fetched from.
    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Fetches the current text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] on transport errors or non-success statuses.
    pub async fn fetch(&self) -> Result<String> {
        debug!(url = %self.source_url, "fetching tailwindcss docs resource");

        let response = self
            .client
            .get(&self.source_url)
            .send()
            .await
            .map_err(|e| Error::Fetch {
                url: self.source_url.clone(),
                message: e.to_string(),
                source: Some(Box::new(e)),
            })?;
        let response = ensure_success(&self.source_url, response)?;

        response.text().await.map_err(|e| Error::Fetch {
            url: self.source_url.clone(),
            message: format!("failed to read body: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
