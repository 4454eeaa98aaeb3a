//! Component catalog discovery.
//!
//! The catalog is the list of documentation file stems under the
//! `components` and `charts` folders of the docs tree, read through the
//! GitHub contents API. It is fetched fresh for every `create-ui` call.

use shadcn_mcp_core::http::{build_client, ensure_success};
use serde::Deserialize;
use shadcn_mcp_core::{Catalog, DocKind, DocsSettings, Error, Result};
use tracing::{debug, warn};

/// One entry of a GitHub contents listing.
#[derive(Debug, Deserialize)]
struct ListingEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Lists available component and chart identifiers.
#[derive(Debug, Clone)]
pub struct CatalogFetcher {
    client: reqwest::Client,
    listing_api_url: String,
}

impl CatalogFetcher {
    /// Creates a fetcher for the configured listing API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be built.
    pub fn new(settings: &DocsSettings) -> Result<Self> {
        Ok(Self {
            client: build_client(settings.request_timeout)?,
            listing_api_url: settings.listing_api_url.clone(),
        })
    }

    /// Fetches both folders concurrently.
    ///
    /// A failing folder contributes an empty list; the other folder is
    /// unaffected.
    pub async fn fetch(&self) -> Catalog {
        let (components, charts) = tokio::join!(
            self.list_or_empty(DocKind::Component),
            self.list_or_empty(DocKind::Chart),
        );

        debug!(
            components = components.len(),
            charts = charts.len(),
            "fetched component catalog"
        );

        Catalog { components, charts }
    }

    /// Lists the documentation stems of one folder.
    ///
    /// Only `.md` files are kept; the extension is stripped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] on transport errors, non-success statuses or
    /// an unexpected response body.
    pub async fn list(&self, kind: DocKind) -> Result<Vec<String>> {
        let url = format!("{}/{}", self.listing_api_url, kind.folder());

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| Error::Fetch {
                url: url.clone(),
                message: e.to_string(),
                source: Some(Box::new(e)),
            })?;
        let response = ensure_success(&url, response)?;

        let entries: Vec<ListingEntry> = response.json().await.map_err(|e| Error::Fetch {
            url: url.clone(),
            message: format!("unexpected listing body: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(doc_stems(entries))
    }

    async fn list_or_empty(&self, kind: DocKind) -> Vec<String> {
        match self.list(kind).await {
            Ok(names) => names,
            Err(e) => {
                warn!(folder = kind.folder(), error = %e, "catalog listing failed");
                Vec::new()
            }
        }
    }
}

fn doc_stems(entries: Vec<ListingEntry>) -> Vec<String> {
    entries
        .into_iter()
        .filter(|entry| entry.kind == "file")
        .filter_map(|entry| entry.name.strip_suffix(".md").map(str::to_string))
        .collect()
}
