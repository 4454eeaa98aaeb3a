//! Full and usage-only documentation readers.
//!
//! Every read is a fresh request against the raw docs tree; nothing is
//! cached.
//!
//! # Examples
//!
//! ```
//! use shadcn_mcp_docs::validate_doc_name;
//!
//! assert!(validate_doc_name("date-picker").is_ok());
//! assert!(validate_doc_name("../../etc/passwd").is_err());
//! ```

use crate::extractor::UsageExtractor;
use shadcn_mcp_core::http::{build_client, ensure_success};
use shadcn_mcp_core::{DocKind, DocsSettings, Error, Result, is_kebab_case};
use tracing::debug;

/// Rejects identifiers that are not lowercase kebab-case.
///
/// Names are interpolated into the doc URL, so anything else (path
/// separators, dots, spaces) is refused.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for malformed names.
pub fn validate_doc_name(name: &str) -> Result<()> {
    if is_kebab_case(name) {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "'{name}' is not a valid component name (expected lowercase kebab-case)"
        )))
    }
}

/// Reads component and chart documentation.
#[derive(Debug, Clone)]
pub struct DocReader {
    client: reqwest::Client,
    raw_base_url: String,
    extractor: UsageExtractor,
}

impl DocReader {
    /// Creates a reader for the configured raw docs tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be built.
    pub fn new(settings: &DocsSettings) -> Result<Self> {
        Ok(Self {
            client: build_client(settings.request_timeout)?,
            raw_base_url: settings.raw_base_url.clone(),
            extractor: UsageExtractor::default(),
        })
    }

    /// Replaces the usage extractor.
    #[must_use]
    pub fn with_extractor(mut self, extractor: UsageExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// URL of the markdown file for `name`.
    #[must_use]
    pub fn doc_url(&self, name: &str, kind: DocKind) -> String {
        format!("{}/{}/{name}.md", self.raw_base_url, kind.folder())
    }

    /// Fetches the raw markdown of a doc.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a malformed name and
    /// [`Error::Fetch`] on transport errors or non-success statuses.
    pub async fn read_full_doc(&self, name: &str, kind: DocKind) -> Result<String> {
        validate_doc_name(name)?;
        let url = self.doc_url(name, kind);
        debug!(url = %url, "fetching doc");

        let response = self.client.get(&url).send().await.map_err(|e| Error::Fetch {
            url: url.clone(),
            message: e.to_string(),
            source: Some(Box::new(e)),
        })?;
        let response = ensure_success(&url, response)?;

        response.text().await.map_err(|e| Error::Fetch {
            url,
            message: format!("failed to read body: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Fetches a doc and renders its usage blocks.
    ///
    /// Returns `None` when the doc has no usage section or no matching
    /// blocks.
    ///
    /// # Errors
    ///
    /// Same conditions as [`DocReader::read_full_doc`].
    pub async fn read_usage_doc(&self, name: &str, kind: DocKind) -> Result<Option<String>> {
        let markdown = self.read_full_doc(name, kind).await?;
        Ok(self.extractor.render_usage(&markdown))
    }

    /// Usage-only rendering when available, otherwise the full doc.
    ///
    /// # Errors
    ///
    /// Same conditions as [`DocReader::read_full_doc`].
    pub async fn read_usage_or_full(&self, name: &str, kind: DocKind) -> Result<String> {
        let markdown = self.read_full_doc(name, kind).await?;
        Ok(self
            .extractor
            .render_usage(&markdown)
            .unwrap_or(markdown))
    }
}
