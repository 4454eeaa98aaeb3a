//! Two-phase UI generation.
//!
//! Phase 1 asks the LLM to pick components from the live catalog. Phase 2
//! fetches usage docs for every pick and asks the LLM to write the UI from
//! them. Refinement skips selection and sends an existing file back to the
//! LLM with a design-focused prompt.

use crate::prompts::{CREATE_UI, FILTER_COMPONENTS, REFINED_UI};
use futures::future::join_all;
use shadcn_mcp_core::traits::{CompletionRequest, LlmClient};
use shadcn_mcp_core::{
    Catalog, ComponentDescriptor, DocKind, Error, FilterResult, Necessity, NecessityFilter, Result,
    ServerConfig, UsageDoc,
};
use shadcn_mcp_docs::{CatalogFetcher, DocReader};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Budgets and limits for the generation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    /// Token budget for the selection call
    pub filter_max_tokens: u32,
    /// Token budget for generation and refinement calls
    pub generate_max_tokens: u32,
    /// Retries for generation and refinement calls
    pub max_retries: u32,
    /// Per-component documentation cap, in characters
    pub max_doc_chars: usize,
    /// Lowest necessity whose docs are fetched
    pub threshold: Necessity,
}

impl GenerationSettings {
    /// Derives pipeline settings from the server configuration.
    #[must_use]
    pub const fn from_config(config: &ServerConfig) -> Self {
        Self {
            filter_max_tokens: config.llm.filter_max_tokens,
            generate_max_tokens: config.llm.generate_max_tokens,
            max_retries: config.llm.max_retries,
            max_doc_chars: config.max_doc_chars,
            threshold: Necessity::Optional,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            filter_max_tokens: 2000,
            generate_max_tokens: 8192,
            max_retries: 2,
            max_doc_chars: 12_000,
            threshold: Necessity::Optional,
        }
    }
}

/// Selection and assembly pipeline behind `create-ui` and `refine-code`.
pub struct UiGenerator {
    llm: Arc<dyn LlmClient>,
    catalog: CatalogFetcher,
    reader: DocReader,
    settings: GenerationSettings,
}

impl std::fmt::Debug for UiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiGenerator")
            .field("catalog", &self.catalog)
            .field("reader", &self.reader)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl UiGenerator {
    /// Creates a generator with catalog and doc access built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if an HTTP client cannot be built.
    pub fn new(llm: Arc<dyn LlmClient>, config: &ServerConfig) -> Result<Self> {
        Ok(Self::with_parts(
            llm,
            CatalogFetcher::new(&config.docs)?,
            DocReader::new(&config.docs)?,
            GenerationSettings::from_config(config),
        ))
    }

    /// Assembles a generator from explicit parts.
    #[must_use]
    pub fn with_parts(
        llm: Arc<dyn LlmClient>,
        catalog: CatalogFetcher,
        reader: DocReader,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            llm,
            catalog,
            reader,
            settings,
        }
    }

    /// Pipeline settings.
    #[must_use]
    pub const fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Generates a UI component for `description`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JsonRepair`] or [`Error::SchemaValidation`] when the
    /// selection reply cannot be understood, and [`Error::Llm`] when either
    /// LLM call fails. Doc fetch failures never fail the call.
    pub async fn create_ui(&self, description: &str) -> Result<String> {
        let catalog = self.catalog.fetch().await;
        let selection = self.select_components(description, &catalog).await?;
        let docs = self.fetch_usage_docs(&selection).await;

        info!(
            components = selection.components.len(),
            charts = selection.charts.len(),
            docs = docs.len(),
            "generating UI"
        );

        let request = CompletionRequest::new(
            CREATE_UI,
            build_generation_message(description, &docs),
            self.settings.generate_max_tokens,
        )
        .with_retries(self.settings.max_retries);

        self.llm.complete(request).await
    }

    /// Phase 1: asks the LLM which catalog entries the UI needs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Llm`] if the call fails, [`Error::JsonRepair`] if no
    /// JSON can be recovered, and [`Error::SchemaValidation`] if the JSON
    /// has the wrong shape.
    pub async fn select_components(
        &self,
        description: &str,
        catalog: &Catalog,
    ) -> Result<FilterResult> {
        let request = CompletionRequest::new(
            FILTER_COMPONENTS,
            build_selection_message(description, catalog)?,
            self.settings.filter_max_tokens,
        );

        let reply = self.llm.complete(request).await?;
        let selection = FilterResult::from_llm_output(&reply)?;
        debug!(?selection, "component selection");
        Ok(selection)
    }

    /// Fetches usage docs for every selected item at or above the threshold.
    ///
    /// Components come first, then charts, each in selection order. Fetches
    /// run concurrently and all settle before this returns. A failed fetch
    /// yields an empty doc.
    pub async fn fetch_usage_docs(&self, selection: &FilterResult) -> Vec<UsageDoc> {
        let filter = NecessityFilter::new(self.settings.threshold);

        let wanted = filter
            .apply(&selection.components)
            .into_iter()
            .map(|d| (d, DocKind::Component))
            .chain(
                filter
                    .apply(&selection.charts)
                    .into_iter()
                    .map(|d| (d, DocKind::Chart)),
            );

        join_all(wanted.map(|(descriptor, kind)| self.usage_doc(descriptor, kind))).await
    }

    async fn usage_doc(&self, descriptor: &ComponentDescriptor, kind: DocKind) -> UsageDoc {
        let doc = match self.reader.read_usage_or_full(&descriptor.name, kind).await {
            Ok(doc) => truncate_chars(doc, self.settings.max_doc_chars),
            Err(e) => {
                warn!(name = %descriptor.name, folder = kind.folder(), error = %e, "doc unavailable");
                String::new()
            }
        };
        UsageDoc::new(descriptor, doc)
    }

    /// Refines an existing UI file.
    ///
    /// An unreadable file is sent as empty content so the call still
    /// produces a best-effort answer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Llm`] if the LLM call fails.
    pub async fn refine_code(
        &self,
        user_message: &str,
        file_path: &Path,
        context: &str,
    ) -> Result<String> {
        let file = match tokio::fs::read_to_string(file_path).await {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %file_path.display(), error = %e, "cannot read refining file");
                String::new()
            }
        };

        let request = CompletionRequest::new(
            REFINED_UI,
            build_refine_message(user_message, &file, context),
            self.settings.generate_max_tokens,
        )
        .with_retries(self.settings.max_retries);

        self.llm.complete(request).await
    }
}

/// Phase 1 user message.
///
/// # Errors
///
/// Returns [`Error::SchemaValidation`] if the catalog cannot be serialized.
pub fn build_selection_message(description: &str, catalog: &Catalog) -> Result<String> {
    let catalog_json = serde_json::to_string(catalog).map_err(|e| Error::SchemaValidation {
        message: format!("failed to serialize catalog: {e}"),
        source: Some(e),
    })?;
    Ok(format!(
        "<description>{description}</description><available-components>{catalog_json}</available-components>"
    ))
}

/// Phase 2 user message: the description plus one tagged block per doc.
#[must_use]
pub fn build_generation_message(description: &str, docs: &[UsageDoc]) -> String {
    let mut message = format!("<description>{description}</description>\n<available-components>\n");
    for doc in docs {
        message.push_str(&format!(
            "<component name=\"{}\">\n<justification><![CDATA[{}]]></justification>\n<documentation><![CDATA[{}]]></documentation>\n</component>\n",
            doc.name,
            escape_cdata(&doc.justification),
            escape_cdata(&doc.doc),
        ));
    }
    message.push_str("</available-components>");
    message
}

/// Refinement user message.
#[must_use]
pub fn build_refine_message(user_message: &str, file_content: &str, context: &str) -> String {
    format!(
        "<description>{user_message}</description>\n<refining-component>{file_content}</refining-component>\n{context}"
    )
}

/// Splits `]]>` so embedded text cannot close the CDATA section.
fn escape_cdata(text: &str) -> String {
    text.replace("]]>", "]]]]><![CDATA[>")
}

/// Keeps at most `max_chars` characters.
fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((cut, _)) = text.char_indices().nth(max_chars) {
        text.truncate(cut);
    }
    text
}
