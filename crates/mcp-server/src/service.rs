//! MCP service exposing the shadcn-vue and Tailwind CSS tools.
//!
//! Tools:
//! 1. `read-usage-doc` - usage snippets of a component
//! 2. `read-full-doc` - the complete component doc
//! 3. `create-ui` - generate a UI from a description
//! 4. `refine-code` - improve an existing UI file
//! 5. `tailwind_url_query` - discover Tailwind CSS doc pages
//! 6. `tailwind_doc_query` - scrape content from those pages
//!
//! The service also lists one resource, `tailwindcss-docs`.

use crate::resource::{RESOURCE_MIME_TYPE, RESOURCE_NAME, RESOURCE_URI, TailwindDocsResource};
use crate::types::{
    CreateUiParams, ReadDocParams, RefineCodeParams, TailwindDocQueryParams,
    TailwindUrlQueryParams, TailwindUrlQueryResult,
};
use rmcp::handler::server::ServerHandler;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    AnnotateAble, CallToolResult, Content, Implementation, ListResourcesResult,
    PaginatedRequestParam, ProtocolVersion, RawResource, ReadResourceRequestParam,
    ReadResourceResult, Resource, ResourceContents, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, tool, tool_handler, tool_router};
use serde_json::json;
use shadcn_mcp_core::traits::LlmClient;
use shadcn_mcp_core::{DocKind, Error, ServerConfig};
use shadcn_mcp_crawler::{ContentScraper, LinkDiscoveryCrawler, resolve_doc_urls};
use shadcn_mcp_docs::DocReader;
use shadcn_mcp_generator::{OpenRouterClient, UiGenerator};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use url::Url;

/// Text returned by `read-usage-doc` when a component has no doc.
pub const NO_DOCUMENTATION: &str = "No documentation found for this component";

/// MCP service for shadcn-vue UI generation and Tailwind CSS lookups.
///
/// # Examples
///
/// ```no_run
/// use rmcp::ServiceExt;
/// use rmcp::transport::stdio;
/// use shadcn_mcp_core::ServerConfig;
/// use shadcn_mcp_server::ShadcnUiService;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = ServerConfig::from_env()?;
/// let service = ShadcnUiService::new(&config)?.serve(stdio()).await?;
/// service.waiting().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ShadcnUiService {
    /// Component doc access
    reader: Arc<DocReader>,

    /// Selection, generation and refinement
    generator: Arc<UiGenerator>,

    /// Tailwind docs link discovery
    links: Arc<LinkDiscoveryCrawler>,

    /// Tailwind docs page scraping
    scraper: Arc<ContentScraper>,

    /// Base that relative doc paths resolve against
    tailwind_base: Url,

    /// Backing fetcher for `tailwindcss-docs`
    resource: Arc<TailwindDocsResource>,

    /// Tool router for MCP protocol
    tool_router: ToolRouter<Self>,
}

impl ShadcnUiService {
    /// Creates the service with an OpenRouter-backed LLM client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if a URL in `config` is invalid or an
    /// HTTP client cannot be built.
    pub fn new(config: &ServerConfig) -> shadcn_mcp_core::Result<Self> {
        let llm = Arc::new(OpenRouterClient::new(&config.llm)?);
        Self::with_llm(config, llm)
    }

    /// Creates the service around an explicit LLM client.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ShadcnUiService::new`].
    pub fn with_llm(
        config: &ServerConfig,
        llm: Arc<dyn LlmClient>,
    ) -> shadcn_mcp_core::Result<Self> {
        let tailwind_base = Url::parse(&config.crawl.base_url).map_err(|e| Error::ConfigError {
            message: format!("invalid Tailwind base URL '{}': {e}", config.crawl.base_url),
        })?;

        Ok(Self {
            reader: Arc::new(DocReader::new(&config.docs)?),
            generator: Arc::new(UiGenerator::new(llm, config)?),
            links: Arc::new(LinkDiscoveryCrawler::new(&config.crawl)?),
            scraper: Arc::new(ContentScraper::new(&config.crawl)?),
            tailwind_base,
            resource: Arc::new(TailwindDocsResource::new(&config.crawl)?),
            tool_router: Self::tool_router(),
        })
    }

    /// Resources advertised by `resources/list`.
    #[must_use]
    pub fn resources() -> Vec<Resource> {
        let mut raw = RawResource::new(RESOURCE_URI, RESOURCE_NAME.to_string());
        raw.description = Some("Plain-text dump of the Tailwind CSS documentation".to_string());
        raw.mime_type = Some(RESOURCE_MIME_TYPE.to_string());
        vec![raw.no_annotation()]
    }

    /// Reads a resource by URI.
    ///
    /// # Errors
    ///
    /// Returns `resource_not_found` for unknown URIs and `internal_error`
    /// if the documentation cannot be fetched.
    pub async fn read_resource_uri(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        if uri != RESOURCE_URI {
            return Err(McpError::resource_not_found(
                "resource_not_found",
                Some(json!({ "uri": uri })),
            ));
        }

        let text = self.resource.fetch().await.map_err(|e| to_mcp_error(&e))?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }
}

#[tool_router]
impl ShadcnUiService {
    /// Usage snippets of a component, falling back to the full doc.
    #[tool(
        name = "read-usage-doc",
        description = "Read the usage section of a shadcn-vue component doc. Falls back to the full doc when the component has no usage examples. Use this when the user mentions /usedoc."
    )]
    async fn read_usage_doc(
        &self,
        Parameters(params): Parameters<ReadDocParams>,
    ) -> Result<CallToolResult, McpError> {
        let text = match self
            .reader
            .read_usage_or_full(&params.name, DocKind::Component)
            .await
        {
            Ok(doc) if !doc.trim().is_empty() => doc,
            Ok(_) => NO_DOCUMENTATION.to_string(),
            Err(e) if e.is_fetch_error() => {
                warn!(name = %params.name, error = %e, "usage doc unavailable");
                NO_DOCUMENTATION.to_string()
            }
            Err(e) => return Err(to_mcp_error(&e)),
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// The raw markdown doc of a component.
    #[tool(
        name = "read-full-doc",
        description = "Read the complete shadcn-vue documentation of a component. Use this when the user mentions /doc."
    )]
    async fn read_full_doc(
        &self,
        Parameters(params): Parameters<ReadDocParams>,
    ) -> Result<CallToolResult, McpError> {
        let doc = self
            .reader
            .read_full_doc(&params.name, DocKind::Component)
            .await
            .map_err(|e| to_mcp_error(&e))?;

        Ok(CallToolResult::success(vec![Content::text(doc)]))
    }

    /// Generates UI code from a description.
    #[tool(
        name = "create-ui",
        description = "Create a web UI with shadcn-vue components and Tailwind CSS from a description. Use this when the user mentions /ui."
    )]
    async fn create_ui(
        &self,
        Parameters(params): Parameters<CreateUiParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(description = %params.description, "create-ui");

        let code = self
            .generator
            .create_ui(&params.description)
            .await
            .map_err(|e| to_mcp_error(&e))?;

        Ok(CallToolResult::success(vec![Content::text(code)]))
    }

    /// Refines an existing UI file.
    #[tool(
        name = "refine-code",
        description = "Refine or improve existing UI code with shadcn-vue components and Tailwind CSS. Use this when the user mentions /refine."
    )]
    async fn refine_code(
        &self,
        Parameters(params): Parameters<RefineCodeParams>,
    ) -> Result<CallToolResult, McpError> {
        // Unreadable paths, relative ones included, refine an empty file.
        let path = Path::new(&params.absolute_path_to_refining_file);

        let code = self
            .generator
            .refine_code(&params.user_message, path, &params.context)
            .await
            .map_err(|e| to_mcp_error(&e))?;

        Ok(CallToolResult::success(vec![Content::text(code)]))
    }

    /// Finds Tailwind CSS documentation pages.
    #[tool(
        name = "tailwind_url_query",
        description = "Find official Tailwind CSS documentation pages for styling questions: utility classes, spacing, colors, responsive breakpoints, dark mode or theming. Pass the returned results and query to tailwind_doc_query to read the pages."
    )]
    async fn tailwind_url_query(
        &self,
        Parameters(params): Parameters<TailwindUrlQueryParams>,
    ) -> Result<CallToolResult, McpError> {
        let Some(deadline) = params.deadline() else {
            return Err(McpError::invalid_params(
                "timeout must be a positive number of milliseconds",
                None,
            ));
        };

        let crawl = self
            .links
            .crawl(&params.search_query, Some(deadline))
            .await
            .map_err(|e| to_mcp_error(&e))?;
        let result = TailwindUrlQueryResult::from_crawl(crawl);

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&result).map_err(|e| {
                McpError::internal_error(format!("Failed to serialize result: {e}"), None)
            })?,
        )]))
    }

    /// Scrapes Tailwind CSS documentation pages.
    #[tool(
        name = "tailwind_doc_query",
        description = "Read Tailwind CSS documentation pages found by tailwind_url_query. Takes {urls, searchQuery} and returns each page's title, link and text content as markdown."
    )]
    async fn tailwind_doc_query(
        &self,
        Parameters(params): Parameters<TailwindDocQueryParams>,
    ) -> Result<CallToolResult, McpError> {
        let urls = resolve_doc_urls(&self.tailwind_base, &params.urls);
        let crawl = self.scraper.scrape(urls, &params.search_query, None).await;

        let mut text = crawl.to_markdown().unwrap_or_else(|| {
            format!(
                "No documentation content found for \"{}\"",
                params.search_query
            )
        });
        if let Some(message) = crawl.message.as_deref()
            && !crawl.status.is_complete()
        {
            text.push_str("\n\n> ");
            text.push_str(message);
        }

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for ShadcnUiService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Build Vue UIs with shadcn-vue and Tailwind CSS. Use read-usage-doc or \
                 read-full-doc for component docs, create-ui to generate a UI from a \
                 description and refine-code to improve an existing file. For styling \
                 questions call tailwind_url_query, then tailwind_doc_query with its results."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: Self::resources(),
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        self.read_resource_uri(&uri).await
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Maps a library error onto the MCP error space.
fn to_mcp_error(error: &Error) -> McpError {
    if let Error::InvalidArgument(message) = error {
        return McpError::invalid_params(message.clone(), None);
    }
    error!(error = %error, "tool call failed");
    McpError::internal_error(error.to_string(), None)
}
