//! Server configuration.
//!
//! All settings are read once at process start and passed by reference into
//! the pipeline, doc readers and crawlers. Nothing reads the environment after
//! startup.
//!
//! # Examples
//!
//! ```
//! use shadcn_mcp_core::ServerConfig;
//! use std::collections::HashMap;
//!
//! let env: HashMap<&str, &str> = HashMap::from([
//!     ("OPENROUTER_API_KEY", "sk-test"),
//!     ("OPENROUTER_MODEL_ID", "openai/gpt-4o-mini"),
//! ]);
//!
//! let config = ServerConfig::from_lookup(|key| env.get(key).map(|v| (*v).to_string())).unwrap();
//! assert_eq!(config.llm.model_id, "openai/gpt-4o-mini");
//! assert_eq!(config.crawl.max_connections, 15);
//! ```

use crate::{Error, Result};
use secrecy::SecretString;
use std::time::Duration;

/// Environment variable holding the LLM provider API key.
pub const ENV_API_KEY: &str = "OPENROUTER_API_KEY";
/// Environment variable holding the LLM model identifier.
pub const ENV_MODEL_ID: &str = "OPENROUTER_MODEL_ID";
/// Environment variable overriding the LLM provider endpoint.
pub const ENV_BASE_URL: &str = "OPENROUTER_BASE_URL";
/// Environment variable overriding the raw documentation base URL.
pub const ENV_DOCS_RAW_URL: &str = "SHADCN_DOCS_RAW_URL";
/// Environment variable overriding the documentation listing API URL.
pub const ENV_DOCS_API_URL: &str = "SHADCN_DOCS_API_URL";
/// Environment variable overriding the Tailwind CSS site URL.
pub const ENV_TAILWIND_BASE_URL: &str = "TAILWIND_BASE_URL";
/// Environment variable overriding the `tailwindcss-docs` resource URL.
pub const ENV_TAILWIND_RESOURCE_URL: &str = "TAILWIND_DOCS_RESOURCE_URL";
/// Environment variable overriding the content crawler pool size.
pub const ENV_CRAWL_MAX_CONNECTIONS: &str = "CRAWL_MAX_CONNECTIONS";

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_DOCS_RAW_URL: &str =
    "https://raw.gitmirror.com/unovue/shadcn-vue/dev/apps/www/src/content/docs";
const DEFAULT_DOCS_API_URL: &str =
    "https://api.github.com/repos/unovue/shadcn-vue/contents/apps/www/src/content/docs";
const DEFAULT_TAILWIND_BASE_URL: &str = "https://tailwindcss.com";
const DEFAULT_TAILWIND_RESOURCE_URL: &str =
    "https://context7.com/tailwindlabs/tailwindcss.com/llms.txt?tokens=198559";

/// Complete server configuration.
#[derive(Debug)]
pub struct ServerConfig {
    /// LLM provider settings.
    pub llm: LlmSettings,

    /// Component documentation sources.
    pub docs: DocsSettings,

    /// Tailwind CSS crawl settings.
    pub crawl: CrawlSettings,

    /// Upper bound on characters of documentation embedded per component in
    /// the code generation prompt.
    ///
    /// Default: 12 000
    pub max_doc_chars: usize,
}

/// LLM provider settings (OpenAI-compatible chat completions endpoint).
#[derive(Debug)]
pub struct LlmSettings {
    /// API key, never logged.
    pub api_key: SecretString,

    /// Model identifier, e.g. `anthropic/claude-3.5-sonnet`.
    pub model_id: String,

    /// Endpoint base URL; `/chat/completions` is appended.
    ///
    /// Default: `https://openrouter.ai/api/v1`
    pub base_url: String,

    /// Token budget for the component selection call.
    ///
    /// Default: 2000
    pub filter_max_tokens: u32,

    /// Token budget for code generation and refinement calls.
    ///
    /// Default: 8192
    pub generate_max_tokens: u32,

    /// Retries for code generation and refinement calls.
    ///
    /// Default: 2
    pub max_retries: u32,

    /// Per-request timeout.
    ///
    /// Default: 120 seconds
    pub request_timeout: Duration,
}

/// Component documentation sources.
#[derive(Debug, Clone)]
pub struct DocsSettings {
    /// Base URL of raw markdown docs; `components/<name>.md` and
    /// `charts/<name>.md` live below it.
    pub raw_base_url: String,

    /// Directory listing API (GitHub contents API) for the same tree.
    pub listing_api_url: String,

    /// Per-request timeout for documentation fetches.
    ///
    /// Default: 30 seconds
    pub request_timeout: Duration,
}

/// Tailwind CSS crawl settings.
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Site root used to resolve documentation paths.
    ///
    /// Default: `https://tailwindcss.com`
    pub base_url: String,

    /// Index page visited by link discovery.
    ///
    /// Default: `/docs/installation/using-vite`
    pub index_path: String,

    /// Only links starting with this prefix are collected.
    ///
    /// Default: `/docs/`
    pub link_prefix: String,

    /// Maximum simultaneous page fetches in the content crawler.
    ///
    /// Default: 15
    pub max_connections: usize,

    /// Crawl deadline used when the caller does not pass one.
    ///
    /// Default: 30 seconds
    pub default_timeout: Duration,

    /// Source of the `tailwindcss-docs` resource.
    pub resource_url: String,
}

impl Default for DocsSettings {
    fn default() -> Self {
        Self {
            raw_base_url: DEFAULT_DOCS_RAW_URL.to_string(),
            listing_api_url: DEFAULT_DOCS_API_URL.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TAILWIND_BASE_URL.to_string(),
            index_path: "/docs/installation/using-vite".to_string(),
            link_prefix: "/docs/".to_string(),
            max_connections: 15,
            default_timeout: Duration::from_secs(30),
            resource_url: DEFAULT_TAILWIND_RESOURCE_URL.to_string(),
        }
    }
}

impl LlmSettings {
    /// Creates LLM settings with default budgets for the given credentials.
    #[must_use]
    pub fn new(api_key: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            model_id: model_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            filter_max_tokens: 2000,
            generate_max_tokens: 8192,
            max_retries: 2,
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if `OPENROUTER_API_KEY` or
    /// `OPENROUTER_MODEL_ID` is missing, or if an override has an invalid
    /// value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as missing.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let model_id = get(ENV_MODEL_ID).ok_or_else(|| Error::ConfigError {
            message: format!("{ENV_MODEL_ID} is not set"),
        })?;
        let api_key = get(ENV_API_KEY).ok_or_else(|| Error::ConfigError {
            message: format!("{ENV_API_KEY} is not set"),
        })?;

        let mut llm = LlmSettings::new(api_key, model_id);
        if let Some(base_url) = get(ENV_BASE_URL) {
            llm.base_url = base_url.trim_end_matches('/').to_string();
        }

        let mut docs = DocsSettings::default();
        if let Some(raw) = get(ENV_DOCS_RAW_URL) {
            docs.raw_base_url = raw.trim_end_matches('/').to_string();
        }
        if let Some(api) = get(ENV_DOCS_API_URL) {
            docs.listing_api_url = api.trim_end_matches('/').to_string();
        }

        let mut crawl = CrawlSettings::default();
        if let Some(base) = get(ENV_TAILWIND_BASE_URL) {
            crawl.base_url = base.trim_end_matches('/').to_string();
        }
        if let Some(resource) = get(ENV_TAILWIND_RESOURCE_URL) {
            crawl.resource_url = resource;
        }
        if let Some(raw) = get(ENV_CRAWL_MAX_CONNECTIONS) {
            crawl.max_connections = raw.parse().map_err(|_| Error::ConfigError {
                message: format!("{ENV_CRAWL_MAX_CONNECTIONS} must be a positive integer, got '{raw}'"),
            })?;
        }

        let config = Self {
            llm,
            docs,
            crawl,
            max_doc_chars: 12_000,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if:
    /// - The model id is empty
    /// - A token budget is zero
    /// - The crawler pool size is zero
    /// - The crawl deadline is zero
    pub fn validate(&self) -> Result<()> {
        if self.llm.model_id.is_empty() {
            return Err(Error::ConfigError {
                message: "Model id cannot be empty".to_string(),
            });
        }

        if self.llm.filter_max_tokens == 0 || self.llm.generate_max_tokens == 0 {
            return Err(Error::ConfigError {
                message: "Token budgets must be greater than zero".to_string(),
            });
        }

        if self.crawl.max_connections == 0 {
            return Err(Error::ConfigError {
                message: "Crawler pool size must be greater than zero".to_string(),
            });
        }

        if self.crawl.default_timeout.is_zero() {
            return Err(Error::ConfigError {
                message: "Crawl timeout must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |key| map.get(key).map(|v| (*v).to_string())
    }

    #[test]
    fn test_required_values_and_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "sk-test"),
            (ENV_MODEL_ID, "openai/gpt-4o"),
        ]))
        .unwrap();

        assert_eq!(config.llm.api_key.expose_secret(), "sk-test");
        assert_eq!(config.llm.model_id, "openai/gpt-4o");
        assert_eq!(config.llm.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.llm.filter_max_tokens, 2000);
        assert_eq!(config.llm.generate_max_tokens, 8192);
        assert_eq!(config.llm.max_retries, 2);
        assert_eq!(config.crawl.base_url, "https://tailwindcss.com");
        assert_eq!(config.crawl.link_prefix, "/docs/");
        assert_eq!(config.crawl.default_timeout, Duration::from_secs(30));
        assert_eq!(config.max_doc_chars, 12_000);
    }

    #[test]
    fn test_missing_model_id() {
        let err = ServerConfig::from_lookup(lookup(&[(ENV_API_KEY, "sk-test")])).unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains(ENV_MODEL_ID));
    }

    #[test]
    fn test_missing_api_key() {
        let err =
            ServerConfig::from_lookup(lookup(&[(ENV_MODEL_ID, "openai/gpt-4o")])).unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains(ENV_API_KEY));
    }

    #[test]
    fn test_blank_value_is_missing() {
        let err = ServerConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "   "),
            (ENV_MODEL_ID, "openai/gpt-4o"),
        ]))
        .unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_overrides_trim_trailing_slash() {
        let config = ServerConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "sk-test"),
            (ENV_MODEL_ID, "m"),
            (ENV_BASE_URL, "http://localhost:8080/v1/"),
            (ENV_DOCS_RAW_URL, "http://localhost:9000/docs/"),
            (ENV_TAILWIND_BASE_URL, "http://localhost:9001/"),
            (ENV_CRAWL_MAX_CONNECTIONS, "4"),
        ]))
        .unwrap();

        assert_eq!(config.llm.base_url, "http://localhost:8080/v1");
        assert_eq!(config.docs.raw_base_url, "http://localhost:9000/docs");
        assert_eq!(config.crawl.base_url, "http://localhost:9001");
        assert_eq!(config.crawl.max_connections, 4);
    }

    #[test]
    fn test_invalid_pool_size() {
        let err = ServerConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "sk-test"),
            (ENV_MODEL_ID, "m"),
            (ENV_CRAWL_MAX_CONNECTIONS, "0"),
        ]))
        .unwrap_err();
        assert!(err.is_config_error());

        let err = ServerConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "sk-test"),
            (ENV_MODEL_ID, "m"),
            (ENV_CRAWL_MAX_CONNECTIONS, "many"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("positive integer"));
    }

    #[test]
    fn test_api_key_not_in_debug_output() {
        let config = ServerConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "sk-very-secret"),
            (ENV_MODEL_ID, "m"),
        ]))
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-very-secret"));
    }
}
