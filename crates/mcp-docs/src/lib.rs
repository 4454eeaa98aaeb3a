//! shadcn-vue documentation access.
//!
//! Provides the three documentation building blocks of the server:
//!
//! - [`CatalogFetcher`] lists available component and chart identifiers
//! - [`DocReader`] fetches raw markdown for one identifier
//! - [`UsageExtractor`] reduces a doc to its usage examples
//!
//! # Examples
//!
//! ```no_run
//! use shadcn_mcp_core::{DocKind, DocsSettings};
//! use shadcn_mcp_docs::DocReader;
//!
//! # async fn example() -> shadcn_mcp_core::Result<()> {
//! let reader = DocReader::new(&DocsSettings::default())?;
//! let usage = reader.read_usage_or_full("button", DocKind::Component).await?;
//! println!("{usage}");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod catalog;
mod extractor;
mod reader;

pub use catalog::CatalogFetcher;
pub use extractor::{DEFAULT_LANGUAGE, DEFAULT_SECTION, UsageExtractor};
pub use reader::{DocReader, validate_doc_name};
