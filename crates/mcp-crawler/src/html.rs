//! HTML extraction.
//!
//! `scraper::Html` is not `Send`, so these functions are synchronous and are
//! called only after the response body has been fully read.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static H1_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("valid selector"));
static CONTENT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("p, li, code, pre, h2, h3, h4, h5, h6").expect("valid selector")
});
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));

/// Title and text content of one documentation page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Trimmed text of the first `h1`; empty when the page has none
    pub title: String,
    /// Text blocks under the title's parent, each followed by `"\n\n"`
    pub content: String,
}

/// Collects `href`s starting with `prefix` that carry no fragment, in
/// document order without duplicates.
#[must_use]
pub fn extract_doc_links(html: &str, prefix: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links: Vec<String> = Vec::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if href.starts_with(prefix) && !href.contains('#') && !links.iter().any(|l| l == href) {
            links.push(href.to_string());
        }
    }

    links
}

/// Extracts the title and content blocks of a documentation page.
///
/// Content is taken from the descendants of the first `h1`'s parent element,
/// in document order. A nested match (`code` inside `pre`) contributes its
/// text again, once per matching element.
#[must_use]
pub fn extract_page(html: &str) -> ExtractedPage {
    let document = Html::parse_document(html);

    let Some(h1) = document.select(&H1_SELECTOR).next() else {
        return ExtractedPage {
            title: String::new(),
            content: String::new(),
        };
    };

    let title = element_text(h1).trim().to_string();

    let content = h1
        .parent()
        .and_then(ElementRef::wrap)
        .map(|container| {
            container
                .select(&CONTENT_SELECTOR)
                .fold(String::new(), |mut acc, el| {
                    acc.push_str(element_text(el).trim());
                    acc.push_str("\n\n");
                    acc
                })
        })
        .unwrap_or_default();

    ExtractedPage { title, content }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
