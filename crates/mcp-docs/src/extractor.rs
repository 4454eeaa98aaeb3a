//! Usage-block extraction from component markdown.
//!
//! Component docs put their canonical example code under a `## Usage`
//! heading. [`UsageExtractor`] pulls the fenced blocks of one language out of
//! that section and renders them as a single nested fence, which keeps the
//! prompt for code generation small.
//!
//! # Examples
//!
//! ```
//! use shadcn_mcp_docs::UsageExtractor;
//!
//! let markdown = "# Button\n\n## Usage\n\n```vue\n<Button>Click</Button>\n```\n\n## Examples\n\n```vue\n<Button variant=\"outline\" />\n```\n";
//!
//! let extractor = UsageExtractor::default();
//! let blocks = extractor.extract(markdown);
//! assert_eq!(blocks, vec!["<Button>Click</Button>".to_string()]);
//!
//! let rendered = extractor.render(&blocks);
//! assert_eq!(rendered, "````vue\n<Button>Click</Button>\n````");
//! ```

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag, TagEnd};
use std::ops::Range;

/// Default section heading.
pub const DEFAULT_SECTION: &str = "Usage";

/// Default fence language.
pub const DEFAULT_LANGUAGE: &str = "vue";

/// Extracts language-tagged code blocks from a named level-2 section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageExtractor {
    section: String,
    language: String,
}

impl Default for UsageExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_SECTION, DEFAULT_LANGUAGE)
    }
}

impl UsageExtractor {
    /// Creates an extractor for the given section heading and fence language.
    #[must_use]
    pub fn new(section: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            language: language.into(),
        }
    }

    /// Section heading text this extractor looks for.
    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Fence language this extractor collects.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the bodies of matching code blocks in document order.
    ///
    /// The section starts on the line where the first level-2 heading whose
    /// only child is the text `section` ends, and stops at the next level-2
    /// heading. A document without that section, or a section without
    /// matching blocks, yields an empty vector.
    #[must_use]
    pub fn extract(&self, markdown: &str) -> Vec<String> {
        let outline = Outline::parse(markdown);

        let Some(section_start) = outline
            .headings
            .iter()
            .find(|h| h.is_sole_text(&self.section))
            .map(|h| h.end_line)
        else {
            tracing::debug!(section = %self.section, "section not found in markdown");
            return Vec::new();
        };

        let section_end = outline
            .headings
            .iter()
            .map(|h| h.start_line)
            .filter(|&line| line > section_start)
            .min()
            .unwrap_or(usize::MAX);

        outline
            .code_blocks
            .into_iter()
            .filter(|block| {
                block.start_line > section_start
                    && block.start_line < section_end
                    && block.language.as_deref() == Some(self.language.as_str())
            })
            .map(|block| block.body)
            .collect()
    }

    /// Joins blocks with a newline and wraps them in an outer fence.
    ///
    /// The outer fence uses one more backtick than the longest run inside the
    /// content, and never fewer than four, so inner fences stay intact.
    #[must_use]
    pub fn render(&self, blocks: &[String]) -> String {
        let body = blocks.join("\n");
        let fence = "`".repeat(fence_width(&body));
        format!("{fence}{}\n{body}\n{fence}", self.language)
    }

    /// Extracts and renders in one step; `None` when nothing matched.
    #[must_use]
    pub fn render_usage(&self, markdown: &str) -> Option<String> {
        let blocks = self.extract(markdown);
        if blocks.is_empty() {
            None
        } else {
            Some(self.render(&blocks))
        }
    }
}

fn fence_width(content: &str) -> usize {
    let longest = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    (longest + 1).max(4)
}

/// Level-2 headings and fenced code blocks with their source lines.
#[derive(Debug, Default)]
struct Outline {
    headings: Vec<HeadingInfo>,
    code_blocks: Vec<CodeBlockInfo>,
}

#[derive(Debug)]
struct HeadingInfo {
    start_line: usize,
    end_line: usize,
    children: Vec<InlineChild>,
}

impl HeadingInfo {
    fn is_sole_text(&self, expected: &str) -> bool {
        matches!(self.children.as_slice(), [InlineChild::Text(text)] if text == expected)
    }
}

#[derive(Debug)]
enum InlineChild {
    Text(String),
    Other,
}

#[derive(Debug)]
struct CodeBlockInfo {
    start_line: usize,
    language: Option<String>,
    body: String,
}

impl Outline {
    fn parse(markdown: &str) -> Self {
        let lines = LineIndex::new(markdown);
        let mut outline = Self::default();

        let mut heading: Option<HeadingInfo> = None;
        let mut heading_depth = 0usize;
        let mut code: Option<CodeBlockInfo> = None;

        for (event, range) in Parser::new(markdown).into_offset_iter() {
            match event {
                Event::Start(Tag::Heading {
                    level: HeadingLevel::H2,
                    ..
                }) => {
                    heading = Some(HeadingInfo {
                        start_line: lines.line_of(range.start),
                        end_line: 0,
                        children: Vec::new(),
                    });
                    heading_depth = 0;
                }
                Event::End(TagEnd::Heading(HeadingLevel::H2)) => {
                    if let Some(mut info) = heading.take() {
                        info.end_line = lines.last_line_of(&range);
                        outline.headings.push(info);
                    }
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    let language = match kind {
                        CodeBlockKind::Fenced(info) => {
                            info.split_whitespace().next().map(str::to_string)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code = Some(CodeBlockInfo {
                        start_line: lines.line_of(range.start),
                        language,
                        body: String::new(),
                    });
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(mut block) = code.take() {
                        if block.body.ends_with('\n') {
                            block.body.pop();
                        }
                        outline.code_blocks.push(block);
                    }
                }
                Event::Text(text) if code.is_some() => {
                    if let Some(block) = code.as_mut() {
                        block.body.push_str(&text);
                    }
                }
                _ if heading.is_some() => {
                    if let Some(info) = heading.as_mut() {
                        record_heading_child(info, &mut heading_depth, event);
                    }
                }
                _ => {}
            }
        }

        outline
    }
}

/// Tracks the direct children of a heading; adjacent text events merge.
fn record_heading_child(info: &mut HeadingInfo, depth: &mut usize, event: Event<'_>) {
    match event {
        Event::Start(_) => {
            if *depth == 0 {
                info.children.push(InlineChild::Other);
            }
            *depth += 1;
        }
        Event::End(_) => {
            *depth = depth.saturating_sub(1);
        }
        Event::Text(text) if *depth == 0 => {
            if let Some(InlineChild::Text(previous)) = info.children.last_mut() {
                previous.push_str(&text);
            } else {
                info.children.push(InlineChild::Text(text.into_string()));
            }
        }
        _ if *depth == 0 => info.children.push(InlineChild::Other),
        _ => {}
    }
}

/// Maps byte offsets to 1-based line numbers.
#[derive(Debug)]
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }

    /// Line of the last byte of `range`; a trailing newline belongs to the
    /// line it terminates.
    fn last_line_of(&self, range: &Range<usize>) -> usize {
        self.line_of(range.end.saturating_sub(1).max(range.start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUTTON_DOC: &str = r#"---
title: Button
---

# Button

Displays a button.

## Installation

```bash
npx shadcn-vue@latest add button
```

## Usage

```vue
<script setup lang="ts">
import { Button } from '@/components/ui/button'
</script>
```

```ts
const unrelated = true
```

```vue
<template>
  <Button>Button</Button>
</template>
```

### Variants

```vue
<Button variant="outline">Outline</Button>
```

## Examples

```vue
<Button variant="destructive">Delete</Button>
```
"#;

    // ========================================================================
    // extract
    // ========================================================================

    #[test]
    fn test_collects_vue_blocks_in_section() {
        let blocks = UsageExtractor::default().extract(BUTTON_DOC);

        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].starts_with("<script setup"));
        assert!(blocks[0].ends_with("</script>"));
        assert!(blocks[1].contains("<Button>Button</Button>"));
        assert!(blocks[2].contains("variant=\"outline\""));
    }

    #[test]
    fn test_excludes_other_languages() {
        let blocks = UsageExtractor::default().extract(BUTTON_DOC);
        assert!(blocks.iter().all(|b| !b.contains("unrelated")));
    }

    #[test]
    fn test_excludes_blocks_after_next_h2() {
        let blocks = UsageExtractor::default().extract(BUTTON_DOC);
        assert!(blocks.iter().all(|b| !b.contains("destructive")));
    }

    #[test]
    fn test_no_usage_section() {
        let markdown = "# Card\n\n## Installation\n\n```vue\n<Card />\n```\n";
        assert!(UsageExtractor::default().extract(markdown).is_empty());
    }

    #[test]
    fn test_usage_at_other_depth_ignored() {
        let markdown = "# Card\n\n### Usage\n\n```vue\n<Card />\n```\n";
        assert!(UsageExtractor::default().extract(markdown).is_empty());
    }

    #[test]
    fn test_heading_with_extra_inline_content_ignored() {
        let markdown = "## Usage `basic`\n\n```vue\n<Card />\n```\n";
        assert!(UsageExtractor::default().extract(markdown).is_empty());

        let markdown = "## Usage notes\n\n```vue\n<Card />\n```\n";
        assert!(UsageExtractor::default().extract(markdown).is_empty());
    }

    #[test]
    fn test_section_without_matching_blocks() {
        let markdown = "## Usage\n\n```ts\nconst x = 1\n```\n\nText only.\n";
        assert!(UsageExtractor::default().extract(markdown).is_empty());
    }

    #[test]
    fn test_section_runs_to_end_of_document() {
        let markdown = "## Usage\n\n```vue\n<A />\n```\n\n# Trailing H1\n\n```vue\n<B />\n```\n";
        let blocks = UsageExtractor::default().extract(markdown);
        assert_eq!(blocks, vec!["<A />".to_string(), "<B />".to_string()]);
    }

    #[test]
    fn test_info_string_first_word_is_language() {
        let markdown = "## Usage\n\n```vue title=\"App.vue\"\n<App />\n```\n";
        let blocks = UsageExtractor::default().extract(markdown);
        assert_eq!(blocks, vec!["<App />".to_string()]);
    }

    #[test]
    fn test_setext_heading() {
        let markdown = "Usage\n-----\n\n```vue\n<A />\n```\n";
        let blocks = UsageExtractor::default().extract(markdown);
        assert_eq!(blocks, vec!["<A />".to_string()]);
    }

    #[test]
    fn test_first_matching_heading_wins() {
        let markdown =
            "## Usage\n\n```vue\n<First />\n```\n\n## Usage\n\n```vue\n<Second />\n```\n";
        let blocks = UsageExtractor::default().extract(markdown);
        assert_eq!(blocks, vec!["<First />".to_string()]);
    }

    #[test]
    fn test_custom_section_and_language() {
        let markdown = "## Examples\n\n```tsx\n<Button />\n```\n\n```vue\n<Button />\n```\n";
        let extractor = UsageExtractor::new("Examples", "tsx");
        assert_eq!(extractor.extract(markdown), vec!["<Button />".to_string()]);
        assert_eq!(extractor.section(), "Examples");
        assert_eq!(extractor.language(), "tsx");
    }

    // ========================================================================
    // render
    // ========================================================================

    #[test]
    fn test_render_joins_with_newline() {
        let extractor = UsageExtractor::default();
        let rendered = extractor.render(&["<A />".to_string(), "<B />".to_string()]);
        assert_eq!(rendered, "````vue\n<A />\n<B />\n````");
    }

    #[test]
    fn test_render_widens_fence_for_long_backtick_runs() {
        let extractor = UsageExtractor::default();
        let rendered = extractor.render(&["`````\nnested\n`````".to_string()]);
        assert!(rendered.starts_with("``````vue\n"));
        assert!(rendered.ends_with("\n``````"));
    }

    #[test]
    fn test_render_usage_none_without_blocks() {
        assert!(UsageExtractor::default().render_usage("# Nothing").is_none());
    }

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(index.line_of(0), 1);
        assert_eq!(index.line_of(2), 1);
        assert_eq!(index.line_of(3), 2);
        assert_eq!(index.line_of(6), 3);
        assert_eq!(index.line_of(7), 4);
    }
}
