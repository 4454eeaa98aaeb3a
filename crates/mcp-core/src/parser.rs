//! Tolerant extraction of JSON from LLM output.
//!
//! Model replies wrap JSON in prose, tag blocks or code fences, and the JSON
//! itself is often slightly off: single quotes, bare keys, trailing commas,
//! missing closing brackets. [`parse_message_to_json`] locates the JSON
//! candidate, tries a strict parse, and falls back to [`repair_json`] before
//! giving up.
//!
//! # Examples
//!
//! ```
//! use shadcn_mcp_core::parse_message_to_json;
//! use serde_json::json;
//!
//! let value = parse_message_to_json("Here is the result: {name: 'foo', count: 1,}").unwrap();
//! assert_eq!(value, json!({"name": "foo", "count": 1}));
//! ```

use crate::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static RESPONSE_FORMAT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<response_format>([\s\S]*?)</response_format>").expect("valid regex")
});
static JSON_FENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json[ \t]*\r?\n([\s\S]*?)\r?\n[ \t]*```").expect("valid regex"));

const RAW_INPUT: &str = "raw input";

/// Extracts, repairs and parses the JSON value embedded in `input`.
///
/// Candidates are searched in priority order: a `<response_format>` block,
/// then a fenced `json` code block, then the raw text from its first `{`.
/// The first complete object or array in the candidate wins; anything after
/// it is ignored.
///
/// # Errors
///
/// Returns [`Error::JsonRepair`] if more than one block of the same kind is
/// present, or if the candidate does not parse even after repair. The error
/// carries the parser message and the original text.
pub fn parse_message_to_json(input: &str) -> Result<Value> {
    let (source_kind, candidate) = extract_candidate(input)?;

    if let Ok(value) = parse_first(candidate) {
        return Ok(value);
    }

    let repaired = repair_json(candidate);
    parse_first(&repaired).map_err(|e| {
        tracing::debug!(source_kind, repaired = %repaired, "JSON repair did not produce valid JSON");
        Error::JsonRepair {
            source_kind: source_kind.to_string(),
            message: e.to_string(),
            text: input.to_string(),
        }
    })
}

/// Parses the leading object or array of `text`, ignoring trailing content.
/// Anything else must parse as a whole.
fn parse_first(text: &str) -> serde_json::Result<Value> {
    let mut values = serde_json::Deserializer::from_str(text).into_iter::<Value>();
    match values.next() {
        Some(Ok(value)) if value.is_object() || value.is_array() => Ok(value),
        _ => serde_json::from_str(text),
    }
}

/// Locates the JSON candidate and names where it came from.
fn extract_candidate(input: &str) -> Result<(&'static str, &str)> {
    let patterns: [(&LazyLock<Regex>, &'static str); 2] = [
        (&RESPONSE_FORMAT_REGEX, "response_format"),
        (&JSON_FENCE_REGEX, "json code block"),
    ];

    for (regex, name) in patterns {
        let mut captures = regex.captures_iter(input);
        let Some(first) = captures.next() else {
            continue;
        };
        if captures.next().is_some() {
            return Err(Error::JsonRepair {
                source_kind: name.to_string(),
                message: format!("multiple {name} blocks found"),
                text: input.to_string(),
            });
        }
        let body = first.get(1).map_or("", |m| m.as_str()).trim();
        return Ok((name, body));
    }

    let trimmed = input.trim();
    let candidate = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if end > start => &trimmed[start..=end],
        (Some(start), _) => &trimmed[start..],
        _ => trimmed,
    };
    Ok((RAW_INPUT, candidate))
}

/// Best-effort normalization of JSON-like text into strict JSON.
///
/// The transformation is purely textual and never fails; the result may still
/// be invalid JSON when the input is too damaged.
///
/// Handled malformations:
/// - single-quoted strings and unescaped inner quotes
/// - bare object keys and bare word values
/// - `True` / `False` / `None` / `undefined` literals
/// - `//` and `/* */` comments
/// - trailing commas
/// - raw control characters inside strings
/// - unterminated strings, unclosed and mismatched brackets
///
/// # Examples
///
/// ```
/// use shadcn_mcp_core::repair_json;
///
/// assert_eq!(repair_json("{a: 'b',}"), r#"{"a": "b"}"#);
/// assert_eq!(repair_json(r#"{"list": [1, 2"#), r#"{"list": [1, 2]}"#);
/// ```
#[must_use]
pub fn repair_json(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 16);
    let mut closers: Vec<char> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' | '\'' => {
                i = copy_string(&chars, i, &mut out);
            }
            '{' => {
                closers.push('}');
                out.push(c);
                i += 1;
            }
            '[' => {
                closers.push(']');
                out.push(c);
                i += 1;
            }
            '}' | ']' => {
                if closers.contains(&c) {
                    while let Some(expected) = closers.pop() {
                        close_container(&mut out, expected);
                        if expected == c {
                            break;
                        }
                    }
                }
                i += 1;
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i = (i + 2).min(chars.len());
            }
            c if is_word_start(c) && !continues_number(&out) => {
                let start = i;
                while i < chars.len() && is_word_char(chars[i]) {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                push_word(&mut out, &word);
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    while let Some(expected) = closers.pop() {
        close_container(&mut out, expected);
    }

    out
}

/// Copies a string literal starting at `start`, re-quoting it with `"`.
/// Returns the index just past the literal.
fn copy_string(chars: &[char], start: usize, out: &mut String) -> usize {
    let quote = chars[start];
    out.push('"');
    let mut i = start + 1;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' => {
                match chars.get(i + 1) {
                    Some('\'') => out.push('\''),
                    Some(&next) => {
                        out.push('\\');
                        out.push(next);
                    }
                    None => {}
                }
                i += 2;
            }
            c if c == quote => {
                if closes_string(chars, i + 1) {
                    out.push('"');
                    return i + 1;
                }
                // Inner quote the model forgot to escape.
                if c == '"' {
                    out.push_str("\\\"");
                } else {
                    out.push(c);
                }
                i += 1;
            }
            '"' => {
                out.push_str("\\\"");
                i += 1;
            }
            '\n' => {
                out.push_str("\\n");
                i += 1;
            }
            '\r' => {
                out.push_str("\\r");
                i += 1;
            }
            '\t' => {
                out.push_str("\\t");
                i += 1;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    // Unterminated literal
    out.push('"');
    chars.len()
}

/// A quote ends its string when the next significant character can follow a
/// JSON value or key.
fn closes_string(chars: &[char], from: usize) -> bool {
    chars[from..]
        .iter()
        .find(|c| !c.is_whitespace())
        .is_none_or(|c| matches!(c, ',' | '}' | ']' | ':'))
}

fn close_container(out: &mut String, closer: char) {
    strip_trailing_comma(out);
    if out.trim_end().ends_with(':') {
        out.push_str(" null");
    }
    out.push(closer);
}

fn strip_trailing_comma(out: &mut String) {
    let trimmed_len = out.trim_end().len();
    if out[..trimmed_len].ends_with(',') {
        out.truncate(trimmed_len - 1);
    }
}

fn push_word(out: &mut String, word: &str) {
    match word {
        "true" | "false" | "null" => out.push_str(word),
        "True" => out.push_str("true"),
        "False" => out.push_str("false"),
        "None" | "undefined" | "NaN" => out.push_str("null"),
        _ => {
            out.push('"');
            out.push_str(word);
            out.push('"');
        }
    }
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '-' | '.')
}

/// Exponent markers (`1e5`) continue a number rather than start a word.
fn continues_number(out: &str) -> bool {
    out.chars()
        .last()
        .is_some_and(|c| c.is_ascii_digit() || c == '.')
}
