//! Domain types for component selection and documentation assembly.
//!
//! A selection request flows through these types in order:
//!
//! 1. [`Catalog`] - identifiers of every documented component and chart
//! 2. [`FilterResult`] - the LLM's necessity-ranked pick from the catalog
//! 3. [`UsageDoc`] - a picked descriptor enriched with its documentation
//!
//! # Examples
//!
//! ```
//! use shadcn_mcp_core::{FilterResult, Necessity};
//!
//! let output = r#"{"component": [{"name": "Button", "necessity": "critical", "justification": "submit"}], "charts": []}"#;
//! let result = FilterResult::from_llm_output(output).unwrap();
//!
//! assert_eq!(result.components[0].name, "button");
//! assert_eq!(result.components[0].necessity, Necessity::Critical);
//! assert!(result.charts.is_empty());
//! ```

use crate::necessity::{HasNecessity, Necessity};
use crate::parser::parse_message_to_json;
use crate::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifiers of the available documentation pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    /// Component identifiers (lowercase kebab-case doc file stems)
    pub components: Vec<String>,

    /// Chart identifiers
    pub charts: Vec<String>,
}

impl Catalog {
    /// Returns `true` if neither components nor charts are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.charts.is_empty()
    }
}

/// A component recommended by the selection step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ComponentDescriptor {
    /// Component identifier; lowercased after validation
    pub name: String,

    /// How essential the component is to the described UI
    pub necessity: Necessity,

    /// Why the component was picked
    pub justification: String,
}

impl HasNecessity for ComponentDescriptor {
    fn necessity(&self) -> Necessity {
        self.necessity
    }
}

/// Structured output of the selection step.
///
/// Both lists are required; a reply that omits either one fails
/// validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterResult {
    /// Selected components, in model order
    pub components: Vec<ComponentDescriptor>,

    /// Selected charts, in model order
    pub charts: Vec<ComponentDescriptor>,
}

impl FilterResult {
    /// Parses, normalizes and validates raw LLM selection output.
    ///
    /// Runs JSON extraction and repair, renames singular keys, validates the
    /// structure and lowercases every name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JsonRepair`] if no JSON can be recovered and
    /// [`Error::SchemaValidation`] if the JSON does not have the expected
    /// shape.
    pub fn from_llm_output(text: &str) -> Result<Self> {
        let mut value = parse_message_to_json(text)?;
        normalize_filter_keys(&mut value);
        let mut result = Self::from_value(value)?;
        result.normalize_names();
        Ok(result)
    }

    /// Validates an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaValidation`] on missing fields, wrong types or
    /// unknown necessity values.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::SchemaValidation {
                message: format!("expected a JSON object, got {}", json_kind(&value)),
                source: None,
            });
        }

        serde_json::from_value(value).map_err(|e| Error::SchemaValidation {
            message: e.to_string(),
            source: Some(e),
        })
    }

    /// Lowercases every component and chart name.
    pub fn normalize_names(&mut self) {
        for descriptor in self.components.iter_mut().chain(self.charts.iter_mut()) {
            descriptor.name = descriptor.name.to_lowercase();
        }
    }

    /// Total number of selected items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len() + self.charts.len()
    }

    /// Returns `true` if nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.charts.is_empty()
    }
}

/// Renames the singular `component` / `chart` keys to their plural forms.
///
/// A singular key replaces any plural key already present. Non-object values
/// are left untouched.
pub fn normalize_filter_keys(value: &mut Value) {
    let Some(object) = value.as_object_mut() else {
        return;
    };

    for (singular, plural) in [("component", "components"), ("chart", "charts")] {
        if let Some(items) = object.remove(singular) {
            object.insert(plural.to_string(), items);
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Which documentation folder a selected item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    /// `components/<name>.md`
    Component,
    /// `charts/<name>.md`
    Chart,
}

impl DocKind {
    /// Folder name below the docs root.
    #[must_use]
    pub const fn folder(self) -> &'static str {
        match self {
            Self::Component => "components",
            Self::Chart => "charts",
        }
    }
}

/// A selected component together with its fetched documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageDoc {
    /// Component identifier
    pub name: String,

    /// Necessity tier from the selection step
    pub necessity: Necessity,

    /// Selection justification
    pub justification: String,

    /// Documentation text; empty when the fetch failed
    pub doc: String,
}

impl UsageDoc {
    /// Attaches documentation to a descriptor.
    #[must_use]
    pub fn new(descriptor: &ComponentDescriptor, doc: String) -> Self {
        Self {
            name: descriptor.name.clone(),
            necessity: descriptor.necessity,
            justification: descriptor.justification.clone(),
            doc,
        }
    }
}

impl HasNecessity for UsageDoc {
    fn necessity(&self) -> Necessity {
        self.necessity
    }
}
