//! Necessity tiers and the threshold filter applied before doc fetching.
//!
//! Tiers are ordered `critical > important > optional`. A threshold keeps
//! every item at or above it, so an `optional` threshold keeps everything.
//!
//! # Examples
//!
//! ```
//! use shadcn_mcp_core::{Necessity, NecessityFilter};
//!
//! let filter = NecessityFilter::new(Necessity::Important);
//! assert!(filter.accepts(Necessity::Critical));
//! assert!(filter.accepts(Necessity::Important));
//! assert!(!filter.accepts(Necessity::Optional));
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Importance of a recommended component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Necessity {
    /// The UI cannot be built without it.
    Critical,
    /// Strongly expected by the description.
    Important,
    /// Nice to have.
    Optional,
}

impl Necessity {
    /// Ordinal score: critical 3, important 2, optional 1.
    #[must_use]
    pub const fn score(self) -> u8 {
        match self {
            Self::Critical => 3,
            Self::Important => 2,
            Self::Optional => 1,
        }
    }

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Important => "important",
            Self::Optional => "optional",
        }
    }
}

impl PartialOrd for Necessity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Necessity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score().cmp(&other.score())
    }
}

impl fmt::Display for Necessity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Necessity {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Self::Critical),
            "important" => Ok(Self::Important),
            "optional" => Ok(Self::Optional),
            other => Err(crate::Error::InvalidArgument(format!(
                "unknown necessity '{other}', expected critical, important or optional"
            ))),
        }
    }
}

/// Anything that carries a necessity tier.
pub trait HasNecessity {
    /// Tier of this item.
    fn necessity(&self) -> Necessity;
}

/// Keeps items whose tier is at or above a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NecessityFilter {
    threshold: Necessity,
}

impl NecessityFilter {
    /// Creates a filter with the given minimum tier.
    #[must_use]
    pub const fn new(threshold: Necessity) -> Self {
        Self { threshold }
    }

    /// Minimum tier accepted by this filter.
    #[must_use]
    pub const fn threshold(&self) -> Necessity {
        self.threshold
    }

    /// Returns `true` if `necessity` meets the threshold.
    #[must_use]
    pub const fn accepts(&self, necessity: Necessity) -> bool {
        necessity.score() >= self.threshold.score()
    }

    /// Returns the accepted items, preserving their order.
    pub fn apply<'a, T: HasNecessity>(&self, items: &'a [T]) -> Vec<&'a T> {
        items
            .iter()
            .filter(|item| self.accepts(item.necessity()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(&'static str, Necessity);

    impl HasNecessity for Item {
        fn necessity(&self) -> Necessity {
            self.1
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item("button", Necessity::Critical),
            Item("input", Necessity::Important),
            Item("tooltip", Necessity::Optional),
        ]
    }

    #[test]
    fn test_important_threshold_keeps_critical_and_important() {
        let items = items();
        let kept: Vec<_> = NecessityFilter::new(Necessity::Important)
            .apply(&items)
            .into_iter()
            .map(|i| i.0)
            .collect();
        assert_eq!(kept, vec!["button", "input"]);
    }

    #[test]
    fn test_optional_threshold_keeps_everything() {
        let items = items();
        let kept = NecessityFilter::new(Necessity::Optional).apply(&items);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_critical_threshold() {
        let items = items();
        let kept = NecessityFilter::new(Necessity::Critical).apply(&items);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].0, "button");
    }

    #[test]
    fn test_ordering() {
        assert!(Necessity::Critical > Necessity::Important);
        assert!(Necessity::Important > Necessity::Optional);
        let mut tiers = vec![Necessity::Optional, Necessity::Critical, Necessity::Important];
        tiers.sort();
        assert_eq!(
            tiers,
            vec![Necessity::Optional, Necessity::Important, Necessity::Critical]
        );
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&Necessity::Critical).unwrap(),
            "\"critical\""
        );
        let parsed: Necessity = serde_json::from_str("\"optional\"").unwrap();
        assert_eq!(parsed, Necessity::Optional);
        assert!(serde_json::from_str::<Necessity>("\"essential\"").is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("important".parse::<Necessity>().unwrap(), Necessity::Important);
        let err = "Critical".parse::<Necessity>().unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
