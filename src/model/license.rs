//! License classification against configured allow/caution/stop lists.
//!
//! Only the SPDX `id` of a license is ever inspected. Compound SPDX
//! expressions are not evaluated and always classify as
//! [`LicenseType::Unknown`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Coarse risk category of a license
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LicenseType {
    /// Approved / permissive
    Go,
    /// Needs review before use
    Caution,
    /// Disallowed
    Stop,
    /// No SPDX id, an expression, or not found on any list
    Unknown,
}

impl LicenseType {
    /// Categories that warrant attention, in reporting order.
    pub const CAREFUL: [Self; 3] = [Self::Caution, Self::Stop, Self::Unknown];

    /// Get display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Go => "Go",
            Self::Caution => "Caution",
            Self::Stop => "Stop",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether this category warrants attention
    #[must_use]
    pub const fn is_careful(&self) -> bool {
        !matches!(self, Self::Go)
    }
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// License classification table: `{ "go": [...], "caution": [...], "stop": [...] }`.
///
/// Every list is optional in the JSON form and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LicenseList {
    /// SPDX ids classified as [`LicenseType::Go`]
    pub go: Vec<String>,
    /// SPDX ids classified as [`LicenseType::Caution`]
    pub caution: Vec<String>,
    /// SPDX ids classified as [`LicenseType::Stop`]
    pub stop: Vec<String>,
}

impl LicenseList {
    /// Parse a license table from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// True when no list contains any id
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.go.is_empty() && self.caution.is_empty() && self.stop.is_empty()
    }
}

/// Classifies SPDX ids into [`LicenseType`]s.
///
/// Lists are checked in the fixed order Go, Caution, Stop; the first list
/// containing the id wins.
#[derive(Debug, Clone, Default)]
pub struct LicenseEvaluator {
    go: HashSet<String>,
    caution: HashSet<String>,
    stop: HashSet<String>,
}

impl LicenseEvaluator {
    /// Build an evaluator from a license table
    #[must_use]
    pub fn new(list: &LicenseList) -> Self {
        Self {
            go: list.go.iter().cloned().collect(),
            caution: list.caution.iter().cloned().collect(),
            stop: list.stop.iter().cloned().collect(),
        }
    }

    /// Classify a license by its SPDX id.
    ///
    /// A missing or empty id is always [`LicenseType::Unknown`].
    #[must_use]
    pub fn classify(&self, spdx_id: Option<&str>) -> LicenseType {
        let Some(id) = spdx_id.filter(|id| !id.is_empty()) else {
            return LicenseType::Unknown;
        };

        if self.go.contains(id) {
            LicenseType::Go
        } else if self.caution.contains(id) {
            LicenseType::Caution
        } else if self.stop.contains(id) {
            LicenseType::Stop
        } else {
            LicenseType::Unknown
        }
    }
}

/// A normalized license entry of a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// SPDX license id
    pub id: Option<String>,
    /// Free-text license name
    pub name: Option<String>,
    /// License text URL
    pub url: Option<String>,
    /// SPDX expression, for entries that declare one instead of a single license
    pub spdx_expression: Option<String>,
    /// Classified risk category
    pub license_type: LicenseType,
    /// Human-readable form
    pub display: String,
}

impl License {
    /// Normalize a single-license entry (`{ "license": { id, name, url } }`).
    #[must_use]
    pub fn from_descriptor(
        id: Option<String>,
        name: Option<String>,
        url: Option<String>,
        evaluator: &LicenseEvaluator,
    ) -> Self {
        let id = id.filter(|id| !id.is_empty());
        let license_type = evaluator.classify(id.as_deref());
        let display = match &id {
            Some(id) => id.clone(),
            None => {
                let parts: Vec<&str> = [name.as_deref(), url.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect();
                if parts.is_empty() {
                    "unknown license".to_string()
                } else {
                    parts.join(" / ")
                }
            }
        };

        Self {
            id,
            name,
            url,
            spdx_expression: None,
            license_type,
            display,
        }
    }

    /// Normalize an expression entry (`{ "expression": "MIT OR Apache-2.0" }`).
    #[must_use]
    pub fn from_expression(expression: String) -> Self {
        Self {
            id: None,
            name: None,
            url: None,
            display: expression.clone(),
            spdx_expression: Some(expression),
            license_type: LicenseType::Unknown,
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// Careful categories present among `licenses`, in [`LicenseType::CAREFUL`] order.
///
/// An empty license list counts as a single synthetic Unknown license.
#[must_use]
pub fn careful_license_types(licenses: &[License]) -> Vec<LicenseType> {
    if licenses.is_empty() {
        return vec![LicenseType::Unknown];
    }

    LicenseType::CAREFUL
        .into_iter()
        .filter(|careful| licenses.iter().any(|l| l.license_type == *careful))
        .collect()
}
