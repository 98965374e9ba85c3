//! Configuration types for tree-diff runs.

use crate::error::{Result, SbomDiffError};
use crate::model::{LicenseEvaluator, LicenseList, PrimaryPartyMatcher};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Diff Configuration
// ============================================================================

/// Inputs that shape how documents are modelled before diffing.
///
/// ```yaml
/// primary_party_group_matcher: '^org\.camunda'
/// licenses:
///   go: [Apache-2.0, MIT]
///   caution: [EPL-2.0]
///   stop: [AGPL-3.0-only]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiffConfig {
    /// Regular expression matched against each component's group. Groups that
    /// match belong to the primary party; with no pattern every group matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_party_group_matcher: Option<String>,
    /// License classification table
    pub licenses: LicenseList,
}

impl DiffConfig {
    /// Create a `DiffConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `DiffConfig` builder.
    pub fn builder() -> DiffConfigBuilder {
        DiffConfigBuilder::default()
    }

    /// Compile the pattern and license lists for use by the parser.
    ///
    /// # Errors
    ///
    /// Returns [`SbomDiffError::Config`] when the group pattern is not a
    /// valid regular expression.
    pub fn compile(&self) -> Result<CompiledConfig> {
        let matcher = match &self.primary_party_group_matcher {
            Some(pattern) => PrimaryPartyMatcher::new(pattern).map_err(|e| {
                SbomDiffError::config(format!(
                    "primary_party_group_matcher '{pattern}' is not a valid regular expression: {e}"
                ))
            })?,
            None => PrimaryPartyMatcher::none(),
        };

        Ok(CompiledConfig {
            matcher,
            evaluator: LicenseEvaluator::new(&self.licenses),
        })
    }
}

/// Ready-to-use form of a [`DiffConfig`]
#[derive(Debug, Clone, Default)]
pub struct CompiledConfig {
    /// Primary-party group matcher
    pub matcher: PrimaryPartyMatcher,
    /// License classifier
    pub evaluator: LicenseEvaluator,
}

// ============================================================================
// Builder for DiffConfig
// ============================================================================

/// Builder for constructing `DiffConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct DiffConfigBuilder {
    config: DiffConfig,
}

impl DiffConfigBuilder {
    /// Set the primary-party group pattern.
    pub fn primary_party_group_matcher(mut self, pattern: impl Into<String>) -> Self {
        self.config.primary_party_group_matcher = Some(pattern.into());
        self
    }

    /// Replace the whole license table.
    pub fn licenses(mut self, licenses: LicenseList) -> Self {
        self.config.licenses = licenses;
        self
    }

    /// Add an id to the Go list.
    pub fn go_license(mut self, id: impl Into<String>) -> Self {
        self.config.licenses.go.push(id.into());
        self
    }

    /// Add an id to the Caution list.
    pub fn caution_license(mut self, id: impl Into<String>) -> Self {
        self.config.licenses.caution.push(id.into());
        self
    }

    /// Add an id to the Stop list.
    pub fn stop_license(mut self, id: impl Into<String>) -> Self {
        self.config.licenses.stop.push(id.into());
        self
    }

    /// Build the `DiffConfig`.
    #[must_use]
    pub fn build(self) -> DiffConfig {
        self.config
    }
}
