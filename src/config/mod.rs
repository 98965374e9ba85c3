//! Configuration module for sbom-tree-diff.
//!
//! Two inputs shape a run: a regular expression deciding which component
//! groups belong to the primary party, and a license classification table.
//!
//! # Quick Start
//!
//! ```
//! use sbom_tree_diff::config::{DiffConfig, Validatable};
//!
//! let config = DiffConfig::builder()
//!     .primary_party_group_matcher(r"^org\.camunda")
//!     .go_license("Apache-2.0")
//!     .stop_license("AGPL-3.0-only")
//!     .build();
//! assert!(config.is_valid());
//!
//! let compiled = config.compile()?;
//! assert!(compiled.matcher.is_primary("org.camunda.example"));
//! # Ok::<(), sbom_tree_diff::SbomDiffError>(())
//! ```
//!
//! # Configuration File
//!
//! Place a `.sbom-tree-diff.yaml` file in your project root or
//! `~/.config/sbom-tree-diff/`:
//!
//! ```yaml
//! primary_party_group_matcher: '^org\.camunda'
//! licenses:
//!   go: [Apache-2.0, MIT]
//!   caution: [EPL-2.0]
//!   stop: [AGPL-3.0-only]
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{CompiledConfig, DiffConfig, DiffConfigBuilder};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, load_config_file, load_license_list, load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `DiffConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.sbom-tree-diff.yaml` config files. It can be used by editors for
/// validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(DiffConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_fields() {
        let schema = generate_json_schema();
        assert!(schema.contains("primary_party_group_matcher"));
        assert!(schema.contains("caution"));
    }
}
