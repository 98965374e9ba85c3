//! **Dependency tree diffs between two CycloneDX SBOMs of the same project.**
//!
//! `sbom-tree-diff` reads two CycloneDX JSON documents, builds a dependency
//! graph for each, and compares them from their root components downwards.
//! Dependencies are matched across versions by module id (`group:name`), so a
//! version bump shows up as a changed pair rather than a removal plus an
//! addition, and changes deep in the tree are reported under every parent that
//! leads to them.
//!
//! Every component is also classified for license review: its licenses are
//! checked against configurable go, caution and stop lists, and components
//! whose group does not match the primary party pattern are marked third
//! party.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Sbom`], an arena of [`Component`]s with resolved
//!   dependency edges, reverse edges and transitive hulls.
//! - **[`parsers`]**: CycloneDX JSON input, see [`parse_sbom`].
//! - **[`diff`]**: [`DiffEngine`] and the [`SbomDiff`] tree it produces.
//! - **[`report`]**: render de-duplication and an owned JSON snapshot.
//! - **[`config`]**: primary party pattern and license lists, loadable from
//!   YAML.
//! - **[`pipeline`]**: load, parse and diff two files in one call.
//!
//! ## Diffing Two SBOMs
//!
//! ```no_run
//! use std::path::Path;
//! use sbom_tree_diff::{parse_sbom, DiffConfig, DiffEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DiffConfig::builder()
//!         .primary_party_group_matcher(r"^org\.acme")
//!         .go_license("Apache-2.0")
//!         .stop_license("AGPL-3.0-only")
//!         .build()
//!         .compile()?;
//!
//!     let base = parse_sbom(Path::new("base.json"), &config)?;
//!     let head = parse_sbom(Path::new("head.json"), &config)?;
//!     let diff = DiffEngine::new().diff(&base, &head)?;
//!
//!     for (module_id, change) in diff.root_component_diff().changed_dependencies() {
//!         println!("{module_id}: {} -> {} ({})",
//!             change.base().version, change.comparing().version, change.change_type());
//!     }
//!     for purl in diff.added_dependencies().keys() {
//!         println!("  + {purl}");
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc, clippy::similar_names)]

pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use config::{CompiledConfig, ConfigError, DiffConfig, DiffConfigBuilder, Validatable};
pub use diff::{ChangeType, ComponentDiff, ComponentDiffView, DiffEngine, DiffSummary, SbomDiff};
pub use error::{ErrorContext, Result, SbomDiffError};
pub use model::{
    Component, ComponentId, DependencyGraphBuilder, License, LicenseList, LicenseType, Sbom,
};
pub use parsers::{parse_sbom, parse_sbom_str, CycloneDxParser, SbomParser};
pub use report::{DiffReport, RenderTracker};
