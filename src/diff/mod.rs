//! Dependency tree diff.
//!
//! [`DiffEngine`] compares two graphs of the same project from their roots
//! downwards and produces an [`SbomDiff`]: a tree of [`ComponentDiff`]s for
//! every pair that changed, plus flat indexes of everything added, removed or
//! involved anywhere in the tree.
//!
//! # Example
//!
//! ```no_run
//! use sbom_tree_diff::config::DiffConfig;
//! use sbom_tree_diff::diff::DiffEngine;
//! use sbom_tree_diff::parsers::parse_sbom;
//! use std::path::Path;
//!
//! let config = DiffConfig::default().compile()?;
//! let base = parse_sbom(Path::new("base.json"), &config)?;
//! let head = parse_sbom(Path::new("head.json"), &config)?;
//!
//! let diff = DiffEngine::new().diff(&base, &head)?;
//! for (module_id, change) in diff.root_component_diff().changed_dependencies() {
//!     println!("{module_id}: {} ({})", change, change.change_type());
//! }
//! # Ok::<(), sbom_tree_diff::SbomDiffError>(())
//! ```

mod engine;
mod result;

pub use engine::DiffEngine;
pub use result::{ChangeType, ComponentDiff, ComponentDiffView, DiffId, DiffSummary, SbomDiff};
