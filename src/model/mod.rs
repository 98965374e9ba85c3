//! In-memory model of one SBOM.
//!
//! Components live in an arena owned by [`Sbom`] and refer to each other by
//! [`ComponentId`]. A graph is assembled with [`DependencyGraphBuilder`]:
//!
//! ```
//! use sbom_tree_diff::model::{Component, DeclaredDependency, DependencyGraphBuilder, PrimaryPartyMatcher};
//!
//! let matcher = PrimaryPartyMatcher::none();
//! let mut builder = DependencyGraphBuilder::new();
//! builder.set_root(Component::new("org.acme", "app", "1.0.0", "pkg:maven/org.acme/app@1.0.0", "app", &matcher));
//! builder.add_component(Component::new("org.acme", "lib", "2.1.0", "pkg:maven/org.acme/lib@2.1.0", "lib", &matcher));
//! builder.declare(DeclaredDependency::new("app", ["lib"]));
//!
//! let sbom = builder.build()?;
//! assert_eq!(sbom.root_component().transitive_hull().len(), 1);
//! # Ok::<(), sbom_tree_diff::SbomDiffError>(())
//! ```

mod component;
mod graph;
mod license;
mod sbom;

pub use component::*;
pub use graph::*;
pub use license::*;
pub use sbom::*;
