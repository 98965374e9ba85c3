//! Serializable snapshot of a diff.

use super::RenderTracker;
use crate::diff::{ChangeType, ComponentDiffView, DiffSummary, SbomDiff};
use crate::model::{Component, ExternalLink, License, LicenseType, Sbom};
use indexmap::IndexMap;
use serde::Serialize;

/// Owned, serializable view of an [`SbomDiff`].
///
/// Each distinct pair diff and each added or removed subtree is expanded at
/// its first occurrence; later occurrences are emitted as references.
#[derive(Debug, Serialize)]
pub struct DiffReport {
    pub tool: ToolInfo,
    pub summary: DiffSummary,
    pub root: PairReport,
    /// Purls added anywhere in the tree
    pub added: Vec<String>,
    /// Purls removed anywhere in the tree
    pub removed: Vec<String>,
    /// Purls added, removed or part of a changed pair
    pub involved: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// A pair diff, expanded or pointing at its first expansion
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PairEntry {
    Expanded(PairReport),
    Reference { pair: String },
}

#[derive(Debug, Serialize)]
pub struct PairReport {
    /// `"<basePurl>:<comparingPurl>"`
    pub pair: String,
    pub base: ComponentReport,
    pub comparing: ComponentReport,
    pub change_type: ChangeType,
    pub has_changes: bool,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub changed: IndexMap<String, PairEntry>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub added: IndexMap<String, TreeEntry>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub removed: IndexMap<String, TreeEntry>,
}

/// A component subtree, expanded or pointing at its first expansion
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeEntry {
    Expanded(ComponentTree),
    Reference { purl: String },
}

#[derive(Debug, Serialize)]
pub struct ComponentTree {
    pub component: ComponentReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<TreeEntry>,
}

#[derive(Debug, Serialize)]
pub struct ComponentReport {
    pub purl: String,
    pub module_id: String,
    pub version: String,
    pub third_party: bool,
    pub licenses: Vec<License>,
    pub careful_license_types: Vec<LicenseType>,
    pub all_licenses_go: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<ExternalLink>,
}

impl From<&Component> for ComponentReport {
    fn from(component: &Component) -> Self {
        Self {
            purl: component.purl.clone(),
            module_id: component.module_id.clone(),
            version: component.version.clone(),
            third_party: component.third_party,
            licenses: component.licenses.clone(),
            careful_license_types: component.careful_license_types.clone(),
            all_licenses_go: component.all_licenses_go,
            links: component.links.clone(),
        }
    }
}

impl DiffReport {
    /// Build a report, expanding shared pairs and subtrees once.
    #[must_use]
    pub fn new(diff: &SbomDiff<'_>) -> Self {
        let mut builder = ReportBuilder {
            base: diff.base_sbom(),
            comparing: diff.comparing_sbom(),
            tracker: RenderTracker::new(),
        };
        let root_view = diff.root_component_diff();
        builder.tracker.should_render_component_diff(root_view.node());
        let root = builder.pair(root_view);

        Self {
            tool: ToolInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            summary: diff.summary(),
            root,
            added: diff.added_dependencies().keys().cloned().collect(),
            removed: diff.removed_dependencies().keys().cloned().collect(),
            involved: diff.involved_components().keys().cloned().collect(),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

struct ReportBuilder<'a> {
    base: &'a Sbom,
    comparing: &'a Sbom,
    tracker: RenderTracker,
}

impl ReportBuilder<'_> {
    fn pair(&mut self, view: ComponentDiffView<'_, '_>) -> PairReport {
        let node = view.node();

        let changed = view
            .changed_dependencies()
            .map(|(module_id, nested)| {
                let entry = if self.tracker.should_render_component_diff(nested.node()) {
                    PairEntry::Expanded(self.pair(nested))
                } else {
                    PairEntry::Reference {
                        pair: nested.node().pair_key(),
                    }
                };
                (module_id.to_string(), entry)
            })
            .collect();

        let comparing = self.comparing;
        let added = node
            .added_dependencies()
            .iter()
            .map(|(module_id, component)| (module_id.clone(), self.tree(comparing, component)))
            .collect();

        let base = self.base;
        let removed = node
            .removed_dependencies()
            .iter()
            .map(|(module_id, component)| (module_id.clone(), self.tree(base, component)))
            .collect();

        PairReport {
            pair: node.pair_key(),
            base: node.base().into(),
            comparing: node.comparing().into(),
            change_type: node.change_type(),
            has_changes: node.has_changes(),
            changed,
            added,
            removed,
        }
    }

    fn tree(&mut self, sbom: &Sbom, component: &Component) -> TreeEntry {
        if !self.tracker.should_render_component_tree(component) {
            return TreeEntry::Reference {
                purl: component.purl.clone(),
            };
        }

        let dependencies = if RenderTracker::has_dependencies(component) {
            component
                .dependencies()
                .values()
                .map(|&id| self.tree(sbom, sbom.component(id)))
                .collect()
        } else {
            Vec::new()
        };

        TreeEntry::Expanded(ComponentTree {
            component: component.into(),
            dependencies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffEngine;
    use crate::model::{DeclaredDependency, DependencyGraphBuilder, PrimaryPartyMatcher};

    fn graph(nodes: &[(&str, &str)], edges: &[(&str, &[&str])]) -> Sbom {
        let matcher = PrimaryPartyMatcher::none();
        let mut builder = DependencyGraphBuilder::new();
        for (i, (name, version)) in nodes.iter().enumerate() {
            let component = Component::new(
                "org.test",
                *name,
                *version,
                format!("pkg:maven/org.test/{name}@{version}"),
                *name,
                &matcher,
            );
            if i == 0 {
                builder.set_root(component);
            } else {
                builder.add_component(component);
            }
        }
        for (dependent, deps) in edges {
            builder.declare(DeclaredDependency::new(*dependent, deps.iter().copied()));
        }
        builder.build().expect("graph builds")
    }

    #[test]
    fn test_shared_pair_expanded_once() {
        let base = graph(
            &[("app", "1.0.0"), ("a", "1.0.0"), ("b", "1.0.0"), ("shared", "1.0.0")],
            &[("app", &["a", "b"]), ("a", &["shared"]), ("b", &["shared"])],
        );
        let comparing = graph(
            &[("app", "1.0.0"), ("a", "1.1.0"), ("b", "1.1.0"), ("shared", "2.0.0")],
            &[("app", &["a", "b"]), ("a", &["shared"]), ("b", &["shared"])],
        );
        let diff = DiffEngine::new().diff(&base, &comparing).expect("same project");
        let report = DiffReport::new(&diff);

        let expanded = |entry: &PairEntry| match entry {
            PairEntry::Expanded(pair) => Some(pair.changed.get("org.test:shared").map(|e| {
                matches!(e, PairEntry::Expanded(_))
            })),
            PairEntry::Reference { .. } => None,
        };
        assert_eq!(
            expanded(&report.root.changed["org.test:a"]),
            Some(Some(true))
        );
        assert_eq!(
            expanded(&report.root.changed["org.test:b"]),
            Some(Some(false))
        );
        assert_eq!(report.summary.changed_pairs, 3);
    }

    #[test]
    fn test_added_subtree_expanded_once() {
        let base = graph(&[("app", "1.0.0")], &[]);
        let comparing = graph(
            &[("app", "1.0.0"), ("x", "1.0.0"), ("y", "1.0.0"), ("leaf", "1.0.0")],
            &[("app", &["x", "y"]), ("x", &["leaf"]), ("y", &["leaf"])],
        );
        let diff = DiffEngine::new().diff(&base, &comparing).expect("same project");
        let report = DiffReport::new(&diff);

        let TreeEntry::Expanded(x) = &report.root.added["org.test:x"] else {
            panic!("x expanded first");
        };
        assert!(matches!(x.dependencies[0], TreeEntry::Expanded(_)));
        let TreeEntry::Expanded(y) = &report.root.added["org.test:y"] else {
            panic!("y expanded");
        };
        assert!(matches!(y.dependencies[0], TreeEntry::Reference { .. }));
        assert_eq!(report.added.len(), 3);
    }

    #[test]
    fn test_to_json() {
        let base = graph(&[("app", "1.0.0"), ("lib", "1.0.0")], &[("app", &["lib"])]);
        let comparing = graph(&[("app", "1.0.0"), ("lib", "1.2.0")], &[("app", &["lib"])]);
        let diff = DiffEngine::new().diff(&base, &comparing).expect("same project");

        let json = DiffReport::new(&diff).to_json().expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        let lib = &value["root"]["changed"]["org.test:lib"];
        assert_eq!(lib["kind"], "expanded");
        assert_eq!(lib["change_type"], "Upgraded");
        assert_eq!(value["tool"]["name"], "sbom-tree-diff");
        assert_eq!(value["involved"].as_array().map(Vec::len), Some(2));
    }
}
