//! Tree diff engine implementation.
//!
//! Both graphs are walked in lock step from their roots. Direct dependencies
//! are matched by module id so that a version bump still pairs up; each
//! matched pair is diffed recursively. Every visited pair is memoized before
//! its dependencies are walked, so a shared subtree is compared once and a
//! cyclic graph cannot recurse forever.

use super::result::{ComponentDiff, DiffId, SbomDiff};
use crate::error::{Result, SbomDiffError};
use crate::model::{Component, ComponentId, Sbom};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Tree diff engine for comparing two SBOM graphs of one project.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffEngine;

impl DiffEngine {
    /// Create a new diff engine
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Diff `comparing` against `base`.
    ///
    /// # Errors
    ///
    /// Fails before any comparison when the root components of the two graphs
    /// have different purls.
    pub fn diff<'a>(&self, base: &'a Sbom, comparing: &'a Sbom) -> Result<SbomDiff<'a>> {
        if !base.describes_same_project_as(comparing) {
            return Err(SbomDiffError::project_mismatch(
                base.project_component_id(),
                comparing.project_component_id(),
            ));
        }

        tracing::debug!(
            base = %base.root_component().purl,
            comparing = %comparing.root_component().purl,
            "Diffing dependency trees"
        );

        let mut differ = TreeDiffer::new(base, comparing);
        let root = differ.diff_components(base.root(), comparing.root());
        let diff = differ.finish(root);

        tracing::debug!(
            pairs = diff.pair_count(),
            changed = diff.changed_dependencies.len(),
            added = diff.added_dependencies.len(),
            removed = diff.removed_dependencies.len(),
            "Dependency tree diff complete"
        );

        Ok(diff)
    }
}

/// Traversal state for one diff run.
struct TreeDiffer<'a> {
    base: &'a Sbom,
    comparing: &'a Sbom,
    result: SbomDiff<'a>,
    visited: HashMap<(ComponentId, ComponentId), DiffId>,
}

impl<'a> TreeDiffer<'a> {
    fn new(base: &'a Sbom, comparing: &'a Sbom) -> Self {
        Self {
            base,
            comparing,
            result: SbomDiff::new(base, comparing),
            visited: HashMap::new(),
        }
    }

    fn finish(mut self, root: DiffId) -> SbomDiff<'a> {
        self.result.root = root;
        self.result
    }

    fn diff_components(&mut self, base_id: ComponentId, comparing_id: ComponentId) -> DiffId {
        if let Some(&id) = self.visited.get(&(base_id, comparing_id)) {
            tracing::trace!(pair = %self.result.node(id), "Reusing pair diff");
            return id;
        }

        let base_sbom: &'a Sbom = self.base;
        let comparing_sbom: &'a Sbom = self.comparing;
        let base = base_sbom.component(base_id);
        let comparing = comparing_sbom.component(comparing_id);

        let id = DiffId::new(self.result.nodes.len());
        self.result.nodes.push(ComponentDiff::new(base, comparing));
        self.visited.insert((base_id, comparing_id), id);

        let mut unmatched: IndexMap<&'a str, ComponentId> = comparing
            .dependencies()
            .iter()
            .map(|(module_id, &dep)| (module_id.as_str(), dep))
            .collect();

        let mut changed = IndexMap::new();
        let mut added = IndexMap::new();
        let mut removed = IndexMap::new();

        for (module_id, &base_dep_id) in base.dependencies() {
            let base_dep = base_sbom.component(base_dep_id);
            match unmatched.shift_remove(module_id.as_str()) {
                Some(comparing_dep_id) => {
                    let nested = self.diff_components(base_dep_id, comparing_dep_id);
                    let comparing_dep = comparing_sbom.component(comparing_dep_id);
                    if !base_dep.is_equal_to(comparing_dep) || self.result.node(nested).has_changes()
                    {
                        changed.insert(module_id.clone(), nested);
                        self.register_changed(nested);
                    }
                }
                None => {
                    removed.insert(module_id.clone(), base_dep);
                    self.register_removed(base_dep);
                }
            }
        }

        for (module_id, comparing_dep_id) in unmatched {
            let comparing_dep = comparing_sbom.component(comparing_dep_id);
            added.insert(module_id.to_string(), comparing_dep);
            self.register_added(comparing_dep);
            for transitive in comparing_sbom.transitive_hull(comparing_dep_id) {
                self.register_added(transitive);
            }
        }

        let node = &mut self.result.nodes[id.index()];
        node.changed_dependencies = changed;
        node.added_dependencies = added;
        node.removed_dependencies = removed;
        id
    }

    fn register_changed(&mut self, id: DiffId) {
        let node = &self.result.nodes[id.index()];
        let (base, comparing) = (node.base(), node.comparing());
        self.result.changed_dependencies.insert(node.pair_key(), id);
        self.result
            .involved_components
            .insert(base.purl.clone(), base);
        self.result
            .involved_components
            .insert(comparing.purl.clone(), comparing);
    }

    fn register_added(&mut self, component: &'a Component) {
        self.result
            .added_dependencies
            .insert(component.purl.clone(), component);
        self.result
            .involved_components
            .insert(component.purl.clone(), component);
    }

    fn register_removed(&mut self, component: &'a Component) {
        self.result
            .removed_dependencies
            .insert(component.purl.clone(), component);
        self.result
            .involved_components
            .insert(component.purl.clone(), component);
    }
}
