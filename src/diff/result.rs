//! Diff result types.
//!
//! An [`SbomDiff`] borrows both graphs it was computed from. Pair diffs live
//! in an arena inside the `SbomDiff` and reference each other by [`DiffId`],
//! so a pair reached through several parents is stored once and every parent
//! points at the same node.

use crate::model::{Component, Sbom};
use crate::utils::compare_versions;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Index of a pair diff inside its [`SbomDiff`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DiffId(usize);

impl DiffId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the owning arena
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Type of change between the base and comparing side of a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeType {
    /// Comparing version is higher
    Upgraded,
    /// Comparing version is lower
    Downgraded,
    /// Versions are equal; only the dependencies may differ
    DependenciesChanged,
    /// At least one version is not a valid semantic version
    Unknown,
}

impl ChangeType {
    /// Classify a version pair.
    #[must_use]
    pub fn classify(base_version: &str, comparing_version: &str) -> Self {
        match compare_versions(base_version, comparing_version) {
            None => Self::Unknown,
            Some(Ordering::Less) => Self::Upgraded,
            Some(Ordering::Greater) => Self::Downgraded,
            Some(Ordering::Equal) => Self::DependenciesChanged,
        }
    }

    /// Get display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Upgraded => "Upgraded",
            Self::Downgraded => "Downgraded",
            Self::DependenciesChanged => "DependenciesChanged",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Diff of one matched (base, comparing) component pair.
///
/// All three maps are keyed by module id.
#[derive(Debug, Clone)]
pub struct ComponentDiff<'a> {
    base: &'a Component,
    comparing: &'a Component,
    change_type: ChangeType,
    pub(crate) changed_dependencies: IndexMap<String, DiffId>,
    pub(crate) added_dependencies: IndexMap<String, &'a Component>,
    pub(crate) removed_dependencies: IndexMap<String, &'a Component>,
}

impl<'a> ComponentDiff<'a> {
    pub(crate) fn new(base: &'a Component, comparing: &'a Component) -> Self {
        Self {
            base,
            comparing,
            change_type: ChangeType::classify(&base.version, &comparing.version),
            changed_dependencies: IndexMap::new(),
            added_dependencies: IndexMap::new(),
            removed_dependencies: IndexMap::new(),
        }
    }

    /// Component on the base side
    #[must_use]
    pub const fn base(&self) -> &'a Component {
        self.base
    }

    /// Component on the comparing side
    #[must_use]
    pub const fn comparing(&self) -> &'a Component {
        self.comparing
    }

    #[must_use]
    pub const fn change_type(&self) -> ChangeType {
        self.change_type
    }

    /// Direct dependencies present on both sides that changed
    #[must_use]
    pub const fn changed_dependencies(&self) -> &IndexMap<String, DiffId> {
        &self.changed_dependencies
    }

    /// Direct dependencies only present on the comparing side
    #[must_use]
    pub const fn added_dependencies(&self) -> &IndexMap<String, &'a Component> {
        &self.added_dependencies
    }

    /// Direct dependencies only present on the base side
    #[must_use]
    pub const fn removed_dependencies(&self) -> &IndexMap<String, &'a Component> {
        &self.removed_dependencies
    }

    /// Nested diff id of a changed direct dependency
    #[must_use]
    pub fn get_change(&self, module_id: &str) -> Option<DiffId> {
        self.changed_dependencies.get(module_id).copied()
    }

    /// True iff any direct dependency changed, was added or was removed
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changed_dependencies.is_empty()
            || !self.added_dependencies.is_empty()
            || !self.removed_dependencies.is_empty()
    }

    /// `"<basePurl>:<comparingPurl>"`
    #[must_use]
    pub fn pair_key(&self) -> String {
        SbomDiff::encode_component_pair(self.base, self.comparing)
    }
}

impl fmt::Display for ComponentDiff<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{base: {}, comparing: {}}}",
            self.base.purl, self.comparing.purl
        )
    }
}

/// Handle to one pair diff that can follow nested changes.
#[derive(Debug, Clone, Copy)]
pub struct ComponentDiffView<'d, 'a> {
    diff: &'d SbomDiff<'a>,
    id: DiffId,
}

impl<'d, 'a> ComponentDiffView<'d, 'a> {
    /// Arena id; equal ids mean the same pair diff
    #[must_use]
    pub const fn id(&self) -> DiffId {
        self.id
    }

    /// The underlying pair diff
    #[must_use]
    pub fn node(&self) -> &'d ComponentDiff<'a> {
        self.diff.node(self.id)
    }

    #[must_use]
    pub fn base(&self) -> &'a Component {
        self.node().base()
    }

    #[must_use]
    pub fn comparing(&self) -> &'a Component {
        self.node().comparing()
    }

    #[must_use]
    pub fn change_type(&self) -> ChangeType {
        self.node().change_type()
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.node().has_changes()
    }

    /// Nested diff of the changed direct dependency `module_id`
    #[must_use]
    pub fn get_change(&self, module_id: &str) -> Option<Self> {
        self.node()
            .get_change(module_id)
            .map(|id| Self { diff: self.diff, id })
    }

    /// Changed direct dependencies with their nested diffs
    pub fn changed_dependencies(&self) -> impl Iterator<Item = (&'d str, Self)> + 'd {
        let diff = self.diff;
        self.node()
            .changed_dependencies()
            .iter()
            .map(move |(module_id, &id)| (module_id.as_str(), Self { diff, id }))
    }

    /// Added direct dependencies keyed by module id
    #[must_use]
    pub fn added_dependencies(&self) -> &'d IndexMap<String, &'a Component> {
        self.node().added_dependencies()
    }

    /// Removed direct dependencies keyed by module id
    #[must_use]
    pub fn removed_dependencies(&self) -> &'d IndexMap<String, &'a Component> {
        self.node().removed_dependencies()
    }
}

impl fmt::Display for ComponentDiffView<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.node(), f)
    }
}

/// Result of diffing two SBOM graphs of the same project.
///
/// Besides the root pair diff it carries flat indexes over everything touched
/// anywhere in the traversal, keyed by purl (or purl pair for changes).
#[derive(Debug)]
pub struct SbomDiff<'a> {
    base: &'a Sbom,
    comparing: &'a Sbom,
    pub(crate) nodes: Vec<ComponentDiff<'a>>,
    pub(crate) root: DiffId,
    pub(crate) changed_dependencies: IndexMap<String, DiffId>,
    pub(crate) added_dependencies: IndexMap<String, &'a Component>,
    pub(crate) removed_dependencies: IndexMap<String, &'a Component>,
    pub(crate) involved_components: IndexMap<String, &'a Component>,
}

impl<'a> SbomDiff<'a> {
    pub(crate) fn new(base: &'a Sbom, comparing: &'a Sbom) -> Self {
        Self {
            base,
            comparing,
            nodes: Vec::new(),
            root: DiffId::new(0),
            changed_dependencies: IndexMap::new(),
            added_dependencies: IndexMap::new(),
            removed_dependencies: IndexMap::new(),
            involved_components: IndexMap::new(),
        }
    }

    /// Encode a component pair as `"<basePurl>:<comparingPurl>"`
    #[must_use]
    pub fn encode_component_pair(base: &Component, comparing: &Component) -> String {
        format!("{}:{}", base.purl, comparing.purl)
    }

    /// The base graph
    #[must_use]
    pub const fn base_sbom(&self) -> &'a Sbom {
        self.base
    }

    /// The comparing graph
    #[must_use]
    pub const fn comparing_sbom(&self) -> &'a Sbom {
        self.comparing
    }

    /// Diff of the two root components
    #[must_use]
    pub fn root_component_diff(&self) -> ComponentDiffView<'_, 'a> {
        self.view(self.root)
    }

    /// Handle for a pair diff id of this result
    #[must_use]
    pub fn view(&self, id: DiffId) -> ComponentDiffView<'_, 'a> {
        ComponentDiffView { diff: self, id }
    }

    /// Pair diff by id.
    ///
    /// # Panics
    ///
    /// Panics when `id` belongs to another diff result and is out of range.
    #[must_use]
    pub fn node(&self, id: DiffId) -> &ComponentDiff<'a> {
        &self.nodes[id.index()]
    }

    /// Every pair diff created during the traversal, root included
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.nodes.len()
    }

    /// Registered diff of a changed pair, if that pair was reported as changed
    #[must_use]
    pub fn component_diff(
        &self,
        base: &Component,
        comparing: &Component,
    ) -> Option<ComponentDiffView<'_, 'a>> {
        self.changed_dependencies
            .get(&Self::encode_component_pair(base, comparing))
            .map(|&id| self.view(id))
    }

    /// Changed pairs keyed by encoded purl pair
    pub fn changed_dependencies(&self) -> impl Iterator<Item = (&str, ComponentDiffView<'_, 'a>)> {
        self.changed_dependencies
            .iter()
            .map(|(key, &id)| (key.as_str(), self.view(id)))
    }

    /// Components added anywhere in the tree, keyed by purl
    #[must_use]
    pub const fn added_dependencies(&self) -> &IndexMap<String, &'a Component> {
        &self.added_dependencies
    }

    /// Components removed anywhere in the tree, keyed by purl
    #[must_use]
    pub const fn removed_dependencies(&self) -> &IndexMap<String, &'a Component> {
        &self.removed_dependencies
    }

    /// Components that were added, removed or part of a changed pair, keyed by purl
    #[must_use]
    pub const fn involved_components(&self) -> &IndexMap<String, &'a Component> {
        &self.involved_components
    }

    /// Whether the root pair reports any change
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.root_component_diff().has_changes()
    }

    /// Aggregate counts
    #[must_use]
    pub fn summary(&self) -> DiffSummary {
        DiffSummary {
            changed_pairs: self.changed_dependencies.len(),
            added_components: self.added_dependencies.len(),
            removed_components: self.removed_dependencies.len(),
            involved_components: self.involved_components.len(),
            root_has_changes: self.has_changes(),
        }
    }
}

/// Aggregate counts of an [`SbomDiff`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub changed_pairs: usize,
    pub added_components: usize,
    pub removed_components: usize,
    pub involved_components: usize,
    pub root_has_changes: bool,
}
