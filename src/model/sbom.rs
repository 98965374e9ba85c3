//! Linked SBOM graph.

use super::{Component, ComponentId};
use indexmap::IndexMap;

/// A fully linked SBOM: an arena of components plus its root.
///
/// Built by [`DependencyGraphBuilder`](super::DependencyGraphBuilder); every
/// [`ComponentId`] handed out by the graph indexes into this arena.
#[derive(Debug, Clone)]
pub struct Sbom {
    components: Vec<Component>,
    by_bom_ref: IndexMap<String, ComponentId>,
    root: ComponentId,
}

impl Sbom {
    pub(crate) fn from_parts(
        components: Vec<Component>,
        by_bom_ref: IndexMap<String, ComponentId>,
        root: ComponentId,
    ) -> Self {
        Self {
            components,
            by_bom_ref,
            root,
        }
    }

    /// Component behind an id of this graph.
    ///
    /// # Panics
    ///
    /// Panics when `id` was produced by a different graph and is out of range.
    #[must_use]
    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id.index()]
    }

    /// Look up a component by its document-local bom-ref
    #[must_use]
    pub fn get_component(&self, bom_ref: &str) -> Option<&Component> {
        self.by_bom_ref.get(bom_ref).map(|&id| self.component(id))
    }

    /// Id of a component by its bom-ref
    #[must_use]
    pub fn component_id(&self, bom_ref: &str) -> Option<ComponentId> {
        self.by_bom_ref.get(bom_ref).copied()
    }

    /// Id of the component the document describes
    #[must_use]
    pub const fn root(&self) -> ComponentId {
        self.root
    }

    /// The component the document describes
    #[must_use]
    pub fn root_component(&self) -> &Component {
        self.component(self.root)
    }

    /// All components with their ids, root included, in document order
    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.components
            .iter()
            .enumerate()
            .map(|(index, component)| (ComponentId::new(index), component))
    }

    /// Number of components, root included
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// A graph always holds at least its root
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of components whose group is not primary party
    #[must_use]
    pub fn third_party_count(&self) -> usize {
        self.components.iter().filter(|c| c.third_party).count()
    }

    /// Direct dependencies of `id`, keyed by module id
    pub fn dependencies_of(&self, id: ComponentId) -> impl Iterator<Item = (&str, &Component)> {
        self.component(id)
            .dependencies()
            .iter()
            .map(|(module_id, &dep)| (module_id.as_str(), self.component(dep)))
    }

    /// Every component reachable from `id`
    pub fn transitive_hull(&self, id: ComponentId) -> impl Iterator<Item = &Component> {
        self.component(id)
            .transitive_hull()
            .iter()
            .map(|&member| self.component(member))
    }

    /// Both graphs describe the same project: root purls are equal
    #[must_use]
    pub fn describes_same_project_as(&self, other: &Self) -> bool {
        self.root_component().is_equal_to(other.root_component())
    }

    /// `group:name:version` of the root component
    #[must_use]
    pub fn project_component_id(&self) -> String {
        self.root_component().coordinates()
    }
}
