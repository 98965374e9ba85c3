//! Dependency graph construction.
//!
//! [`DependencyGraphBuilder`] collects parsed components and the document's
//! dependency declarations, resolves every reference, wires the forward and
//! back edges and computes each component's transitive hull.
//!
//! The hull is computed by a back-reference flood fill: every component is
//! pushed outward along `dependents` links into the hull of each ancestor.
//! An ancestor that already holds the component stops the flood, which
//! dedupes diamonds and terminates on cyclic input.

use super::{Component, ComponentId, Sbom};
use crate::error::{Result, SbomDiffError};
use indexmap::IndexMap;
use std::collections::HashSet;

/// One `{ ref, dependsOn }` entry of a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredDependency {
    /// bom-ref of the declaring component
    pub dependent: String,
    /// bom-refs of its direct dependencies
    pub depends_on: Vec<String>,
}

impl DeclaredDependency {
    /// Create a declaration
    pub fn new<I, S>(dependent: impl Into<String>, depends_on: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dependent: dependent.into(),
            depends_on: depends_on.into_iter().map(Into::into).collect(),
        }
    }
}

/// Builder for a fully linked [`Sbom`].
#[derive(Debug, Default)]
pub struct DependencyGraphBuilder {
    components: Vec<Component>,
    by_bom_ref: IndexMap<String, ComponentId>,
    root: Option<ComponentId>,
    declarations: Vec<DeclaredDependency>,
}

impl DependencyGraphBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component, returning its arena id.
    ///
    /// A second component with an already known bom-ref replaces the first
    /// one in place and keeps its id.
    pub fn add_component(&mut self, component: Component) -> ComponentId {
        if let Some(&existing) = self.by_bom_ref.get(&component.bom_ref) {
            tracing::warn!(
                bom_ref = %component.bom_ref,
                "Duplicate bom-ref, later record replaces the earlier one"
            );
            self.components[existing.index()] = component;
            return existing;
        }

        let id = ComponentId::new(self.components.len());
        self.by_bom_ref.insert(component.bom_ref.clone(), id);
        self.components.push(component);
        id
    }

    /// Add the component the document describes
    pub fn set_root(&mut self, component: Component) -> ComponentId {
        let id = self.add_component(component);
        self.root = Some(id);
        id
    }

    /// Record a dependency declaration, resolved in [`build`](Self::build)
    pub fn declare(&mut self, declaration: DeclaredDependency) {
        self.declarations.push(declaration);
    }

    /// Number of components added so far
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Resolve declarations, link edges and compute transitive hulls.
    ///
    /// # Errors
    ///
    /// Fails when no root component was set or a declaration names a
    /// bom-ref that no component carries.
    pub fn build(self) -> Result<Sbom> {
        let Self {
            mut components,
            by_bom_ref,
            root,
            declarations,
        } = self;

        let root = root
            .ok_or_else(|| SbomDiffError::missing_field("metadata.component", "SBOM document"))?;

        for declaration in &declarations {
            let dependent = resolve(&by_bom_ref, &declaration.dependent, &declaration.dependent)?;
            for reference in &declaration.depends_on {
                let dependency = resolve(&by_bom_ref, reference, &declaration.dependent)?;
                let module_id = components[dependency.index()].module_id.clone();
                components[dependent.index()]
                    .dependencies
                    .insert(module_id, dependency);
            }
        }

        link_dependents(&mut components);
        let hulls = transitive_hulls(&components);
        for (component, hull) in components.iter_mut().zip(hulls) {
            component.transitive_hull = hull;
        }

        tracing::debug!(
            components = components.len(),
            declarations = declarations.len(),
            hull_entries = components.iter().map(|c| c.transitive_hull.len()).sum::<usize>(),
            "Built dependency graph"
        );

        Ok(Sbom::from_parts(components, by_bom_ref, root))
    }
}

fn resolve(
    by_bom_ref: &IndexMap<String, ComponentId>,
    reference: &str,
    dependent: &str,
) -> Result<ComponentId> {
    by_bom_ref
        .get(reference)
        .copied()
        .ok_or_else(|| SbomDiffError::unresolved_reference(reference, dependent))
}

/// Derive back-references from the final dependency maps.
fn link_dependents(components: &mut [Component]) {
    let edges: Vec<(ComponentId, ComponentId)> = components
        .iter()
        .enumerate()
        .flat_map(|(index, component)| {
            component
                .dependencies
                .values()
                .map(move |&dependency| (ComponentId::new(index), dependency))
        })
        .collect();

    for (dependent, dependency) in edges {
        components[dependency.index()].dependents.push(dependent);
    }
}

/// Flood every component outward through its dependents.
fn transitive_hulls(components: &[Component]) -> Vec<Vec<ComponentId>> {
    let mut hulls: Vec<Vec<ComponentId>> = vec![Vec::new(); components.len()];
    let mut seen: Vec<HashSet<ComponentId>> = vec![HashSet::new(); components.len()];

    for (index, component) in components.iter().enumerate() {
        let member = ComponentId::new(index);
        let mut worklist: Vec<ComponentId> = component.dependents.clone();

        while let Some(ancestor) = worklist.pop() {
            if !seen[ancestor.index()].insert(member) {
                continue;
            }
            hulls[ancestor.index()].push(member);
            worklist.extend_from_slice(&components[ancestor.index()].dependents);
        }

        tracing::trace!(component = %component.purl, "Propagated into ancestor hulls");
    }

    hulls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use crate::model::PrimaryPartyMatcher;

    fn node(name: &str) -> Component {
        Component::new(
            "org.test",
            name,
            "1.0.0",
            format!("pkg:maven/org.test/{name}@1.0.0"),
            name,
            &PrimaryPartyMatcher::none(),
        )
    }

    fn build(names: &[&str], edges: &[(&str, &[&str])]) -> Sbom {
        let mut builder = DependencyGraphBuilder::new();
        builder.set_root(node(names[0]));
        for name in &names[1..] {
            builder.add_component(node(name));
        }
        for (dependent, deps) in edges {
            builder.declare(DeclaredDependency::new(*dependent, deps.iter().copied()));
        }
        builder.build().expect("graph builds")
    }

    fn hull_names(sbom: &Sbom, name: &str) -> Vec<String> {
        let component = sbom.get_component(name).expect("component exists");
        let mut names: Vec<String> = component
            .transitive_hull()
            .iter()
            .map(|&id| sbom.component(id).name.clone())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_edges_are_linked_both_ways() {
        let sbom = build(&["root", "a", "b"], &[("root", &["a", "b"]), ("a", &["b"])]);
        let root = sbom.root_component();
        assert_eq!(
            root.dependencies().keys().collect::<Vec<_>>(),
            vec!["org.test:a", "org.test:b"]
        );

        let b = sbom.get_component("b").expect("b exists");
        assert_eq!(b.dependents().len(), 2);
        assert!(!b.has_dependencies());
    }

    #[test]
    fn test_diamond_hull_is_deduplicated() {
        let sbom = build(
            &["root", "left", "right", "shared", "leaf"],
            &[
                ("root", &["left", "right"]),
                ("left", &["shared"]),
                ("right", &["shared"]),
                ("shared", &["leaf"]),
            ],
        );
        assert_eq!(
            hull_names(&sbom, "root"),
            vec!["leaf", "left", "right", "shared"]
        );
        assert_eq!(hull_names(&sbom, "left"), vec!["leaf", "shared"]);
        assert!(hull_names(&sbom, "leaf").is_empty());
        assert_eq!(sbom.root_component().transitive_hull().len(), 4);
    }

    #[test]
    fn test_cycle_terminates() {
        let sbom = build(
            &["root", "a", "b"],
            &[("root", &["a"]), ("a", &["b"]), ("b", &["a"])],
        );
        assert_eq!(hull_names(&sbom, "root"), vec!["a", "b"]);
        assert_eq!(hull_names(&sbom, "a"), vec!["a", "b"]);
        assert_eq!(hull_names(&sbom, "b"), vec!["a", "b"]);
    }

    #[test]
    fn test_component_without_declaration_has_no_dependencies() {
        let sbom = build(&["root", "orphan"], &[]);
        let orphan = sbom.get_component("orphan").expect("orphan exists");
        assert!(orphan.dependencies().is_empty());
        assert!(orphan.transitive_hull().is_empty());
    }

    #[test]
    fn test_repeated_declarations_are_merged() {
        let sbom = build(
            &["root", "a", "b"],
            &[("root", &["a"]), ("root", &["b"]), ("root", &["a"])],
        );
        assert_eq!(sbom.root_component().dependencies().len(), 2);
        let a = sbom.get_component("a").expect("a exists");
        assert_eq!(a.dependents().len(), 1);
    }

    #[test]
    fn test_unresolved_reference_fails() {
        let mut builder = DependencyGraphBuilder::new();
        builder.set_root(node("root"));
        builder.declare(DeclaredDependency::new("root", ["ghost"]));

        match builder.build() {
            Err(SbomDiffError::Parse {
                source: ParseErrorKind::UnresolvedReference { reference, dependent },
                ..
            }) => {
                assert_eq!(reference, "ghost");
                assert_eq!(dependent, "root");
            }
            other => panic!("Expected unresolved reference, got {other:?}"),
        }
    }

    #[test]
    fn test_unresolved_dependent_fails() {
        let mut builder = DependencyGraphBuilder::new();
        builder.set_root(node("root"));
        builder.declare(DeclaredDependency::new("ghost", Vec::<String>::new()));
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_missing_root_fails() {
        let mut builder = DependencyGraphBuilder::new();
        builder.add_component(node("a"));
        match builder.build() {
            Err(SbomDiffError::Parse {
                source: ParseErrorKind::MissingField { field, .. },
                ..
            }) => assert_eq!(field, "metadata.component"),
            other => panic!("Expected missing root, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_bom_ref_replaces_in_place() {
        let mut builder = DependencyGraphBuilder::new();
        builder.set_root(node("root"));
        let first = builder.add_component(node("a"));
        let mut newer = node("a");
        newer.version = "2.0.0".to_string();
        let second = builder.add_component(newer);

        assert_eq!(first, second);
        assert_eq!(builder.component_count(), 2);
        let sbom = builder.build().expect("graph builds");
        assert_eq!(sbom.component(first).version, "2.0.0");
    }
}
