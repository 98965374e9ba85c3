//! Property-based tests for graph building and tree diffs.
//!
//! Random graphs, cyclic ones included, must always build, their hulls must
//! match plain reachability, and diffs over them must terminate.

use proptest::prelude::*;
use sbom_tree_diff::config::CompiledConfig;
use sbom_tree_diff::model::{
    Component, ComponentId, DeclaredDependency, DependencyGraphBuilder, PrimaryPartyMatcher, Sbom,
};
use sbom_tree_diff::parsers::parse_sbom_str;
use sbom_tree_diff::DiffEngine;
use std::collections::{BTreeSet, HashMap};

/// Node `i` is `n{i}` at `versions[i]`; node 0 is the root.
fn build(versions: &[u8], edges: &[(usize, usize)]) -> Sbom {
    let matcher = PrimaryPartyMatcher::none();
    let mut builder = DependencyGraphBuilder::new();
    for (i, version) in versions.iter().enumerate() {
        let name = format!("n{i}");
        let version = format!("1.{version}.0");
        let component = Component::new(
            "org.prop",
            name.as_str(),
            version.as_str(),
            format!("pkg:maven/org.prop/{name}@{version}"),
            name.as_str(),
            &matcher,
        );
        if i == 0 {
            builder.set_root(component);
        } else {
            builder.add_component(component);
        }
    }
    for &(from, to) in edges {
        let n = versions.len();
        builder.declare(DeclaredDependency::new(
            format!("n{}", from % n),
            [format!("n{}", to % n)],
        ));
    }
    builder.build().expect("every reference resolves")
}

fn reachable(sbom: &Sbom, start: ComponentId) -> BTreeSet<String> {
    let mut seen = BTreeSet::new();
    let mut stack: Vec<ComponentId> = sbom.component(start).dependencies().values().copied().collect();
    while let Some(id) = stack.pop() {
        if seen.insert(sbom.component(id).purl.clone()) {
            stack.extend(sbom.component(id).dependencies().values().copied());
        }
    }
    seen
}

fn graph_strategy() -> impl Strategy<Value = (Vec<u8>, Vec<(usize, usize)>)> {
    (1usize..12).prop_flat_map(|n| {
        (
            prop::collection::vec(0u8..3, n),
            prop::collection::vec((0..n, 0..n), 0..30),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn hull_matches_reachability((versions, edges) in graph_strategy()) {
        let sbom = build(&versions, &edges);
        for (id, component) in sbom.components() {
            let hull: BTreeSet<String> = sbom.transitive_hull(id).map(|c| c.purl.clone()).collect();
            prop_assert_eq!(hull.len(), component.transitive_hull().len(), "hull has no duplicates");
            prop_assert_eq!(hull, reachable(&sbom, id));
        }
    }

    #[test]
    fn dependents_mirror_dependencies((versions, edges) in graph_strategy()) {
        let sbom = build(&versions, &edges);
        let mut expected: HashMap<ComponentId, BTreeSet<ComponentId>> = HashMap::new();
        for (id, component) in sbom.components() {
            for &dep in component.dependencies().values() {
                expected.entry(dep).or_default().insert(id);
            }
        }
        for (id, component) in sbom.components() {
            let dependents: BTreeSet<ComponentId> = component.dependents().iter().copied().collect();
            prop_assert_eq!(dependents, expected.remove(&id).unwrap_or_default());
        }
    }

    #[test]
    fn self_diff_has_no_changes((versions, edges) in graph_strategy()) {
        let sbom = build(&versions, &edges);
        let diff = DiffEngine::new().diff(&sbom, &sbom).expect("same project");
        prop_assert!(!diff.has_changes());
        prop_assert!(diff.involved_components().is_empty());
    }

    #[test]
    fn diff_terminates_and_stays_in_bounds(
        (base_versions, base_edges) in graph_strategy(),
        (head_versions, head_edges) in graph_strategy(),
    ) {
        // shared root so both graphs describe the same project
        let mut head_versions = head_versions;
        head_versions[0] = base_versions[0];

        let base = build(&base_versions, &base_edges);
        let head = build(&head_versions, &head_edges);
        let diff = DiffEngine::new().diff(&base, &head).expect("same project");

        for purl in diff.removed_dependencies().keys() {
            prop_assert!(base.components().any(|(_, c)| &c.purl == purl));
        }
        for purl in diff.added_dependencies().keys() {
            prop_assert!(head.components().any(|(_, c)| &c.purl == purl));
        }
        for (_, change) in diff.changed_dependencies() {
            prop_assert!(change.has_changes() || !change.base().is_equal_to(change.comparing()));
            prop_assert_eq!(&change.base().module_id, &change.comparing().module_id);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn parse_sbom_str_doesnt_panic(s in "\\PC{0,2000}") {
        let result = parse_sbom_str(&s, &CompiledConfig::default());
        prop_assert!(result.is_err(), "Random input should not parse successfully: {:?}", s);
    }

    #[test]
    fn json_like_input_doesnt_panic(
        s in prop::string::string_regex(r#"\{[^\}]{0,500}\}"#).unwrap()
    ) {
        let _ = parse_sbom_str(&s, &CompiledConfig::default());
    }
}
