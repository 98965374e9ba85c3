//! Render de-duplication state.

use crate::diff::ComponentDiff;
use crate::model::Component;
use std::collections::HashSet;

/// Remembers which pair diffs and component trees were already emitted.
///
/// Create one per render; shared subtrees are then expanded at their first
/// occurrence only.
#[derive(Debug, Default)]
pub struct RenderTracker {
    rendered_diffs: HashSet<String>,
    rendered_trees: HashSet<String>,
}

impl RenderTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True the first time the pair `"<basePurl> => <comparingPurl>"` is seen
    pub fn should_render_component_diff(&mut self, diff: &ComponentDiff<'_>) -> bool {
        self.rendered_diffs.insert(format!(
            "{} => {}",
            diff.base().purl,
            diff.comparing().purl
        ))
    }

    /// True the first time `component`'s purl is seen
    pub fn should_render_component_tree(&mut self, component: &Component) -> bool {
        self.rendered_trees.insert(component.purl.clone())
    }

    /// Whether `component` has a subtree worth rendering
    #[must_use]
    pub fn has_dependencies(component: &Component) -> bool {
        component.has_dependencies()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PrimaryPartyMatcher;

    fn component(version: &str) -> Component {
        Component::new(
            "org.test",
            "lib",
            version,
            format!("pkg:maven/org.test/lib@{version}"),
            version,
            &PrimaryPartyMatcher::none(),
        )
    }

    #[test]
    fn test_diff_rendered_once() {
        let (a, b) = (component("1.0.0"), component("2.0.0"));
        let diff = ComponentDiff::new(&a, &b);
        let reverse = ComponentDiff::new(&b, &a);

        let mut tracker = RenderTracker::new();
        assert!(tracker.should_render_component_diff(&diff));
        assert!(!tracker.should_render_component_diff(&diff));
        assert!(tracker.should_render_component_diff(&reverse));
    }

    #[test]
    fn test_tree_rendered_once_per_tracker() {
        let c = component("1.0.0");
        let mut tracker = RenderTracker::new();
        assert!(tracker.should_render_component_tree(&c));
        assert!(!tracker.should_render_component_tree(&c));

        let mut fresh = RenderTracker::new();
        assert!(fresh.should_render_component_tree(&c));
        assert!(!RenderTracker::has_dependencies(&c));
    }
}
