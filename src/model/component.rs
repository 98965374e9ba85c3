//! Component entity: one SBOM entry with its licenses, links and graph edges.

use super::{careful_license_types, License, LicenseType};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable index of a component inside the [`Sbom`](super::Sbom) arena that owns it.
///
/// Ids are only meaningful for the graph that produced them; a base and a
/// comparing graph hand out overlapping ids for unrelated components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(usize);

impl ComponentId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the owning arena
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// External reference of a component (website, VCS, issue tracker, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    /// Reference type as declared in the document (`website`, `vcs`, ...)
    pub label: String,
    /// Target URL; documents may omit it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Decides whether a component's group belongs to the primary party.
///
/// The pattern is searched anywhere in the group, it is not anchored unless
/// the expression itself says so.
#[derive(Debug, Clone, Default)]
pub struct PrimaryPartyMatcher {
    pattern: Option<Regex>,
}

impl PrimaryPartyMatcher {
    /// Compile a matcher from a regular expression.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Some(Regex::new(pattern)?),
        })
    }

    /// Matcher without a pattern; every group counts as primary party.
    #[must_use]
    pub const fn none() -> Self {
        Self { pattern: None }
    }

    /// The source expression, if any
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    /// Whether `group` belongs to the primary party
    #[must_use]
    pub fn is_primary(&self, group: &str) -> bool {
        self.pattern.as_ref().map_or(true, |re| re.is_match(group))
    }
}

/// One component of an SBOM document.
///
/// Identity fields and license data are filled in when the record is parsed;
/// the graph fields (`dependencies`, `dependents`, `transitive_hull`) are
/// populated by [`DependencyGraphBuilder`](super::DependencyGraphBuilder).
#[derive(Debug, Clone)]
pub struct Component {
    /// Group / namespace (Maven groupId, npm scope, ...)
    pub group: String,
    /// Component name
    pub name: String,
    /// Version string, not necessarily semver
    pub version: String,
    /// Package URL, unique per exact instance within one document
    pub purl: String,
    /// Document-local reference id
    pub bom_ref: String,
    /// `group:name`, stable across versions
    pub module_id: String,
    /// Group does not match the primary-party pattern
    pub third_party: bool,
    /// Normalized licenses, in document order
    pub licenses: Vec<License>,
    /// External references
    pub links: Vec<ExternalLink>,
    /// Careful license categories present, see [`careful_license_types`]
    pub careful_license_types: Vec<LicenseType>,
    /// At least one license is declared and all of them are Go
    pub all_licenses_go: bool,
    /// More than one license is declared
    pub has_multiple_licenses: bool,
    pub(crate) dependencies: IndexMap<String, ComponentId>,
    pub(crate) dependents: Vec<ComponentId>,
    pub(crate) transitive_hull: Vec<ComponentId>,
}

impl Component {
    /// Create a component without licenses, links or edges.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        purl: impl Into<String>,
        bom_ref: impl Into<String>,
        matcher: &PrimaryPartyMatcher,
    ) -> Self {
        let group = group.into();
        let name = name.into();
        let module_id = format!("{group}:{name}");
        let third_party = !matcher.is_primary(&group);

        let mut component = Self {
            group,
            name,
            version: version.into(),
            purl: purl.into(),
            bom_ref: bom_ref.into(),
            module_id,
            third_party,
            licenses: Vec::new(),
            links: Vec::new(),
            careful_license_types: Vec::new(),
            all_licenses_go: false,
            has_multiple_licenses: false,
            dependencies: IndexMap::new(),
            dependents: Vec::new(),
            transitive_hull: Vec::new(),
        };
        component.refresh_license_flags();
        component
    }

    /// Set licenses and recompute the derived license flags
    #[must_use]
    pub fn with_licenses(mut self, licenses: Vec<License>) -> Self {
        self.licenses = licenses;
        self.refresh_license_flags();
        self
    }

    /// Set external links
    #[must_use]
    pub fn with_links(mut self, links: Vec<ExternalLink>) -> Self {
        self.links = links;
        self
    }

    fn refresh_license_flags(&mut self) {
        self.careful_license_types = careful_license_types(&self.licenses);
        self.all_licenses_go = !self.licenses.is_empty()
            && self
                .licenses
                .iter()
                .all(|l| !l.license_type.is_careful());
        self.has_multiple_licenses = self.licenses.len() > 1;
    }

    /// Value equality: same package URL
    #[must_use]
    pub fn is_equal_to(&self, other: &Self) -> bool {
        self.purl == other.purl
    }

    /// Direct dependencies keyed by module id
    #[must_use]
    pub const fn dependencies(&self) -> &IndexMap<String, ComponentId> {
        &self.dependencies
    }

    /// Components declaring this one as a direct dependency
    #[must_use]
    pub fn dependents(&self) -> &[ComponentId] {
        &self.dependents
    }

    /// Every component reachable through dependency edges
    #[must_use]
    pub fn transitive_hull(&self) -> &[ComponentId] {
        &self.transitive_hull
    }

    /// Whether the component declares any direct dependency
    #[must_use]
    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }

    /// `group:name:version`
    #[must_use]
    pub fn coordinates(&self) -> String {
        format!("{}:{}", self.module_id, self.version)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{purl: {}}}", self.purl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LicenseEvaluator, LicenseList};

    fn component(group: &str, matcher: &PrimaryPartyMatcher) -> Component {
        Component::new(
            group,
            "demo",
            "1.0.0",
            format!("pkg:maven/{group}/demo@1.0.0"),
            format!("{group}:demo"),
            matcher,
        )
    }

    #[test]
    fn test_module_id_ignores_version() {
        let matcher = PrimaryPartyMatcher::none();
        let a = Component::new("org.acme", "core", "1.0", "pkg:a@1.0", "a", &matcher);
        let b = Component::new("org.acme", "core", "2.0", "pkg:a@2.0", "b", &matcher);
        assert_eq!(a.module_id, "org.acme:core");
        assert_eq!(a.module_id, b.module_id);
        assert!(!a.is_equal_to(&b));
        assert_eq!(a.coordinates(), "org.acme:core:1.0");
    }

    #[test]
    fn test_equality_is_by_purl() {
        let matcher = PrimaryPartyMatcher::none();
        let a = Component::new("g", "n", "1", "pkg:x", "ref-1", &matcher);
        let b = Component::new("other", "name", "2", "pkg:x", "ref-2", &matcher);
        assert!(a.is_equal_to(&b));
    }

    #[test]
    fn test_third_party_flag() {
        let matcher = PrimaryPartyMatcher::new(r"^org\.camunda").expect("valid pattern");
        assert!(!component("org.camunda.example", &matcher).third_party);
        assert!(component("org.springframework", &matcher).third_party);
        // unanchored patterns match anywhere in the group
        let loose = PrimaryPartyMatcher::new("camunda").expect("valid pattern");
        assert!(!component("io.camunda.zeebe", &loose).third_party);

        let none = PrimaryPartyMatcher::none();
        assert!(!component("org.camunda.example", &none).third_party);
        assert!(!component("org.springframework", &none).third_party);
        assert!(!component("", &none).third_party);
        assert_eq!(none.pattern(), None);
    }

    #[test]
    fn test_license_flags() {
        let eval = LicenseEvaluator::new(&LicenseList {
            go: vec!["MIT".into(), "Apache-2.0".into()],
            ..LicenseList::default()
        });
        let matcher = PrimaryPartyMatcher::none();

        let bare = component("g", &matcher);
        assert!(!bare.all_licenses_go);
        assert!(!bare.has_multiple_licenses);
        assert_eq!(bare.careful_license_types, vec![LicenseType::Unknown]);

        let dual = component("g", &matcher).with_licenses(vec![
            License::from_descriptor(Some("MIT".into()), None, None, &eval),
            License::from_descriptor(Some("Apache-2.0".into()), None, None, &eval),
        ]);
        assert!(dual.all_licenses_go);
        assert!(dual.has_multiple_licenses);
        assert!(dual.careful_license_types.is_empty());

        let mixed = component("g", &matcher).with_licenses(vec![
            License::from_descriptor(Some("MIT".into()), None, None, &eval),
            License::from_expression("MIT OR GPL-3.0-only".into()),
        ]);
        assert!(!mixed.all_licenses_go);
        assert_eq!(mixed.careful_license_types, vec![LicenseType::Unknown]);
    }

    #[test]
    fn test_display() {
        let c = component("org.acme", &PrimaryPartyMatcher::none());
        assert_eq!(c.to_string(), "{purl: pkg:maven/org.acme/demo@1.0.0}");
        assert!(!c.has_dependencies());
    }
}
