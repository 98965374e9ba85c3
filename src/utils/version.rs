//! Version comparison utilities.

use semver::Version;
use std::cmp::Ordering;

/// Parse a strict semantic version.
///
/// Surrounding whitespace and a single leading `v` are tolerated; anything
/// else that is not `MAJOR.MINOR.PATCH[-PRE][+BUILD]` is rejected, so
/// `1.0`, `1.0-SNAPSHOT` or `01.2.3` yield `None`.
pub fn parse_strict(version: &str) -> Option<Version> {
    let trimmed = version.trim();
    let plain = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(plain).ok()
}

/// Semver precedence of two parsed versions; build metadata is ignored.
pub fn compare_precedence(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch)
        .cmp(&(b.major, b.minor, b.patch))
        .then_with(|| a.pre.cmp(&b.pre))
}

/// Compare two version strings by semver precedence.
///
/// Returns `None` when either side is not a valid semantic version.
pub fn compare_versions(a: &str, b: &str) -> Option<Ordering> {
    match (parse_strict(a), parse_strict(b)) {
        (Some(ver_a), Some(ver_b)) => Some(compare_precedence(&ver_a, &ver_b)),
        _ => None,
    }
}
