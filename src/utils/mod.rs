//! Shared utilities.

mod version;

pub use version::{compare_precedence, compare_versions, parse_strict};
