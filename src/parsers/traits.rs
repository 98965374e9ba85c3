//! Parser trait definition.

use crate::error::{Result, SbomDiffError};
use crate::model::Sbom;
use std::path::Path;

/// Trait for SBOM format parsers
///
/// Implementors turn a document into a fully linked [`Sbom`] graph.
pub trait SbomParser {
    /// Parse SBOM from a file path
    fn parse(&self, path: &Path) -> Result<Sbom> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SbomDiffError::io(path, e))?;
        self.parse_str(&content)
    }

    /// Parse SBOM from string content
    fn parse_str(&self, content: &str) -> Result<Sbom>;

    /// Get format name
    fn format_name(&self) -> &str;
}
