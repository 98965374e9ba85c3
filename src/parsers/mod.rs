//! SBOM document parsers.
//!
//! Documents are read as CycloneDX JSON and turned into a linked [`Sbom`]
//! graph. Group and license classification happen while parsing, so a
//! [`CompiledConfig`] is needed up front.
//!
//! ## Usage
//!
//! ```no_run
//! use sbom_tree_diff::config::DiffConfig;
//! use sbom_tree_diff::parsers::parse_sbom;
//! use std::path::Path;
//!
//! let config = DiffConfig::default().compile()?;
//! let sbom = parse_sbom(Path::new("bom.json"), &config)?;
//! println!("{} components", sbom.len());
//! # Ok::<(), sbom_tree_diff::SbomDiffError>(())
//! ```

mod cyclonedx;
mod traits;

pub use cyclonedx::CycloneDxParser;
pub use traits::SbomParser;

use crate::config::CompiledConfig;
use crate::error::{Result, SbomDiffError};
use crate::model::Sbom;
use std::path::Path;

/// Maximum SBOM file size (512 MB).
const MAX_SBOM_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// Parse an SBOM document from disk.
///
/// Returns an error if the file exceeds [`MAX_SBOM_FILE_SIZE`] to prevent OOM.
pub fn parse_sbom(path: &Path, config: &CompiledConfig) -> Result<Sbom> {
    let metadata = std::fs::metadata(path).map_err(|e| SbomDiffError::io(path, e))?;
    if metadata.len() > MAX_SBOM_FILE_SIZE {
        return Err(SbomDiffError::validation(format!(
            "SBOM file is {} MB, exceeding the {} MB limit",
            metadata.len() / (1024 * 1024),
            MAX_SBOM_FILE_SIZE / (1024 * 1024),
        )));
    }
    CycloneDxParser::new(config.clone()).parse(path)
}

/// Parse an SBOM document from string content.
pub fn parse_sbom_str(content: &str, config: &CompiledConfig) -> Result<Sbom> {
    CycloneDxParser::new(config.clone()).parse_str(content)
}
