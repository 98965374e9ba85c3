//! Pipeline orchestration for tree diffs.
//!
//! Reads two CycloneDX documents, parses both with the same compiled
//! configuration and diffs them. Errors carry the file they came from.

use crate::config::DiffConfig;
use crate::diff::{DiffEngine, SbomDiff};
use crate::model::Sbom;
use crate::parsers::{parse_sbom, parse_sbom_str};
use crate::report::DiffReport;
use anyhow::{Context, Result};
use std::path::Path;

/// The two graphs of a comparison, owned so diffs can borrow from them
#[derive(Debug)]
pub struct SbomPair {
    pub base: Sbom,
    pub comparing: Sbom,
}

impl SbomPair {
    /// Parse `base_path` and `head_path` with `config`.
    pub fn load(base_path: &Path, head_path: &Path, config: &DiffConfig) -> Result<Self> {
        let compiled = config
            .compile()
            .context("Failed to compile diff configuration")?;

        tracing::info!("Parsing base SBOM: {:?}", base_path);
        let base = parse_sbom(base_path, &compiled)
            .with_context(|| format!("Failed to parse SBOM: {}", base_path.display()))?;

        tracing::info!("Parsing head SBOM: {:?}", head_path);
        let comparing = parse_sbom(head_path, &compiled)
            .with_context(|| format!("Failed to parse SBOM: {}", head_path.display()))?;

        tracing::info!(
            "Parsed {} base and {} head components",
            base.len(),
            comparing.len()
        );
        Ok(Self { base, comparing })
    }

    /// Same as [`SbomPair::load`] for in-memory documents.
    pub fn from_strs(base: &str, head: &str, config: &DiffConfig) -> Result<Self> {
        let compiled = config
            .compile()
            .context("Failed to compile diff configuration")?;
        let base = parse_sbom_str(base, &compiled).context("Failed to parse base SBOM")?;
        let comparing = parse_sbom_str(head, &compiled).context("Failed to parse head SBOM")?;
        Ok(Self { base, comparing })
    }

    /// Diff base against head.
    pub fn diff(&self) -> Result<SbomDiff<'_>> {
        DiffEngine::new()
            .diff(&self.base, &self.comparing)
            .context("Failed to compute diff")
    }

    /// Diff and snapshot the result.
    pub fn report(&self) -> Result<DiffReport> {
        let diff = self.diff()?;
        Ok(DiffReport::new(&diff))
    }
}

/// Load, diff and render two files as pretty JSON.
pub fn diff_files_to_json(base_path: &Path, head_path: &Path, config: &DiffConfig) -> Result<String> {
    let pair = SbomPair::load(base_path, head_path, config)?;
    let report = pair.report()?;
    report.to_json().context("Failed to serialize diff report")
}
