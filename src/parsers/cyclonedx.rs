//! CycloneDX SBOM parser.
//!
//! Reads the JSON form of a CycloneDX document: `metadata.component` is the
//! root, `components` lists every other entry and `dependencies` declares the
//! edges by `bom-ref`.

use crate::config::CompiledConfig;
use crate::error::{ErrorContext, Result, SbomDiffError};
use crate::model::{
    Component, DeclaredDependency, DependencyGraphBuilder, ExternalLink, License, Sbom,
};
use crate::parsers::traits::SbomParser;
use serde::Deserialize;

/// Parser for CycloneDX JSON documents
#[derive(Debug, Clone, Default)]
pub struct CycloneDxParser {
    config: CompiledConfig,
}

impl CycloneDxParser {
    /// Create a parser classifying groups and licenses with `config`
    #[must_use]
    pub fn new(config: CompiledConfig) -> Self {
        Self { config }
    }

    /// Parse a CycloneDX BOM from a JSON reader
    pub fn parse_json_reader<R: std::io::Read>(&self, reader: R) -> Result<Sbom> {
        let cdx: CycloneDxBom = serde_json::from_reader(reader)?;
        self.convert_to_sbom(cdx)
    }

    fn convert_to_sbom(&self, cdx: CycloneDxBom) -> Result<Sbom> {
        let root = cdx
            .metadata
            .and_then(|metadata| metadata.component)
            .ok_or_else(|| SbomDiffError::missing_field("metadata.component", "SBOM document"))?;

        let mut builder = DependencyGraphBuilder::new();
        builder.set_root(self.convert_component(root).context("metadata.component")?);

        for (index, cdx_component) in cdx.components.unwrap_or_default().into_iter().enumerate() {
            let component = self
                .convert_component(cdx_component)
                .with_context(|| format!("components[{index}]"))?;
            builder.add_component(component);
        }

        let dependencies = cdx.dependencies.unwrap_or_default();
        tracing::debug!(
            components = builder.component_count(),
            declarations = dependencies.len(),
            "Parsed CycloneDX document"
        );

        for dependency in dependencies {
            builder.declare(DeclaredDependency {
                dependent: dependency.ref_field,
                depends_on: dependency.depends_on.unwrap_or_default(),
            });
        }

        builder.build()
    }

    fn convert_component(&self, cdx: CdxComponent) -> Result<Component> {
        let group = required(cdx.group, "group")?;
        let name = required(cdx.name, "name")?;
        let version = required(cdx.version, "version")?;
        let purl = required(cdx.purl, "purl")?;
        let bom_ref = required(cdx.bom_ref, "bom-ref")?;

        let licenses = cdx
            .licenses
            .unwrap_or_default()
            .into_iter()
            .map(|choice| self.convert_license(choice))
            .collect();

        let links = cdx
            .external_references
            .unwrap_or_default()
            .into_iter()
            .map(|reference| ExternalLink {
                label: reference.ref_type.unwrap_or_else(|| "other".to_string()),
                link: reference.url,
            })
            .collect();

        Ok(
            Component::new(group, name, version, purl, bom_ref, &self.config.matcher)
                .with_licenses(licenses)
                .with_links(links),
        )
    }

    fn convert_license(&self, choice: CdxLicenseChoice) -> License {
        match (choice.license, choice.expression) {
            (Some(license), _) => License::from_descriptor(
                license.id,
                license.name,
                license.url,
                &self.config.evaluator,
            ),
            (None, Some(expression)) => License::from_expression(expression),
            (None, None) => License::from_descriptor(None, None, None, &self.config.evaluator),
        }
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value.ok_or_else(|| SbomDiffError::missing_field(field, "component"))
}

impl SbomParser for CycloneDxParser {
    fn parse_str(&self, content: &str) -> Result<Sbom> {
        let cdx: CycloneDxBom = serde_json::from_str(content)?;
        self.convert_to_sbom(cdx)
    }

    fn format_name(&self) -> &str {
        "CycloneDX"
    }
}

// CycloneDX JSON structures

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CycloneDxBom {
    metadata: Option<CdxMetadata>,
    components: Option<Vec<CdxComponent>>,
    dependencies: Option<Vec<CdxDependency>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxMetadata {
    component: Option<CdxComponent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxComponent {
    #[serde(alias = "bom-ref")]
    bom_ref: Option<String>,
    group: Option<String>,
    name: Option<String>,
    version: Option<String>,
    purl: Option<String>,
    licenses: Option<Vec<CdxLicenseChoice>>,
    external_references: Option<Vec<CdxExternalReference>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxLicenseChoice {
    license: Option<CdxLicense>,
    expression: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxLicense {
    id: Option<String>,
    name: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxExternalReference {
    #[serde(rename = "type")]
    ref_type: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxDependency {
    #[serde(rename = "ref")]
    ref_field: String,
    depends_on: Option<Vec<String>>,
}
