//! Unified error types for sbom-tree-diff.
//!
//! Every fatal condition of a diff run is reported through [`SbomDiffError`]:
//! malformed documents surface from parsing and graph construction, a root
//! mismatch surfaces from the differ. Non-fatal degradations (missing license
//! arrays, non-semver versions, ...) are not errors and never appear here.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sbom-tree-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SbomDiffError {
    /// Errors while reading an SBOM document or wiring its dependency graph
    #[error("Failed to parse SBOM: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors raised by the tree differ
    #[error("Diff computation failed: {context}")]
    Diff {
        context: String,
        #[source]
        source: DiffErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Unresolved reference '{reference}' declared by '{dependent}'")]
    UnresolvedReference { reference: String, dependent: String },
}

/// Specific diff error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DiffErrorKind {
    #[error("SBOMs describe different projects. Base: {base}, head: {comparing}")]
    ProjectMismatch { base: String, comparing: String },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for sbom-tree-diff operations
pub type Result<T> = std::result::Result<T, SbomDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl SbomDiffError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::parse(
            "missing required field",
            ParseErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create a parse error for a dependency declaration pointing nowhere
    pub fn unresolved_reference(reference: impl Into<String>, dependent: impl Into<String>) -> Self {
        Self::parse(
            "building dependency graph",
            ParseErrorKind::UnresolvedReference {
                reference: reference.into(),
                dependent: dependent.into(),
            },
        )
    }

    /// Create a diff error for two SBOMs with different root components
    pub fn project_mismatch(base: impl Into<String>, comparing: impl Into<String>) -> Self {
        Self::diff(
            "cannot compare SBOMs",
            DiffErrorKind::ProjectMismatch {
                base: base.into(),
                comparing: comparing.into(),
            },
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a diff error
    pub fn diff(context: impl Into<String>, source: DiffErrorKind) -> Self {
        Self::Diff {
            context: context.into(),
            source,
        }
    }

    /// Whether this error was caused by diffing two unrelated projects
    #[must_use]
    pub const fn is_project_mismatch(&self) -> bool {
        matches!(
            self,
            Self::Diff {
                source: DiffErrorKind::ProjectMismatch { .. },
                ..
            }
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for SbomDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for SbomDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context, so a
/// failure deep inside the parser reads like
/// `"parsing base SBOM: component #3: missing required field"`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (only evaluated on the error path).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<SbomDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: SbomDiffError, new_ctx: &str) -> SbomDiffError {
    match err {
        SbomDiffError::Parse {
            context: existing,
            source,
        } => SbomDiffError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SbomDiffError::Diff {
            context: existing,
            source,
        } => SbomDiffError::Diff {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SbomDiffError::Io {
            path,
            message,
            source,
        } => SbomDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        SbomDiffError::Config(msg) => SbomDiffError::Config(chain_context(new_ctx, &msg)),
        SbomDiffError::Validation(msg) => SbomDiffError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SbomDiffError::missing_field("group", "component 'spring-core'");
        let display = err.to_string();
        assert!(
            display.contains("parse") || display.contains("SBOM"),
            "Error message should mention parsing or SBOM: {}",
            display
        );

        let err = SbomDiffError::project_mismatch("a:b:1", "c:d:1");
        assert!(err.to_string().contains("cannot compare"));
        assert!(err.is_project_mismatch());
    }

    #[test]
    fn test_source_carries_details() {
        use std::error::Error as _;

        let err = SbomDiffError::unresolved_reference("pkg:maven/x/y@1", "root");
        let source = err.source().expect("parse errors carry a source");
        let text = source.to_string();
        assert!(text.contains("pkg:maven/x/y@1"));
        assert!(text.contains("root"));
        assert!(!err.is_project_mismatch());
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = SbomDiffError::io("/path/to/bom.json", io_err);

        assert!(err.to_string().contains("/path/to/bom.json"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(SbomDiffError::missing_field("purl", "component"))
        }

        fn middle() -> Result<()> {
            inner().context("component #3")
        }

        fn outer() -> Result<()> {
            middle().context("parsing base SBOM")
        }

        match outer() {
            Err(SbomDiffError::Parse { context, .. }) => {
                assert_eq!(
                    context,
                    "parsing base SBOM: component #3: missing required field"
                );
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(SbomDiffError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_json_error_conversion() {
        let err: SbomDiffError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(
            err,
            SbomDiffError::Parse {
                source: ParseErrorKind::InvalidJson(_),
                ..
            }
        ));
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
        assert_eq!(
            chain_context("outer", "middle: inner"),
            "outer: middle: inner"
        );
    }
}
