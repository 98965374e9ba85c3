//! Configuration validation.
//!
//! Provides the validation trait and its implementations for configuration
//! types.

use super::types::DiffConfig;
use crate::model::LicenseList;
use regex::Regex;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref pattern) = self.primary_party_group_matcher {
            if let Err(e) = Regex::new(pattern) {
                errors.push(ConfigError {
                    field: "primary_party_group_matcher".to_string(),
                    message: format!("Invalid regular expression '{pattern}': {e}"),
                });
            }
        }

        errors.extend(self.licenses.validate());
        errors
    }
}

impl Validatable for LicenseList {
    fn validate(&self) -> Vec<ConfigError> {
        let lists = [
            ("go", &self.go),
            ("caution", &self.caution),
            ("stop", &self.stop),
        ];

        let mut errors = Vec::new();
        for (name, ids) in lists {
            for (i, id) in ids.iter().enumerate() {
                if id.trim().is_empty() {
                    errors.push(ConfigError {
                        field: format!("licenses.{name}[{i}]"),
                        message: "License id must not be blank".to_string(),
                    });
                } else if id.trim() != id {
                    errors.push(ConfigError {
                        field: format!("licenses.{name}[{i}]"),
                        message: format!(
                            "License id '{id}' has surrounding whitespace and will never match"
                        ),
                    });
                }
            }
        }
        errors
    }
}

// ============================================================================
// Tests
// ============================================================================
