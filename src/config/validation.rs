//! Configuration validation for policy-diff.

use super::defaults::MIN_REPORT_WIDTH;
use super::types::{
    AppConfig, BehaviorConfig, DiffOptions, EligibilityConfig, NormalizerConfig, OutputConfig,
};
use std::collections::HashSet;

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

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
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

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.normalizer.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors.extend(self.diff.validate());
        errors.extend(self.eligibility.validate());
        errors
    }
}

impl Validatable for NormalizerConfig {
    fn validate(&self) -> Vec<ConfigError> {
        match &self.schema_file {
            Some(path) if !path.exists() => vec![ConfigError::new(
                "normalizer.schema_file",
                format!("Schema file does not exist: {}", path.display()),
            )],
            _ => Vec::new(),
        }
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(parent) = self.file.as_deref().and_then(std::path::Path::parent) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError::new(
                    "output.file",
                    format!("Parent directory does not exist: {}", parent.display()),
                ));
            }
        }

        if self.width < MIN_REPORT_WIDTH {
            errors.push(ConfigError::new(
                "output.width",
                format!(
                    "Width must be at least {MIN_REPORT_WIDTH}, got {}",
                    self.width
                ),
            ));
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for DiffOptions {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for EligibilityConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();
        for (i, period) in self.waiting_periods.iter().enumerate() {
            let key = period.treatment.trim().to_lowercase();
            if key.is_empty() {
                errors.push(ConfigError::new(
                    format!("eligibility.waiting_periods[{i}].treatment"),
                    "Treatment key must not be empty",
                ));
            } else if !seen.insert(key) {
                errors.push(ConfigError::new(
                    format!("eligibility.waiting_periods[{i}].treatment"),
                    format!("Duplicate treatment '{}'", period.treatment),
                ));
            }
        }
        errors
    }
}
