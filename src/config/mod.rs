//! Configuration module for policy-diff.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use policy_diff::config::AppConfig;
//!
//! let config = AppConfig::builder()
//!     .fail_on_change(true)
//!     .highlight(false)
//!     .build();
//!
//! use policy_diff::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.policy-diff.yaml` file in your project root or `~/.config/policy-diff/`:
//!
//! ```yaml
//! output:
//!   format: side-by-side
//! diff:
//!   highlight: true
//! eligibility:
//!   waiting_periods:
//!     - { treatment: maternity, label: Maternity Coverage, days: 730 }
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{DEFAULT_REPORT_WIDTH, MIN_REPORT_WIDTH};
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, DiffOptions, EligibilityConfig,
    NormalizerConfig, OutputConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Documents every option accepted in `.policy-diff.yaml`, for editor
/// validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).expect("schema serialization should not fail")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema();
        for section in ["normalizer", "output", "behavior", "diff", "eligibility"] {
            assert!(schema.contains(section), "missing {section}");
        }
        assert!(schema.contains("waiting_periods"));
    }
}
