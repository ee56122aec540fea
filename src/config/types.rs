//! Configuration types for policy-diff operations.

use super::defaults::DEFAULT_REPORT_WIDTH;
use crate::eligibility::{
    default_waiting_periods, WaitingPeriod, WaitingPeriodTable, DEFAULT_WAITING_DAYS,
};
use crate::normalize::FieldSchema;
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Field normalizer configuration
    pub normalizer: NormalizerConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
    /// Version diff presentation options
    pub diff: DiffOptions,
    /// Waiting periods for eligibility checks
    pub eligibility: EligibilityConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Toggle word highlighting of modified clauses.
    pub const fn highlight(mut self, highlight: bool) -> Self {
        self.config.diff.highlight = highlight;
        self
    }

    /// Use a field schema file instead of the built-in table.
    pub fn schema_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.normalizer.schema_file = file;
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Field normalizer configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NormalizerConfig {
    /// YAML field schema replacing the built-in field table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_file: Option<PathBuf>,
}

impl NormalizerConfig {
    /// The configured field schema, or the built-in one.
    pub fn field_schema(&self) -> crate::error::Result<FieldSchema> {
        match &self.schema_file {
            Some(path) => FieldSchema::from_file(path),
            None => Ok(FieldSchema::default()),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// Terminal width for side-by-side output
    #[schemars(range(min = 40))]
    pub width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Auto,
            file: None,
            no_color: false,
            width: DEFAULT_REPORT_WIDTH,
        }
    }
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any clause changed
    pub fail_on_change: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

/// Version diff presentation options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiffOptions {
    /// Attach word-level highlights to modified clauses
    pub highlight: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self { highlight: true }
    }
}

/// Waiting-period table for eligibility checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EligibilityConfig {
    /// Days required for treatments missing from the table
    pub default_waiting_days: u32,
    /// Per-treatment waiting periods
    pub waiting_periods: Vec<WaitingPeriod>,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            default_waiting_days: DEFAULT_WAITING_DAYS,
            waiting_periods: default_waiting_periods(),
        }
    }
}

impl EligibilityConfig {
    #[must_use]
    pub fn table(&self) -> WaitingPeriodTable {
        WaitingPeriodTable::new(self.waiting_periods.clone(), self.default_waiting_days)
    }
}
