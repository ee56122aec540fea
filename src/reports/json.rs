//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{PlanComparison, VersionComparison, COMPARISON_UNAVAILABLE};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_version_report(
        &self,
        comparison: &VersionComparison,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let report = JsonVersionReport {
            metadata: JsonReportMetadata::from_config(config),
            summary: &comparison.summary,
            added: &comparison.added,
            removed: &comparison.removed,
            modified: &comparison.modified,
        };
        self.to_json(&report)
    }

    fn generate_plan_report(
        &self,
        comparison: &PlanComparison,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let report = JsonPlanReport {
            metadata: JsonReportMetadata::from_config(config),
            message: (!comparison.comparison_ready).then_some(COMPARISON_UNAVAILABLE),
            comparison,
        };
        self.to_json(&report)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON report structures

#[derive(Serialize)]
struct JsonVersionReport<'a> {
    metadata: JsonReportMetadata,
    summary: &'a crate::diff::DiffSummary,
    added: &'a [crate::model::Clause],
    removed: &'a [crate::model::Clause],
    modified: &'a [crate::diff::ModifiedClauseView],
}

#[derive(Serialize)]
struct JsonPlanReport<'a> {
    metadata: JsonReportMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(flatten)]
    comparison: &'a PlanComparison,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    old_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_path: Option<String>,
}

impl JsonReportMetadata {
    fn from_config(config: &ReportConfig) -> Self {
        Self {
            tool: ToolInfo {
                name: "policy-diff".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            generated_at: Utc::now().to_rfc3339(),
            title: config.title.clone(),
            old_path: config.metadata.old_path.clone(),
            new_path: config.metadata.new_path.clone(),
        }
    }
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}
