//! Report output stage.
//!
//! Resolves the effective format and color mode, renders through the
//! matching [`ReportGenerator`](crate::reports::ReportGenerator) and writes
//! to stdout or the configured file.

use crate::config::AppConfig;
use crate::diff::{PlanComparison, VersionComparison};
use crate::reports::{create_reporter_with_options, ReportConfig, ReportGenerator};
use anyhow::{Context, Result};
use std::path::Path;

use super::{auto_detect_format, should_use_color, write_output, OutputTarget};

fn reporter_for(config: &AppConfig, target: &OutputTarget) -> Box<dyn ReportGenerator> {
    let format = auto_detect_format(config.output.format, target);
    let use_color = should_use_color(config.output.no_color, target);
    create_reporter_with_options(format, use_color, config.output.width)
}

/// Render and write a version diff report.
pub fn output_version_report(
    config: &AppConfig,
    comparison: &VersionComparison,
    old_path: &Path,
    new_path: &Path,
) -> Result<()> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let reporter = reporter_for(config, &target);
    let report_config = ReportConfig::for_versions(
        old_path.display().to_string(),
        new_path.display().to_string(),
    );
    let report = reporter
        .generate_version_report(comparison, &report_config)
        .context("Failed to generate version report")?;
    write_output(&report, &target, config.behavior.quiet)
}

/// Render and write a plan comparison report.
pub fn output_plan_report(config: &AppConfig, comparison: &PlanComparison) -> Result<()> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let reporter = reporter_for(config, &target);
    let report = reporter
        .generate_plan_report(comparison, &ReportConfig::default())
        .context("Failed to generate plan report")?;
    write_output(&report, &target, config.behavior.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffOptions;
    use crate::diff::present_versions;
    use crate::model::Clause;
    use crate::reports::ReportFormat;

    #[test]
    fn test_version_report_written_as_json_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("diff.json");
        let config = AppConfig::builder()
            .output_file(Some(out.clone()))
            .quiet(true)
            .build();
        assert_eq!(config.output.format, ReportFormat::Auto);

        let old = vec![Clause::new("1", "Scope", "All")];
        let new = vec![Clause::new("1", "Scope", "Most")];
        let comparison = present_versions(&old, &new, &DiffOptions::default());
        output_version_report(&config, &comparison, Path::new("v1"), Path::new("v2")).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(written["summary"]["modified"], 1);
        assert_eq!(written["metadata"]["new_path"], "v2");
    }
}
