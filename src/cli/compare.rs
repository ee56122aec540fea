//! Compare command handler.
//!
//! Implements the `compare` subcommand: normalize two or more plan documents
//! and show their fields side by side.

use crate::config::AppConfig;
use crate::pipeline::{
    build_normalizer, compute_plan_comparison, exit_codes, load_plans, output_plan_report,
    PipelineError,
};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

/// Run the compare command, returning the desired exit code.
///
/// With `fail_on_change`, exits with `CHANGES_DETECTED` when any field
/// differs. A comparison with a malformed plan is reported, not failed.
pub fn run_compare(config: &AppConfig, paths: &[PathBuf]) -> Result<i32> {
    if paths.len() < 2 {
        bail!("compare needs at least two plan documents, got {}", paths.len());
    }
    let quiet = config.behavior.quiet;

    let normalizer = build_normalizer(config).context("Failed to load field schema")?;
    let plans = load_plans(paths, quiet).map_err(|source| PipelineError::ParseFailed {
        path: paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
        source,
    })?;

    let comparison = compute_plan_comparison(&normalizer, &plans, quiet);
    output_plan_report(config, &comparison)
        .map_err(|source| PipelineError::ReportFailed { source })?;

    let differs = comparison.differing_rows().next().is_some();
    if config.behavior.fail_on_change && differs {
        return Ok(exit_codes::CHANGES_DETECTED);
    }
    Ok(exit_codes::SUCCESS)
}
