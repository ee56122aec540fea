//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two versions of a policy's
//! clause set.

use crate::config::AppConfig;
use crate::diff::VersionComparison;
use crate::error::PolicyDiffError;
use crate::model::{Clause, ClauseId};
use crate::pipeline::{
    compute_version_comparison, exit_codes, load_clauses, output_version_report,
    validate_clause_set, PipelineError,
};
use anyhow::Result;
use std::path::Path;

/// Run the diff command, returning the desired exit code.
///
/// Duplicate clause ids are reported as a warning; the diff still runs with
/// the last occurrence of each id. Use `validate` to reject such snapshots.
pub fn run_diff(config: &AppConfig, old_path: &Path, new_path: &Path) -> Result<i32> {
    let quiet = config.behavior.quiet;

    let old = load_snapshot(old_path, quiet)?;
    let new = load_snapshot(new_path, quiet)?;

    let comparison = compute_version_comparison(&old, &new, &config.diff, quiet);
    let exit_code = determine_exit_code(config, &comparison);

    output_version_report(config, &comparison, old_path, new_path)
        .map_err(|source| PipelineError::ReportFailed { source })?;

    Ok(exit_code)
}

fn load_snapshot(path: &Path, quiet: bool) -> Result<Vec<Clause>> {
    let clauses = load_clauses(path, quiet).map_err(|source| PipelineError::ParseFailed {
        path: path.display().to_string(),
        source,
    })?;
    if let Err(PolicyDiffError::InvalidClauseSet { duplicates }) = validate_clause_set(&clauses) {
        let ids: Vec<&str> = duplicates.iter().map(ClauseId::as_str).collect();
        tracing::warn!(
            "{} repeats clause ids {}; the last occurrence of each is compared",
            path.display(),
            ids.join(", ")
        );
    }
    Ok(clauses)
}

/// Determine the appropriate exit code based on diff results and config flags.
const fn determine_exit_code(config: &AppConfig, comparison: &VersionComparison) -> i32 {
    if config.behavior.fail_on_change && comparison.summary.total_changes > 0 {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}
