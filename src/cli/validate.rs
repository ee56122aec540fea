//! Validate command handler.
//!
//! Implements the `validate` subcommand: checks that a clause snapshot can be
//! diffed (unique ids) and flags ids that are not dotted-numeric.

use crate::error::PolicyDiffError;
use crate::pipeline::{
    exit_codes, load_clauses, validate_clause_set, write_output, OutputTarget, PipelineError,
};
use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Validation outcome for one snapshot.
#[derive(Debug, Serialize)]
struct ValidationReport {
    path: String,
    clauses: usize,
    valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    duplicate_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    nonstandard_ids: Vec<String>,
}

impl ValidationReport {
    fn to_text(&self) -> String {
        let mut lines = vec![format!("{}: {} clauses", self.path, self.clauses)];
        if !self.duplicate_ids.is_empty() {
            lines.push(format!("  duplicate ids: {}", self.duplicate_ids.join(", ")));
        }
        if !self.nonstandard_ids.is_empty() {
            lines.push(format!(
                "  ids not in dotted numeric form: {}",
                self.nonstandard_ids.join(", ")
            ));
        }
        lines.push(if self.valid { "  valid" } else { "  INVALID" }.to_string());
        lines.join("\n")
    }
}

/// Run the validate command, returning `ERROR` for an invalid clause set.
pub fn run_validate(path: &Path, json: bool, output_file: Option<PathBuf>) -> Result<i32> {
    let clauses = load_clauses(path, true).map_err(|source| PipelineError::ParseFailed {
        path: path.display().to_string(),
        source,
    })?;

    let mut report = ValidationReport {
        path: path.display().to_string(),
        clauses: clauses.len(),
        valid: true,
        duplicate_ids: Vec::new(),
        nonstandard_ids: Vec::new(),
    };

    match validate_clause_set(&clauses) {
        Ok(nonstandard) => {
            for id in &nonstandard {
                tracing::warn!("Clause id '{id}' is not in dotted numeric form");
            }
            report.nonstandard_ids = nonstandard.iter().map(ToString::to_string).collect();
        }
        Err(PolicyDiffError::InvalidClauseSet { duplicates }) => {
            report.valid = false;
            report.duplicate_ids = duplicates.iter().map(ToString::to_string).collect();
            tracing::warn!("Duplicate clause ids: {}", report.duplicate_ids.join(", "));
        }
        Err(other) => {
            return Err(PipelineError::InvalidSnapshot {
                path: report.path,
                source: other,
            }
            .into());
        }
    }

    let content = if json {
        serde_json::to_string_pretty(&report)?
    } else {
        report.to_text()
    };
    write_output(&content, &OutputTarget::from_option(output_file), true)?;

    Ok(if report.valid {
        exit_codes::SUCCESS
    } else {
        exit_codes::ERROR
    })
}
