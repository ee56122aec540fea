//! Pipeline orchestration for policy comparison.
//!
//! Shared load → compare → report logic used by the CLI command handlers.

mod compare_stage;
mod output;
mod parse;
mod report_stage;

pub use compare_stage::{build_normalizer, compute_plan_comparison, compute_version_comparison};
pub use output::{auto_detect_format, should_use_color, write_output, OutputTarget};
pub use parse::{
    clauses_from_value, load_clauses, load_document_value, load_plans, plan_label,
    validate_clause_set,
};
pub use report_stage::{output_plan_report, output_version_report};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse an input file
    #[error("Parse failed for {path}: {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: crate::error::PolicyDiffError,
    },

    /// A clause snapshot failed validation
    #[error("Invalid clause snapshot {path}: {source}")]
    InvalidSnapshot {
        path: String,
        #[source]
        source: crate::error::PolicyDiffError,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected (or changes without --fail-on-change)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::CHANGES_DETECTED, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }

    #[test]
    fn test_pipeline_error_display() {
        let err = PipelineError::ParseFailed {
            path: "v1.json".to_string(),
            source: crate::error::PolicyDiffError::validation("bad"),
        };
        assert_eq!(err.to_string(), "Parse failed for v1.json: Validation failed: bad");
    }
}
