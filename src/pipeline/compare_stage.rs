//! Comparison stage.
//!
//! Runs the pure core on loaded inputs: version diff with highlights, or
//! normalization and layout of several plans.

use crate::config::{AppConfig, DiffOptions};
use crate::diff::{compare_plans, present_versions, PlanComparison, VersionComparison};
use crate::error::Result;
use crate::model::Clause;
use crate::normalize::FieldNormalizer;
use serde_json::Value;

/// Diff two clause snapshots and build the presentation model.
pub fn compute_version_comparison(
    old: &[Clause],
    new: &[Clause],
    options: &DiffOptions,
    quiet: bool,
) -> VersionComparison {
    if !quiet {
        tracing::info!("Diffing {} old clauses against {} new clauses", old.len(), new.len());
    }
    let comparison = present_versions(old, new, options);
    if !quiet {
        let s = &comparison.summary;
        tracing::info!(
            "Clause changes: {} total ({} added, {} removed, {} modified)",
            s.total_changes,
            s.added,
            s.removed,
            s.modified
        );
    }
    comparison
}

/// Build the normalizer configured for this run.
pub fn build_normalizer(config: &AppConfig) -> Result<FieldNormalizer> {
    let schema = config.normalizer.field_schema()?;
    Ok(FieldNormalizer::new(schema))
}

/// Normalize and compare several plan documents.
pub fn compute_plan_comparison(
    normalizer: &FieldNormalizer,
    plans: &[(String, Value)],
    quiet: bool,
) -> PlanComparison {
    let comparison = compare_plans(normalizer, plans);
    if !quiet {
        if comparison.comparison_ready {
            tracing::info!(
                "{} of {} fields differ across {} plans",
                comparison.differing_rows().count(),
                comparison.rows.len(),
                comparison.plans.len()
            );
        } else {
            tracing::warn!(
                "Comparison unavailable; malformed plans: {}",
                comparison.unavailable_plans().collect::<Vec<_>>().join(", ")
            );
        }
    }
    comparison
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_version_comparison_counts() {
        let old = vec![Clause::new("1", "Scope", "All"), Clause::new("2", "Fees", "10")];
        let new = vec![Clause::new("1", "Scope", "All"), Clause::new("2", "Fees", "12")];
        let comparison = compute_version_comparison(&old, &new, &DiffOptions::default(), true);
        assert_eq!(comparison.summary.modified, 1);
        assert_eq!(comparison.summary.unchanged, 1);
    }

    #[test]
    fn test_default_normalizer_from_config() {
        let normalizer = build_normalizer(&AppConfig::default()).unwrap();
        let plans = vec![
            ("a".to_string(), json!({"insurer": "Acme"})),
            ("b".to_string(), json!([])),
        ];
        let comparison = compute_plan_comparison(&normalizer, &plans, true);
        assert!(!comparison.comparison_ready);
        assert_eq!(comparison.unavailable_plans().collect::<Vec<_>>(), vec!["b"]);
    }
}
