//! Assembly of comparison results for the presentation layer.
//!
//! Two shapes are produced: a version comparison (clause diff plus
//! per-clause word highlights and counts) and a plan comparison (normalized
//! field records laid out as rows).

use super::{highlight_modification, DiffSummary, HighlightedText, VersionDiffer};
use crate::config::DiffOptions;
use crate::model::{Clause, ClauseId, ComparisonRecord, FieldValue};
use crate::normalize::FieldNormalizer;
use indexmap::IndexSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message shown instead of a partial comparison.
pub const COMPARISON_UNAVAILABLE: &str = "comparison data unavailable";

/// A version diff ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct VersionComparison {
    pub summary: DiffSummary,
    pub added: Vec<Clause>,
    pub removed: Vec<Clause>,
    pub modified: Vec<ModifiedClauseView>,
}

impl VersionComparison {
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.summary.total_changes > 0
    }
}

/// A modified clause with optional word highlights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedClauseView {
    pub clause_id: ClauseId,
    pub title: String,
    pub old_text: String,
    pub new_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HighlightedText>,
}

/// Diff two versions and attach highlights and counts.
pub fn present_versions(old: &[Clause], new: &[Clause], options: &DiffOptions) -> VersionComparison {
    let (result, summary) = VersionDiffer::new(old, new).diff_with_summary();

    let modified = result
        .modified
        .into_iter()
        .map(|m| ModifiedClauseView {
            highlight: options
                .highlight
                .then(|| highlight_modification(&m.old_text, &m.new_text)),
            clause_id: m.clause_id,
            title: m.title,
            old_text: m.old_text,
            new_text: m.new_text,
        })
        .collect();

    VersionComparison {
        summary,
        added: result.added,
        removed: result.removed,
        modified,
    }
}

/// One plan column in a side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanColumn {
    pub label: String,
    /// Whether the plan's document produced a record
    pub ready: bool,
}

/// One comparison field across all plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRow {
    pub field: String,
    /// One cell per plan; `None` for plans that are not comparison-ready
    pub values: Vec<Option<FieldValue>>,
    /// Whether the ready plans disagree on this field
    pub differs: bool,
}

/// Normalized fields of several plans, side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct PlanComparison {
    pub plans: Vec<PlanColumn>,
    pub rows: Vec<FieldRow>,
    /// False when any plan is not comparison-ready
    pub comparison_ready: bool,
}

impl PlanComparison {
    /// Labels of plans whose documents could not be normalized.
    pub fn unavailable_plans(&self) -> impl Iterator<Item = &str> {
        self.plans
            .iter()
            .filter(|p| !p.ready)
            .map(|p| p.label.as_str())
    }

    /// Rows where the plans disagree.
    pub fn differing_rows(&self) -> impl Iterator<Item = &FieldRow> {
        self.rows.iter().filter(|r| r.differs)
    }
}

/// Lay out already-normalized records as comparison rows.
///
/// Rows follow the field order of the first ready record; fields only some
/// records carry are appended in first-seen order.
pub fn present_plans(plans: &[(String, Option<ComparisonRecord>)]) -> PlanComparison {
    let columns: Vec<PlanColumn> = plans
        .iter()
        .map(|(label, record)| PlanColumn {
            label: label.clone(),
            ready: record.is_some(),
        })
        .collect();
    let comparison_ready = columns.iter().all(|c| c.ready);

    let fields: IndexSet<&str> = plans
        .iter()
        .filter_map(|(_, record)| record.as_ref())
        .flat_map(ComparisonRecord::field_names)
        .collect();

    let rows = fields
        .into_iter()
        .map(|field| {
            let values: Vec<Option<FieldValue>> = plans
                .iter()
                .map(|(_, record)| record.as_ref().and_then(|r| r.get(field)).cloned())
                .collect();
            let differs = comparison_ready && values.windows(2).any(|pair| pair[0] != pair[1]);
            FieldRow {
                field: field.to_string(),
                values,
                differs,
            }
        })
        .collect();

    PlanComparison {
        plans: columns,
        rows,
        comparison_ready,
    }
}

/// Normalize several documents in parallel, keeping input order.
pub fn normalize_plans(
    normalizer: &FieldNormalizer,
    documents: &[(String, Value)],
) -> Vec<(String, Option<ComparisonRecord>)> {
    documents
        .par_iter()
        .map(|(label, document)| (label.clone(), normalizer.normalize(document)))
        .collect()
}

/// Normalize and lay out several plan documents.
pub fn compare_plans(normalizer: &FieldNormalizer, documents: &[(String, Value)]) -> PlanComparison {
    present_plans(&normalize_plans(normalizer, documents))
}
