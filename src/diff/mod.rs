//! Version diffing, word highlighting and comparison assembly.
//!
//! [`VersionDiffer`] classifies clauses by id into added, removed and
//! modified. [`highlight_modification`] marks the words of a modified clause
//! that the other side lacks. The presentation functions combine both, or
//! lay out normalized plan records side by side.
//!
//! Everything here is pure and safe to call concurrently.

mod engine;
mod highlight;
mod presentation;
mod result;

pub use engine::{diff_versions, VersionDiffer};
pub use highlight::{highlight_modification, HighlightedText, TaggedWord};
pub use presentation::{
    compare_plans, normalize_plans, present_plans, present_versions, FieldRow,
    ModifiedClauseView, PlanColumn, PlanComparison, VersionComparison, COMPARISON_UNAVAILABLE,
};
pub use result::{ChangeType, DiffResult, DiffSummary, ModifiedClause};
