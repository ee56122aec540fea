//! **Clause-level version diffs and field-by-field plan comparison for
//! insurance policy documents.**
//!
//! `policy-diff` answers two questions about policy documents:
//!
//! - *What changed between two versions of the same policy?* Clauses are
//!   matched by id and classified as added, removed or modified; modified
//!   clauses carry a word-level highlight of what each side has that the
//!   other lacks.
//! - *How do these plans compare?* Arbitrarily shaped policy documents are
//!   normalized into a flat [`ComparisonRecord`] of well-known fields
//!   (insurer, waiting periods, room rent, co-payment, ...) so several plans
//!   can be laid out side by side.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Clause`], [`ClauseId`], [`ClauseIndex`], the typed
//!   [`Document`] tree and the normalized [`ComparisonRecord`].
//! - **[`normalize`]**: the [`FieldNormalizer`], driven by a configurable
//!   [`FieldSchema`]. Malformed documents normalize to `None` instead of
//!   failing.
//! - **[`diff`]**: [`VersionDiffer`], [`highlight_modification`] and the
//!   presentation functions that assemble both into report-ready models.
//! - **[`eligibility`]**: waiting-period checks for a treatment kind.
//! - **[`reports`]**: JSON, summary, side-by-side and Markdown renderers.
//! - **[`pipeline`]**: file loading and report routing used by the CLI.
//!
//! ## Diffing Two Versions
//!
//! ```
//! use policy_diff::{diff_versions, Clause};
//!
//! let v1 = vec![
//!     Clause::new("4.1", "Initial Waiting Period", "30 days from inception"),
//!     Clause::new("6.1", "Maternity", "Covered after 24 months"),
//! ];
//! let v2 = vec![
//!     Clause::new("4.1", "Initial Waiting Period", "15 days from inception"),
//!     Clause::new("6.5", "Mental Health", "Covered"),
//! ];
//!
//! let result = diff_versions(&v1, &v2);
//! assert_eq!(result.added[0].clause_id.as_str(), "6.5");
//! assert_eq!(result.removed[0].clause_id.as_str(), "6.1");
//! assert_eq!(result.modified[0].new_text, "15 days from inception");
//! ```
//!
//! ## Normalizing a Plan
//!
//! ```
//! use policy_diff::normalize_fields;
//! use serde_json::json;
//!
//! let record = normalize_fields(&json!({
//!     "policy": {
//!         "insurer": "Acme Health",
//!         "sections": [{"title": "Room Rent Limit", "content": "1% of sum insured"}]
//!     }
//! }))
//! .expect("well-formed document");
//!
//! assert_eq!(record.text("insurer"), Some("Acme Health"));
//! assert_eq!(record.text("room_rent"), Some("1% of sum insured"));
//! assert_eq!(record.text("maternity"), Some("Not covered"));
//!
//! // Structurally broken documents are not comparison-ready.
//! assert!(normalize_fields(&json!({"sections": 3})).is_none());
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the `policy-diff` library crate. The binary
//! exposes the same operations as `diff`, `compare`, `normalize`, `validate`
//! and `eligibility` subcommands.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![cfg_attr(not(test), warn(clippy::unwrap_used))]
#![allow(
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    // `old`/`new` pairs are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod eligibility;
pub mod error;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, DiffOptions};
pub use config::{BehaviorConfig, EligibilityConfig, NormalizerConfig, OutputConfig};
pub use config::{ConfigError, Validatable};
pub use diff::{
    diff_versions, highlight_modification, present_plans, present_versions, DiffResult,
    HighlightedText, PlanComparison, VersionComparison, VersionDiffer,
};
pub use eligibility::{check_eligibility, EligibilityOutcome, WaitingPeriodTable};
pub use error::{ErrorContext, OptionContext, PolicyDiffError, Result};
pub use model::{Clause, ClauseId, ClauseIndex, ComparisonRecord, Document, FieldValue};
pub use normalize::{normalize_fields, FieldNormalizer, FieldSchema};
pub use reports::{ReportFormat, ReportGenerator};
