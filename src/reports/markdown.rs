//! Markdown report generator.

use super::escape::{escape_markdown_inline, escape_markdown_table, escape_md_opt};
use super::{plural, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{PlanComparison, TaggedWord, VersionComparison, COMPARISON_UNAVAILABLE};
use std::fmt::Write;

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Removed words struck through, added words bold.
fn markdown_tokens(tokens: &[TaggedWord], removed: bool) -> String {
    tokens
        .iter()
        .map(|t| {
            let word = escape_markdown_inline(&t.word);
            match (t.exclusive, removed) {
                (true, true) => format!("~~{word}~~"),
                (true, false) => format!("**{word}**"),
                (false, _) => word,
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl ReportGenerator for MarkdownReporter {
    fn generate_version_report(
        &self,
        comparison: &VersionComparison,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut md = String::new();
        let title = config.title.as_deref().unwrap_or("Policy Version Diff");
        writeln!(md, "# {}\n", escape_markdown_inline(title))?;

        if let (Some(old), Some(new)) = (&config.metadata.old_path, &config.metadata.new_path) {
            writeln!(
                md,
                "**Old:** `{}`  \n**New:** `{}`\n",
                old.replace('`', "'"),
                new.replace('`', "'")
            )?;
        }

        let s = &comparison.summary;
        writeln!(md, "## Summary\n")?;
        writeln!(md, "| Change | Count |")?;
        writeln!(md, "|--------|-------|")?;
        writeln!(md, "| Added | {} |", s.added)?;
        writeln!(md, "| Removed | {} |", s.removed)?;
        writeln!(md, "| Modified | {} |", s.modified)?;
        writeln!(md, "| Unchanged | {} |", s.unchanged)?;
        writeln!(md)?;

        if !comparison.added.is_empty() {
            writeln!(md, "## Added Clauses\n")?;
            writeln!(md, "| Clause | Title | Text |")?;
            writeln!(md, "|--------|-------|------|")?;
            for clause in &comparison.added {
                writeln!(
                    md,
                    "| {} | {} | {} |",
                    escape_markdown_table(clause.clause_id.as_str()),
                    escape_markdown_table(&clause.title),
                    escape_markdown_table(&clause.text)
                )?;
            }
            writeln!(md)?;
        }

        if !comparison.removed.is_empty() {
            writeln!(md, "## Removed Clauses\n")?;
            writeln!(md, "| Clause | Title | Text |")?;
            writeln!(md, "|--------|-------|------|")?;
            for clause in &comparison.removed {
                writeln!(
                    md,
                    "| {} | {} | {} |",
                    escape_markdown_table(clause.clause_id.as_str()),
                    escape_markdown_table(&clause.title),
                    escape_markdown_table(&clause.text)
                )?;
            }
            writeln!(md)?;
        }

        if !comparison.modified.is_empty() {
            writeln!(md, "## Modified Clauses\n")?;
            writeln!(md, "| Clause | Title | Before | After |")?;
            writeln!(md, "|--------|-------|--------|-------|")?;
            for clause in &comparison.modified {
                let (before, after) = match &clause.highlight {
                    Some(h) => (
                        markdown_tokens(&h.old_tokens, true),
                        markdown_tokens(&h.new_tokens, false),
                    ),
                    None => (
                        escape_markdown_table(&clause.old_text),
                        escape_markdown_table(&clause.new_text),
                    ),
                };
                writeln!(
                    md,
                    "| {} | {} | {before} | {after} |",
                    escape_markdown_table(clause.clause_id.as_str()),
                    escape_markdown_table(&clause.title),
                )?;
            }
            writeln!(md)?;
        }

        Ok(md)
    }

    fn generate_plan_report(
        &self,
        comparison: &PlanComparison,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut md = String::new();
        let title = config.title.as_deref().unwrap_or("Plan Comparison");
        writeln!(md, "# {}\n", escape_markdown_inline(title))?;

        if !comparison.comparison_ready {
            let unavailable: Vec<String> = comparison
                .unavailable_plans()
                .map(escape_markdown_inline)
                .collect();
            writeln!(
                md,
                "> **{COMPARISON_UNAVAILABLE}**: {}",
                unavailable.join(", ")
            )?;
            return Ok(md);
        }

        let differing = comparison.differing_rows().count();
        writeln!(
            md,
            "{differing} of {} field{} differ. Differing fields are marked with *.\n",
            comparison.rows.len(),
            plural(comparison.rows.len())
        )?;

        let labels: Vec<String> = comparison
            .plans
            .iter()
            .map(|p| escape_markdown_table(&p.label))
            .collect();
        writeln!(md, "| Field | {} |", labels.join(" | "))?;
        writeln!(
            md,
            "|-------|{}",
            "-------|".repeat(comparison.plans.len())
        )?;
        for row in &comparison.rows {
            let cells: Vec<String> = row
                .values
                .iter()
                .map(|v| escape_md_opt(v.as_ref().map(ToString::to_string).as_deref()))
                .collect();
            let marker = if row.differs { " \\*" } else { "" };
            writeln!(
                md,
                "| {}{marker} | {} |",
                escape_markdown_table(&row.field),
                cells.join(" | ")
            )?;
        }

        Ok(md)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffOptions;
    use crate::diff::{present_plans, present_versions};
    use crate::model::Clause;
    use crate::normalize::normalize_fields;
    use serde_json::json;

    #[test]
    fn test_version_markdown() {
        let old = vec![Clause::new("3.1", "Room Rent", "capped at 2000 | day")];
        let new = vec![Clause::new("3.1", "Room Rent", "capped at 3500 | day")];
        let comparison = present_versions(&old, &new, &DiffOptions::default());
        let md = MarkdownReporter::new()
            .generate_version_report(&comparison, &ReportConfig::for_versions("v1.json", "v2.json"))
            .unwrap();

        assert!(md.contains("| Modified | 1 |"));
        assert!(md.contains("~~2000~~"));
        assert!(md.contains("**3500**"));
        assert!(md.contains("~~2000~~ \\| day"));
        assert!(!md.contains("\\\\|"));
        assert!(md.contains("**Old:** `v1.json`"));
    }

    #[test]
    fn test_version_markdown_without_highlight() {
        let old = vec![Clause::new("3.1", "Room Rent", "a|b")];
        let new = vec![Clause::new("3.1", "Room Rent", "a|c")];
        let comparison = present_versions(&old, &new, &DiffOptions { highlight: false });
        let md = MarkdownReporter::new()
            .generate_version_report(&comparison, &ReportConfig::default())
            .unwrap();
        assert!(md.contains("| 3.1 | Room Rent | a\\|b | a\\|c |"));
    }

    #[test]
    fn test_plan_markdown_unavailable_snapshot() {
        let plans = vec![("Broken".to_string(), None)];
        let md = MarkdownReporter::new()
            .generate_plan_report(&present_plans(&plans), &ReportConfig::default())
            .unwrap();
        insta::assert_snapshot!(md, @r"
        # Plan Comparison

        > **comparison data unavailable**: Broken
        ");
    }

    #[test]
    fn test_plan_markdown_table() {
        let plans = vec![
            ("Gold".to_string(), normalize_fields(&json!({"insurer": "Acme"}))),
            ("Silver".to_string(), normalize_fields(&json!({"insurer": "Zen"}))),
        ];
        let md = MarkdownReporter::new()
            .generate_plan_report(&present_plans(&plans), &ReportConfig::default())
            .unwrap();
        assert!(md.contains("| Field | Gold | Silver |"));
        assert!(md.contains("| insurer \\* | Acme | Zen |"));
        assert!(md.contains("| maternity | Not covered | Not covered |"));
    }
}
