//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{plural, render_tokens, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{PlanComparison, VersionComparison, COMPARISON_UNAVAILABLE};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    /// Exclusive words are colored, or wrapped git-word-diff style without color.
    fn marked(&self, tokens: &[crate::diff::TaggedWord], removed: bool) -> String {
        match (self.colored, removed) {
            (true, true) => render_tokens(tokens, "\x1b[1;31m", "\x1b[0m"),
            (true, false) => render_tokens(tokens, "\x1b[1;32m", "\x1b[0m"),
            (false, true) => render_tokens(tokens, "[-", "-]"),
            (false, false) => render_tokens(tokens, "{+", "+}"),
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_version_report(
        &self,
        comparison: &VersionComparison,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let title = config.title.as_deref().unwrap_or("Policy Version Diff");
        lines.push(self.color(title, "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        let old_name = config.metadata.old_path.as_deref().unwrap_or("old");
        let new_name = config.metadata.new_path.as_deref().unwrap_or("new");
        lines.push(format!(
            "{}  {} → {}",
            self.color("Files:", "cyan"),
            old_name,
            new_name
        ));
        lines.push(String::new());

        let summary = &comparison.summary;
        lines.push(self.color("Changes:", "bold"));
        if summary.total_changes == 0 {
            lines.push(format!("  {}", self.color("No clause changes", "dim")));
        }
        if summary.added > 0 {
            lines.push(format!(
                "  {} clause{} added",
                self.color(&format!("+{}", summary.added), "green"),
                plural(summary.added)
            ));
        }
        if summary.removed > 0 {
            lines.push(format!(
                "  {} clause{} removed",
                self.color(&format!("-{}", summary.removed), "red"),
                plural(summary.removed)
            ));
        }
        if summary.modified > 0 {
            lines.push(format!(
                "  {} clause{} modified",
                self.color(&format!("~{}", summary.modified), "yellow"),
                plural(summary.modified)
            ));
        }
        lines.push(format!(
            "  {} unchanged",
            self.color(&format!("={}", summary.unchanged), "dim")
        ));

        if !comparison.added.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Added:", "bold"));
            for clause in &comparison.added {
                lines.push(format!(
                    "  {} {} {}",
                    self.color("+", "green"),
                    clause.clause_id,
                    clause.title
                ));
            }
        }

        if !comparison.removed.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Removed:", "bold"));
            for clause in &comparison.removed {
                lines.push(format!(
                    "  {} {} {}",
                    self.color("-", "red"),
                    clause.clause_id,
                    clause.title
                ));
            }
        }

        if !comparison.modified.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Modified:", "bold"));
            for clause in &comparison.modified {
                lines.push(format!(
                    "  {} {} {}",
                    self.color("~", "yellow"),
                    clause.clause_id,
                    clause.title
                ));
                let (old_line, new_line) = match &clause.highlight {
                    Some(h) => (self.marked(&h.old_tokens, true), self.marked(&h.new_tokens, false)),
                    None => (clause.old_text.clone(), clause.new_text.clone()),
                };
                lines.push(format!("      {} {old_line}", self.color("-", "red")));
                lines.push(format!("      {} {new_line}", self.color("+", "green")));
            }
        }

        Ok(lines.join("\n"))
    }

    fn generate_plan_report(
        &self,
        comparison: &PlanComparison,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let title = config.title.as_deref().unwrap_or("Plan Comparison");
        lines.push(self.color(title, "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        let labels: Vec<&str> = comparison.plans.iter().map(|p| p.label.as_str()).collect();
        lines.push(format!("{}  {}", self.color("Plans:", "cyan"), labels.join(", ")));

        if !comparison.comparison_ready {
            let unavailable: Vec<&str> = comparison.unavailable_plans().collect();
            lines.push(String::new());
            lines.push(format!(
                "{} ({})",
                self.color(COMPARISON_UNAVAILABLE, "red"),
                unavailable.join(", ")
            ));
            return Ok(lines.join("\n"));
        }

        let differing: Vec<_> = comparison.differing_rows().collect();
        lines.push(String::new());
        lines.push(format!(
            "{} {} of {} field{} differ",
            self.color("Differences:", "bold"),
            differing.len(),
            comparison.rows.len(),
            plural(comparison.rows.len())
        ));

        for row in differing {
            lines.push(format!("  {}", self.color(&row.field, "yellow")));
            for (plan, value) in comparison.plans.iter().zip(&row.values) {
                let value = value
                    .as_ref()
                    .map_or_else(|| "-".to_string(), ToString::to_string);
                lines.push(format!("      {}: {value}", plan.label));
            }
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
