//! Side-by-side column output for terminals.

use super::{render_tokens, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::config::{DEFAULT_REPORT_WIDTH, MIN_REPORT_WIDTH};
use crate::diff::{
    ChangeType, PlanComparison, TaggedWord, VersionComparison, COMPARISON_UNAVAILABLE,
};
use std::fmt::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// ANSI color codes
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

/// Side-by-side reporter
pub struct SideBySideReporter {
    /// Total output width in columns
    width: usize,
    /// Use colors
    use_colors: bool,
}

impl SideBySideReporter {
    /// Create a new side-by-side reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            width: DEFAULT_REPORT_WIDTH,
            use_colors: true,
        }
    }

    /// Set terminal width, clamped to the narrowest supported layout
    #[must_use]
    pub const fn width(mut self, width: usize) -> Self {
        self.width = if width < MIN_REPORT_WIDTH {
            MIN_REPORT_WIDTH
        } else {
            width
        };
        self
    }

    /// Disable colors
    #[must_use]
    pub const fn no_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    const fn col(&self, code: &'static str) -> &'static str {
        if self.use_colors {
            code
        } else {
            ""
        }
    }

    fn half_width(&self) -> usize {
        (self.width - 3) / 2
    }

    fn format_header(&self, left: &str, right: &str) -> String {
        let half = self.half_width();
        format!(
            "{}{}{} │ {}{}{}\n",
            self.col(colors::BOLD),
            pad(&truncate(left, half), half),
            self.col(colors::RESET),
            self.col(colors::BOLD),
            truncate(right, half),
            self.col(colors::RESET),
        )
    }

    fn format_section_header(&self, title: &str) -> String {
        format!(
            "\n{}{}═══ {} {}{}\n",
            self.col(colors::CYAN),
            self.col(colors::BOLD),
            title,
            "═".repeat(self.width.saturating_sub(title.width() + 5)),
            self.col(colors::RESET),
        )
    }

    /// One row per wrapped line; empty side shows a dim placeholder.
    fn format_rows(
        &self,
        left: Option<&str>,
        right: Option<&str>,
        change_type: ChangeType,
    ) -> String {
        let half = self.half_width();
        let (left_color, right_color) = match change_type {
            ChangeType::Removed => (colors::RED, colors::DIM),
            ChangeType::Added => (colors::DIM, colors::GREEN),
            ChangeType::Modified => (colors::YELLOW, colors::YELLOW),
        };
        let left_lines = left.map_or_else(|| vec!["...".to_string()], |t| wrap(t, half));
        let right_lines = right.map_or_else(|| vec!["...".to_string()], |t| wrap(t, half));

        let mut out = String::new();
        for i in 0..left_lines.len().max(right_lines.len()) {
            let l = left_lines.get(i).map_or("", String::as_str);
            let r = right_lines.get(i).map_or("", String::as_str);
            let _ = writeln!(
                out,
                "{}{}{} │ {}{}{}",
                self.col(left_color),
                pad(l, half),
                self.col(colors::RESET),
                self.col(right_color),
                r,
                self.col(colors::RESET),
            );
        }
        out
    }
}

/// Exclusive words marked with brackets; ANSI codes inside a column would
/// break the width math.
fn side_text(tokens: &[TaggedWord], removed: bool) -> String {
    if removed {
        render_tokens(tokens, "[-", "-]")
    } else {
        render_tokens(tokens, "{+", "+}")
    }
}

impl Default for SideBySideReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SideBySideReporter {
    fn generate_version_report(
        &self,
        comparison: &VersionComparison,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut out = String::new();
        let old_name = config.metadata.old_path.as_deref().unwrap_or("old");
        let new_name = config.metadata.new_path.as_deref().unwrap_or("new");
        out.push_str(&self.format_header(old_name, new_name));

        if !comparison.modified.is_empty() {
            out.push_str(&self.format_section_header("Modified"));
            for clause in &comparison.modified {
                let heading = format!("{} {}", clause.clause_id, clause.title);
                out.push_str(&self.format_header(&heading, &heading));
                let (left, right) = match &clause.highlight {
                    Some(h) => (
                        side_text(&h.old_tokens, true),
                        side_text(&h.new_tokens, false),
                    ),
                    None => (clause.old_text.clone(), clause.new_text.clone()),
                };
                out.push_str(&self.format_rows(
                    Some(&left),
                    Some(&right),
                    ChangeType::Modified,
                ));
            }
        }

        if !comparison.removed.is_empty() {
            out.push_str(&self.format_section_header("Removed"));
            for clause in &comparison.removed {
                let text = format!("{} {}: {}", clause.clause_id, clause.title, clause.text);
                out.push_str(&self.format_rows(Some(&text), None, ChangeType::Removed));
            }
        }

        if !comparison.added.is_empty() {
            out.push_str(&self.format_section_header("Added"));
            for clause in &comparison.added {
                let text = format!("{} {}: {}", clause.clause_id, clause.title, clause.text);
                out.push_str(&self.format_rows(None, Some(&text), ChangeType::Added));
            }
        }

        let summary = &comparison.summary;
        let _ = write!(
            out,
            "\n{}{} added, {} removed, {} modified, {} unchanged{}",
            self.col(colors::DIM),
            summary.added,
            summary.removed,
            summary.modified,
            summary.unchanged,
            self.col(colors::RESET),
        );
        Ok(out)
    }

    fn generate_plan_report(
        &self,
        comparison: &PlanComparison,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        if !comparison.comparison_ready {
            let unavailable: Vec<&str> = comparison.unavailable_plans().collect();
            return Ok(format!(
                "{}{}{} ({})",
                self.col(colors::RED),
                COMPARISON_UNAVAILABLE,
                self.col(colors::RESET),
                unavailable.join(", ")
            ));
        }

        let columns = comparison.plans.len() + 1;
        let cell = (self.width.saturating_sub(3 * (columns - 1)) / columns).max(8);

        let mut out = String::new();
        let header: Vec<String> = std::iter::once("field")
            .chain(comparison.plans.iter().map(|p| p.label.as_str()))
            .map(|label| pad(&truncate(label, cell), cell))
            .collect();
        let _ = writeln!(
            out,
            "{}{}{}",
            self.col(colors::BOLD),
            header.join(" │ ").trim_end(),
            self.col(colors::RESET)
        );
        let _ = writeln!(out, "{}", "─".repeat(self.width));

        for row in &comparison.rows {
            let (start, end) = if row.differs {
                (self.col(colors::YELLOW), self.col(colors::RESET))
            } else {
                ("", "")
            };
            let cells: Vec<String> = std::iter::once(row.field.clone())
                .chain(row.values.iter().map(|v| {
                    v.as_ref().map_or_else(|| "-".to_string(), ToString::to_string)
                }))
                .map(|text| pad(&truncate(&text, cell), cell))
                .collect();
            let _ = writeln!(out, "{start}{}{end}", cells.join(" │ ").trim_end());
        }
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::SideBySide
    }
}

/// Truncate to a display width, appending "..." when cut.
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max_width >= 3 {
        out.push_str("...");
    }
    out
}

/// Right-pad to a display width.
fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

/// Greedy word wrap to a display width; overlong words are truncated.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let word = truncate(word, width);
        if current.is_empty() {
            current = word;
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut current, word));
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
