//! Report generation for comparison results.
//!
//! Output formats:
//! - JSON: Structured data for programmatic integration
//! - Markdown: Human-readable documentation
//! - Side-by-side: Old and new text in terminal columns
//! - Summary: Compact shell-friendly output
//!
//! Policy text is untrusted input; the `escape` module keeps it from
//! breaking Markdown tables.

pub mod escape;
mod json;
mod markdown;
mod sidebyside;
mod summary;
mod types;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use sidebyside::SideBySideReporter;
pub use summary::SummaryReporter;
pub use types::{ReportConfig, ReportFormat, ReportMetadata};

use crate::config::DEFAULT_REPORT_WIDTH;
use crate::diff::{PlanComparison, TaggedWord, VersionComparison};
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<ReportError> for crate::error::PolicyDiffError {
    fn from(err: ReportError) -> Self {
        use crate::error::ReportErrorKind;
        let kind = match &err {
            ReportError::SerializationError(msg) => {
                ReportErrorKind::JsonSerializationError(msg.clone())
            }
            other => ReportErrorKind::UnsupportedFormat(other.to_string()),
        };
        Self::report("report generation", kind)
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report for a version diff
    fn generate_version_report(
        &self,
        comparison: &VersionComparison,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Generate a report for a side-by-side plan comparison
    fn generate_plan_report(
        &self,
        comparison: &PlanComparison,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write a version report to a writer
    fn write_version_report(
        &self,
        comparison: &VersionComparison,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate_version_report(comparison, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true, DEFAULT_REPORT_WIDTH)
}

/// Create a report generator with color and width control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
    width: usize,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::SideBySide => {
            let reporter = SideBySideReporter::new().width(width);
            if use_color {
                Box::new(reporter)
            } else {
                Box::new(reporter.no_colors())
            }
        }
    }
}

/// Join highlighted tokens, wrapping exclusive ones with `open`/`close`.
pub(crate) fn render_tokens(tokens: &[TaggedWord], open: &str, close: &str) -> String {
    tokens
        .iter()
        .map(|t| {
            if t.exclusive {
                format!("{open}{}{close}", t.word)
            } else {
                t.word.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Plural suffix helper for counts in prose.
pub(crate) const fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_reporter_formats() {
        assert_eq!(create_reporter(ReportFormat::Auto).format(), ReportFormat::Summary);
        assert_eq!(create_reporter(ReportFormat::Json).format(), ReportFormat::Json);
        assert_eq!(
            create_reporter(ReportFormat::SideBySide).format(),
            ReportFormat::SideBySide
        );
        assert_eq!(
            create_reporter(ReportFormat::Markdown).format(),
            ReportFormat::Markdown
        );
    }

    #[test]
    fn test_render_tokens() {
        let tokens = vec![
            TaggedWord {
                word: "rent".into(),
                exclusive: false,
            },
            TaggedWord {
                word: "2000".into(),
                exclusive: true,
            },
        ];
        assert_eq!(render_tokens(&tokens, "[-", "-]"), "rent [-2000-]");
    }
}
