//! Eligibility command handler.

use crate::config::AppConfig;
use crate::eligibility::{check_eligibility, EligibilityOutcome};
use crate::pipeline::{exit_codes, write_output, OutputTarget};
use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Serialize)]
struct EligibilityReport<'a> {
    start: NaiveDate,
    hospitalization: NaiveDate,
    treatment: &'a str,
    #[serde(flatten)]
    outcome: &'a EligibilityOutcome,
}

fn parse_date(value: &str, what: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .with_context(|| format!("Invalid {what} date '{value}', expected YYYY-MM-DD"))
}

/// Run the eligibility command.
///
/// Exits with `SUCCESS` when eligible, `CHANGES_DETECTED` when the waiting
/// period has not elapsed and `ERROR` when the dates are inverted.
pub fn run_eligibility(
    config: &AppConfig,
    start: &str,
    hospitalization: &str,
    treatment: &str,
) -> Result<i32> {
    let start_date = parse_date(start, "policy start")?;
    let hospitalization_date = parse_date(hospitalization, "hospitalization")?;
    let table = config.eligibility.table();

    let outcome = check_eligibility(start_date, hospitalization_date, treatment, &table);
    tracing::debug!("Eligibility for '{treatment}': {outcome:?}");

    let content = if config.output.format == ReportFormat::Json {
        serde_json::to_string_pretty(&EligibilityReport {
            start: start_date,
            hospitalization: hospitalization_date,
            treatment,
            outcome: &outcome,
        })?
    } else {
        outcome.to_string()
    };
    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&content, &target, config.behavior.quiet)?;

    Ok(match outcome {
        EligibilityOutcome::Eligible { .. } => exit_codes::SUCCESS,
        EligibilityOutcome::NotEligible { .. } => exit_codes::CHANGES_DETECTED,
        EligibilityOutcome::InvalidDates => exit_codes::ERROR,
    })
}
