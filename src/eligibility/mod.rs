//! Waiting-period eligibility checks.
//!
//! Given a policy start date, a hospitalization date and a treatment kind,
//! decides whether the treatment's waiting period has elapsed.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Waiting period for one treatment kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WaitingPeriod {
    /// Lookup key, matched case-insensitively (e.g. `maternity`)
    pub treatment: String,
    /// Human-readable label
    pub label: String,
    /// Days from policy start before the treatment is claimable
    pub days: u32,
}

impl WaitingPeriod {
    pub fn new(treatment: impl Into<String>, label: impl Into<String>, days: u32) -> Self {
        Self {
            treatment: treatment.into(),
            label: label.into(),
            days,
        }
    }
}

/// Immutable table of waiting periods with a fallback for unknown kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingPeriodTable {
    periods: Vec<WaitingPeriod>,
    default_days: u32,
}

/// Fallback waiting period for treatments missing from the table.
pub const DEFAULT_WAITING_DAYS: u32 = 30;

impl Default for WaitingPeriodTable {
    fn default() -> Self {
        Self::new(default_waiting_periods(), DEFAULT_WAITING_DAYS)
    }
}

/// The built-in waiting periods.
#[must_use]
pub fn default_waiting_periods() -> Vec<WaitingPeriod> {
    vec![
        WaitingPeriod::new("general", "General Treatment", 30),
        WaitingPeriod::new("hospitalization", "Hospitalization", 30),
        WaitingPeriod::new("surgery", "Surgical Procedure", 90),
        WaitingPeriod::new("maternity", "Maternity Coverage", 730),
        WaitingPeriod::new("pre-existing", "Pre-Existing Condition", 1095),
        WaitingPeriod::new("dental", "Dental Treatment", 180),
        WaitingPeriod::new("vision", "Vision Care", 90),
    ]
}

impl WaitingPeriodTable {
    #[must_use]
    pub const fn new(periods: Vec<WaitingPeriod>, default_days: u32) -> Self {
        Self {
            periods,
            default_days,
        }
    }

    #[must_use]
    pub fn get(&self, treatment: &str) -> Option<&WaitingPeriod> {
        self.periods
            .iter()
            .find(|p| p.treatment.eq_ignore_ascii_case(treatment))
    }

    /// Required days and label; unknown kinds get the default and their raw key.
    #[must_use]
    pub fn requirement(&self, treatment: &str) -> (u32, String) {
        self.get(treatment).map_or_else(
            || (self.default_days, treatment.to_string()),
            |p| (p.days, p.label.clone()),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &WaitingPeriod> {
        self.periods.iter()
    }
}

/// Result of an eligibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EligibilityOutcome {
    /// Hospitalization precedes the policy start
    InvalidDates,
    Eligible {
        required_days: u32,
        label: String,
    },
    NotEligible {
        remaining_days: u32,
        required_days: u32,
        label: String,
    },
}

impl EligibilityOutcome {
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible { .. })
    }
}

impl fmt::Display for EligibilityOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDates => {
                write!(f, "Hospitalization date cannot be before the policy start date")
            }
            Self::Eligible {
                required_days,
                label,
            } => write!(
                f,
                "Eligible: the {required_days}-day waiting period for {label} has been completed"
            ),
            Self::NotEligible {
                remaining_days,
                required_days,
                label,
            } => write!(
                f,
                "Not eligible: {label} requires a {required_days}-day waiting period, {remaining_days} days remaining"
            ),
        }
    }
}

/// Check whether `treatment` is claimable on `hospitalization`.
pub fn check_eligibility(
    start: NaiveDate,
    hospitalization: NaiveDate,
    treatment: &str,
    table: &WaitingPeriodTable,
) -> EligibilityOutcome {
    let elapsed = hospitalization.signed_duration_since(start).num_days();
    if elapsed < 0 {
        return EligibilityOutcome::InvalidDates;
    }

    let (required_days, label) = table.requirement(treatment);
    if elapsed >= i64::from(required_days) {
        EligibilityOutcome::Eligible {
            required_days,
            label,
        }
    } else {
        let remaining = i64::from(required_days) - elapsed;
        EligibilityOutcome::NotEligible {
            remaining_days: u32::try_from(remaining).unwrap_or(required_days),
            required_days,
            label,
        }
    }
}
