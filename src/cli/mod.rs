//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod compare;
mod diff;
mod eligibility;
mod normalize;
mod validate;

pub use compare::run_compare;
pub use diff::run_diff;
pub use eligibility::run_eligibility;
pub use normalize::run_normalize;
pub use validate::run_validate;

// Re-export config types used by handlers
pub use crate::config::AppConfig;

use crate::config::Validatable;
use anyhow::{bail, Result};

/// Reject a merged configuration that fails validation.
pub fn ensure_valid(config: &AppConfig) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    bail!("Invalid configuration:\n  {}", details.join("\n  "))
}
