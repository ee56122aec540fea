//! Normalize command handler.
//!
//! Prints one document's comparison record as JSON, or `null` when the
//! document is not comparison-ready.

use crate::config::AppConfig;
use crate::pipeline::{
    build_normalizer, exit_codes, load_document_value, write_output, OutputTarget, PipelineError,
};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the normalize command.
pub fn run_normalize(config: &AppConfig, path: &Path) -> Result<i32> {
    let normalizer = build_normalizer(config).context("Failed to load field schema")?;
    let document = load_document_value(path).map_err(|source| PipelineError::ParseFailed {
        path: path.display().to_string(),
        source,
    })?;

    let record = match normalizer.try_normalize(&document) {
        Ok(record) => Some(record),
        Err(reason) => {
            tracing::warn!("{} is not comparison-ready: {reason}", path.display());
            None
        }
    };

    let json = serde_json::to_string_pretty(&record).context("Failed to serialize record")?;
    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&json, &target, config.behavior.quiet)?;
    Ok(exit_codes::SUCCESS)
}
