//! JSON reporter
//!
//! Outputs the full ReputationReport as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or further processing.

use crate::models::ReputationReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &ReputationReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
