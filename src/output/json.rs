//! JSON report output

use crate::stats::Report;
use crate::Result;
use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    #[serde(flatten)]
    report: &'a Report,
}

/// Render a report as pretty-printed JSON with a generation timestamp
pub fn render_report(report: &Report) -> Result<String> {
    let wrapped = JsonReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        report,
    };
    serde_json::to_string_pretty(&wrapped).context("Failed to serialize report")
}

/// Write the JSON report to a file
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    let rendered = render_report(report)?;
    fs::write(path, rendered)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
