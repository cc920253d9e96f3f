//! Implementation of the `rt export` command.
//!
//! Renders the timeline report and writes it to
//! `<output_dir>/<first>~<last>.txt`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rt_core::{AnalysisResult, render_report, report_file_name};

use super::util::analyze_file;

/// Run the export command.
pub fn run(path: &Path, output_dir: &Path, area_markers: bool) -> Result<()> {
    let result = analyze_file(path, area_markers)?;
    let written = write_report(&result, output_dir)?;
    println!("Report saved to {}", written.display());
    Ok(())
}

/// Writes the report for `result` into `output_dir`, creating it if needed.
///
/// Nothing is written for an empty result.
pub fn write_report(result: &AnalysisResult, output_dir: &Path) -> Result<PathBuf> {
    let report = render_report(result).context("cannot export report")?;
    let file_name = report_file_name(result).context("cannot export report")?;

    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    let file_path = output_dir.join(file_name);
    fs::write(&file_path, report)
        .with_context(|| format!("failed to write report: {}", file_path.display()))?;

    tracing::info!(path = %file_path.display(), entries = result.logs.len(), "report written");
    Ok(file_path)
}
