//! Implementation of the `rt range` command.
//!
//! Prints the `(start, end)` timestamps of a selection exactly as they appear
//! in the log, for handing to dashboard and upload tools.

use std::path::Path;

use anyhow::{Context, Result};
use rt_core::{AnalysisResult, RaceSelection, TimeRange};

use super::util::analyze_file;

/// Run the range command.
pub fn run(path: &Path, selection: RaceSelection, json: bool) -> Result<()> {
    let result = analyze_file(path, false)?;
    let range = select(&result, selection)?;

    if json {
        let output = serde_json::to_string(&range).context("failed to serialize range")?;
        println!("{output}");
    } else {
        print!("{}", format_range(&range));
    }
    Ok(())
}

/// Resolves a selection against an analysis result.
pub fn select(result: &AnalysisResult, selection: RaceSelection) -> Result<TimeRange> {
    let range = result
        .time_range(selection)
        .with_context(|| format!("cannot select race '{selection}'"))?;
    tracing::debug!(%selection, start = %range.start, end = %range.end, "selected range");
    Ok(range)
}

/// Formats a range as `start`/`end` lines.
pub fn format_range(range: &TimeRange) -> String {
    format!("start: {}\nend:   {}\n", range.start, range.end)
}
