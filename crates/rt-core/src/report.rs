//! Plain-text timeline report.

use std::fmt::Write;

use thiserror::Error;

use crate::result::{AnalysisResult, LogKind};

/// Errors from rendering a report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("analysis result is empty; nothing to report")]
    EmptyResult,
}

/// Renders the timeline as a human-readable report.
///
/// Race banners stand on their own line after a blank line; every other
/// entry renders as `[<time>]  <context>`.
pub fn render_report(result: &AnalysisResult) -> Result<String, ReportError> {
    let (first, last) = time_span(result)?;
    let mut out = String::new();

    writeln!(out, "Time span: {first} - {last}").unwrap();
    writeln!(out, "Total races: {}", result.total_race_count).unwrap();
    out.push('\n');

    for entry in &result.logs {
        match entry.kind {
            LogKind::RaceInfo => writeln!(out, "\n{}", entry.context).unwrap(),
            LogKind::SectionChange | LogKind::RaceEvent => {
                writeln!(out, "[{}]  {}", entry.time, entry.context).unwrap();
            }
        }
    }

    Ok(out)
}

/// File name for a report: `<first>~<last>.txt` with `:` replaced by `_`.
pub fn report_file_name(result: &AnalysisResult) -> Result<String, ReportError> {
    let (first, last) = time_span(result)?;
    Ok(format!(
        "{}~{}.txt",
        first.replace(':', "_"),
        last.replace(':', "_")
    ))
}

fn time_span(result: &AnalysisResult) -> Result<(&str, &str), ReportError> {
    result.time_span().ok_or(ReportError::EmptyResult)
}
