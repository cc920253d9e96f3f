//! Shared utilities for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use rt_core::{AnalysisResult, AnalyzerOptions, LogAnalyzer};

/// Analyze a telemetry CSV file.
pub fn analyze_file(path: &Path, area_markers: bool) -> Result<AnalysisResult> {
    let analyzer = LogAnalyzer::new(AnalyzerOptions { area_markers });
    tracing::debug!(path = %path.display(), area_markers, "analyzing telemetry");
    analyzer
        .analyze_path(path)
        .with_context(|| format!("failed to analyze {}", path.display()))
}

/// Formats an optional race end, which is only absent for an unclosed race.
pub fn format_end(end: Option<&str>) -> &str {
    end.unwrap_or("(open)")
}
