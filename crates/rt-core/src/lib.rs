//! Core domain logic for race timeline analysis.
//!
//! This crate contains:
//! - Section and area classification of telemetry rows
//! - The segmentation engine that splits a ride log into races
//! - The analysis result model and its text report

pub mod analyzer;
pub mod area;
pub mod report;
pub mod result;
pub mod row;
pub mod section;

pub use analyzer::{AnalyzeError, AnalyzerOptions, LogAnalyzer, ScanState};
pub use area::Area;
pub use report::{ReportError, render_report, report_file_name};
pub use result::{
    AnalysisResult, LogEntry, LogKind, RaceSelection, RaceTime, RangeError, SectionChange,
    TimeRange,
};
pub use row::{Columns, TelemetryRow};
pub use section::{Section, UnknownSection};
