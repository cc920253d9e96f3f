//! Telemetry rows and header resolution.

use csv::StringRecord;

use crate::analyzer::AnalyzeError;
use crate::area::Area;
use crate::section::Section;

/// Logical name of the timestamp column.
pub const TIME_COLUMN: &str = "time";
/// Logical name of the section label column.
pub const SECTION_COLUMN: &str = "section";
/// Logical name of the optional area code column.
pub const AREA_COLUMN: &str = "area";

/// One classified telemetry sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryRow {
    /// Timestamp as written in the log (`YYYY-MM-DD HH:MM:SS.fff`).
    pub time: String,
    pub section: Section,
    pub area: Area,
}

impl TelemetryRow {
    /// Classifies raw column values. Never fails.
    pub fn parse(time: &str, section_label: &str, area_code: Option<&str>) -> Self {
        Self {
            time: time.trim().to_string(),
            section: Section::from_label(section_label),
            area: Area::from_code(area_code),
        }
    }
}

/// Column positions resolved from a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub time: usize,
    pub section: usize,
    pub area: Option<usize>,
}

impl Columns {
    /// Locates the logical columns, ignoring case and surrounding whitespace.
    pub fn resolve(headers: &StringRecord) -> Result<Self, AnalyzeError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let section = find(SECTION_COLUMN).ok_or(AnalyzeError::MissingColumn {
            column: SECTION_COLUMN,
        })?;
        let time = find(TIME_COLUMN).ok_or(AnalyzeError::MissingColumn {
            column: TIME_COLUMN,
        })?;

        Ok(Self {
            time,
            section,
            area: find(AREA_COLUMN),
        })
    }

    /// Extracts and classifies a data record.
    ///
    /// Cells beyond the end of a short record read as empty.
    pub fn row(&self, record: &StringRecord) -> TelemetryRow {
        TelemetryRow::parse(
            record.get(self.time).unwrap_or_default(),
            record.get(self.section).unwrap_or_default(),
            self.area.and_then(|i| record.get(i)),
        )
    }
}
