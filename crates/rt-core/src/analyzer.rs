//! Race segmentation engine.
//!
//! Turns a time-ordered stream of telemetry rows into races and section
//! transitions in a single forward pass.
//!
//! # Algorithm Summary
//!
//! 1. The first row opens race 0 (the pre-race segment).
//! 2. Every entry into `BOARDING_IC` from another section closes the current
//!    race at that row and opens the next one at the same timestamp.
//! 3. Any other section change is recorded under the current race.
//! 4. At end of input the open race is closed at the last row's timestamp.
//!
//! Section changes are deduplicated per race: a `(section, time)` pair equal
//! to the last one recorded for that race is dropped, together with its log
//! entry.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::area::Area;
use crate::result::{AnalysisResult, LogEntry, LogKind, RaceTime, SectionChange};
use crate::row::{Columns, TelemetryRow};
use crate::section::Section;

/// Errors that abort an analysis pass.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// A required column is absent from the header row.
    #[error("CSV has no '{column}' column")]
    MissingColumn { column: &'static str },

    /// The input could not be read as CSV.
    #[error("malformed telemetry CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The input file could not be opened.
    #[error("failed to open {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Behavior switches for the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Emit `RACE_EVENT` entries when the area enters the GPS race-start or
    /// race-end zone. Off by default.
    pub area_markers: bool,
}

/// Accumulator threaded through the pass.
///
/// Each [`ScanState::step`] consumes one row; [`ScanState::finish`] closes
/// the open race and yields the result.
#[derive(Debug, Clone)]
pub struct ScanState {
    options: AnalyzerOptions,
    prev_section: Option<Section>,
    prev_area: Option<Area>,
    current_race: usize,
    result: AnalysisResult,
}

impl ScanState {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self {
            options,
            prev_section: None,
            prev_area: None,
            current_race: 0,
            result: AnalysisResult::default(),
        }
    }

    /// Index of the race currently open.
    pub const fn current_race(&self) -> usize {
        self.current_race
    }

    /// Result built so far. The open race has no end time yet.
    pub const fn partial(&self) -> &AnalysisResult {
        &self.result
    }

    /// Classifies one row and advances the state.
    #[must_use]
    pub fn step(mut self, row: &TelemetryRow) -> Self {
        self.result.last_time = Some(row.time.clone());

        match self.prev_section {
            None => self.open_first_race(row),
            Some(prev) => {
                if row.section.is_boarding_approach() && !prev.is_boarding_approach() {
                    self.start_next_race(row);
                } else if row.section != prev {
                    self.record_section_change(self.current_race, row.section, row.area, &row.time);
                }

                if self.options.area_markers && self.prev_area != Some(row.area) {
                    self.mark_area(row);
                }
            }
        }

        self.prev_section = Some(row.section);
        self.prev_area = Some(row.area);
        self
    }

    /// Closes the open race and returns the finished result.
    pub fn finish(mut self) -> AnalysisResult {
        let (Some(last_time), Some(section), Some(area)) =
            (self.result.last_time.clone(), self.prev_section, self.prev_area)
        else {
            return self.result;
        };

        if let Some(race) = self.result.race_times.get_mut(self.current_race) {
            race.end = Some(last_time.clone());
        }
        self.record_section_change(self.current_race, section, area, &last_time);
        self.result.total_race_count = self.current_race;
        self.result
    }

    fn open_first_race(&mut self, row: &TelemetryRow) {
        self.result.first_time = Some(row.time.clone());
        self.open_race(row);
        self.record_section_change(0, row.section, row.area, &row.time);
    }

    fn start_next_race(&mut self, row: &TelemetryRow) {
        let closing = self.current_race;
        if let Some(race) = self.result.race_times.get_mut(closing) {
            race.end = Some(row.time.clone());
        }
        self.record_section_change(closing, row.section, row.area, &row.time);

        self.current_race += 1;
        tracing::debug!(race = self.current_race, time = %row.time, "race started");
        self.open_race(row);
        self.record_section_change(self.current_race, row.section, row.area, &row.time);
    }

    fn open_race(&mut self, row: &TelemetryRow) {
        self.result.race_times.push(RaceTime {
            start: row.time.clone(),
            end: None,
        });
        self.result.race_section_changes.push(Vec::new());
        self.push_entry(
            row,
            format!("============== RACE {} START ==============", self.current_race),
            LogKind::RaceInfo,
        );
    }

    /// Appends `(section, time)` to a race unless it repeats the last pair.
    ///
    /// The matching log entry is emitted only when the pair is appended.
    fn record_section_change(&mut self, race: usize, section: Section, area: Area, time: &str) {
        let Some(changes) = self.result.race_section_changes.get_mut(race) else {
            return;
        };
        if changes
            .last()
            .is_some_and(|last| last.section == section && last.time == time)
        {
            return;
        }
        changes.push(SectionChange {
            section,
            time: time.to_string(),
        });
        self.result.logs.push(LogEntry {
            time: time.to_string(),
            context: section.to_string(),
            kind: LogKind::SectionChange,
            race,
            area,
            section,
        });
    }

    fn mark_area(&mut self, row: &TelemetryRow) {
        let context = match row.area {
            Area::RaceStart => "GPS_RACE_START!!!",
            Area::RaceEnd => "GPS_RACE_END!!!",
            _ => return,
        };
        self.push_entry(row, context.to_string(), LogKind::RaceEvent);
    }

    fn push_entry(&mut self, row: &TelemetryRow, context: String, kind: LogKind) {
        self.result.logs.push(LogEntry {
            time: row.time.clone(),
            context,
            kind,
            race: self.current_race,
            area: row.area,
            section: row.section,
        });
    }
}

/// Entry point for analyzing telemetry logs.
///
/// The analyzer holds only options; every call starts from a fresh
/// [`ScanState`], so repeated calls on the same input give equal results.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAnalyzer {
    options: AnalyzerOptions,
}

impl LogAnalyzer {
    pub const fn new(options: AnalyzerOptions) -> Self {
        Self { options }
    }

    /// Analyzes already-classified rows. Rows must be in time order.
    pub fn analyze_rows<I>(&self, rows: I) -> AnalysisResult
    where
        I: IntoIterator<Item = TelemetryRow>,
    {
        rows.into_iter()
            .fold(ScanState::new(self.options), |state, row| state.step(&row))
            .finish()
    }

    /// Analyzes CSV telemetry with a header row.
    pub fn analyze<R: io::Read>(&self, reader: R) -> Result<AnalysisResult, AnalyzeError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers().map_err(log_unexpected)?;
        let columns = Columns::resolve(headers)?;
        tracing::debug!(?columns, "resolved telemetry columns");

        let mut state = ScanState::new(self.options);
        let mut rows = 0usize;
        for record in reader.records() {
            let record = record.map_err(log_unexpected)?;
            state = state.step(&columns.row(&record));
            rows += 1;
        }

        let result = state.finish();
        if result.is_empty() {
            tracing::warn!(rows, "telemetry log has no usable time span");
        } else {
            tracing::info!(
                rows,
                races = result.total_race_count,
                entries = result.logs.len(),
                "telemetry analyzed"
            );
        }
        Ok(result)
    }

    /// Opens and analyzes a CSV file.
    pub fn analyze_path(&self, path: &Path) -> Result<AnalysisResult, AnalyzeError> {
        let file = std::fs::File::open(path).map_err(|source| AnalyzeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.analyze(io::BufReader::new(file))
    }
}

fn log_unexpected(err: csv::Error) -> AnalyzeError {
    tracing::error!(error = %err, "failed to read telemetry");
    AnalyzeError::Csv(err)
}
