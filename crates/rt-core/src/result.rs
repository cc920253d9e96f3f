//! Analysis output consumed by the report formatter and the CLI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::area::Area;
use crate::section::Section;

/// Kind of a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogKind {
    /// Race banner.
    RaceInfo,
    /// Section transition.
    SectionChange,
    /// GPS race-start/race-end zone entry. Only emitted when area markers are enabled.
    RaceEvent,
}

impl LogKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RaceInfo => "RACE_INFO",
            Self::SectionChange => "SECTION_CHANGE",
            Self::RaceEvent => "RACE_EVENT",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One event in the flat timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: String,
    /// Human-readable text, e.g. a section label or race banner.
    pub context: String,
    pub kind: LogKind,
    /// Index of the race this entry belongs to.
    pub race: usize,
    pub area: Area,
    pub section: Section,
}

/// Start and end of one race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceTime {
    pub start: String,
    /// `None` while the race is still open.
    pub end: Option<String>,
}

/// A recorded section transition within a race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionChange {
    pub section: Section,
    pub time: String,
}

/// Full result of one analysis pass.
///
/// `race_times` and `race_section_changes` are indexed by race number, with
/// the pre-race segment (race 0) at index 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub first_time: Option<String>,
    pub last_time: Option<String>,
    /// Number of races, not counting race 0.
    pub total_race_count: usize,
    pub logs: Vec<LogEntry>,
    pub race_times: Vec<RaceTime>,
    pub race_section_changes: Vec<Vec<SectionChange>>,
}

impl AnalysisResult {
    /// First and last timestamps, if both are present and non-blank.
    pub fn time_span(&self) -> Option<(&str, &str)> {
        match (self.first_time.as_deref(), self.last_time.as_deref()) {
            (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
                Some((first, last))
            }
            _ => None,
        }
    }

    /// Whether the result has no usable time span.
    pub fn is_empty(&self) -> bool {
        self.time_span().is_none()
    }

    /// Section changes recorded for a race.
    pub fn section_changes(&self, race: usize) -> Option<&[SectionChange]> {
        self.race_section_changes.get(race).map(Vec::as_slice)
    }

    /// Timeline entries belonging to a race.
    pub fn race_entries(&self, race: usize) -> impl Iterator<Item = &LogEntry> {
        self.logs.iter().filter(move |entry| entry.race == race)
    }

    /// Resolves a selection to the `(start, end)` pair handed to publishers.
    ///
    /// Timestamps are returned exactly as they appeared in the log.
    pub fn time_range(&self, selection: RaceSelection) -> Result<TimeRange, RangeError> {
        match selection {
            RaceSelection::All => {
                let (start, end) = self.time_span().ok_or(RangeError::EmptyResult)?;
                Ok(TimeRange {
                    start: start.to_string(),
                    end: end.to_string(),
                })
            }
            RaceSelection::Race(race) => {
                let times = self.race_times.get(race).ok_or(RangeError::NoSuchRace {
                    race,
                    total: self.total_race_count,
                })?;
                let end = times.end.clone().ok_or(RangeError::OpenRace { race })?;
                Ok(TimeRange {
                    start: times.start.clone(),
                    end,
                })
            }
        }
    }
}

/// A verbatim `(start, end)` timestamp pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

/// Which part of the log to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RaceSelection {
    /// The whole log, first row to last row.
    #[default]
    All,
    /// A single race; 0 is the pre-race segment.
    Race(usize),
}

impl fmt::Display for RaceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Race(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for RaceSelection {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse()
            .map(Self::Race)
            .map_err(|_| RangeError::InvalidSelection {
                value: s.to_string(),
            })
    }
}

/// Errors from selecting a time range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("analysis result is empty")]
    EmptyResult,

    #[error("race {race} does not exist (last race is {total})")]
    NoSuchRace { race: usize, total: usize },

    #[error("race {race} has not been closed")]
    OpenRace { race: usize },

    #[error("invalid race selection: {value} (expected 'all' or a race number)")]
    InvalidSelection { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnalysisResult {
        AnalysisResult {
            first_time: Some("2025-03-01 09:00:00.000".into()),
            last_time: Some("2025-03-01 09:30:00.000".into()),
            total_race_count: 1,
            logs: vec![
                LogEntry {
                    time: "2025-03-01 09:00:00.000".into(),
                    context: "ENTERING".into(),
                    kind: LogKind::SectionChange,
                    race: 0,
                    area: Area::Init,
                    section: Section::Entering,
                },
                LogEntry {
                    time: "2025-03-01 09:10:00.000".into(),
                    context: "BOARDING_IC".into(),
                    kind: LogKind::SectionChange,
                    race: 1,
                    area: Area::Init,
                    section: Section::BoardingIc,
                },
            ],
            race_times: vec![
                RaceTime {
                    start: "2025-03-01 09:00:00.000".into(),
                    end: Some("2025-03-01 09:10:00.000".into()),
                },
                RaceTime {
                    start: "2025-03-01 09:10:00.000".into(),
                    end: Some("2025-03-01 09:30:00.000".into()),
                },
            ],
            race_section_changes: vec![Vec::new(), Vec::new()],
        }
    }

    #[test]
    fn all_spans_whole_log() {
        let range = sample().time_range(RaceSelection::All).unwrap();
        assert_eq!(range.start, "2025-03-01 09:00:00.000");
        assert_eq!(range.end, "2025-03-01 09:30:00.000");
    }

    #[test]
    fn race_zero_is_selectable() {
        let range = sample().time_range(RaceSelection::Race(0)).unwrap();
        assert_eq!(range.end, "2025-03-01 09:10:00.000");
    }

    #[test]
    fn missing_race_is_an_error() {
        let err = sample().time_range(RaceSelection::Race(2)).unwrap_err();
        assert_eq!(err, RangeError::NoSuchRace { race: 2, total: 1 });
    }

    #[test]
    fn open_race_is_an_error() {
        let mut result = sample();
        result.race_times[1].end = None;
        let err = result.time_range(RaceSelection::Race(1)).unwrap_err();
        assert_eq!(err, RangeError::OpenRace { race: 1 });
    }

    #[test]
    fn blank_times_count_as_empty() {
        let mut result = sample();
        result.first_time = Some(String::new());
        assert!(result.is_empty());
        assert_eq!(
            result.time_range(RaceSelection::All).unwrap_err(),
            RangeError::EmptyResult
        );
    }

    #[test]
    fn no_such_race_message() {
        let err = RangeError::NoSuchRace { race: 4, total: 1 };
        assert_eq!(err.to_string(), "race 4 does not exist (last race is 1)");
    }

    #[test]
    fn empty_result_has_no_range() {
        let err = AnalysisResult::default()
            .time_range(RaceSelection::All)
            .unwrap_err();
        assert_eq!(err, RangeError::EmptyResult);
    }

    #[test]
    fn selection_parsing() {
        assert_eq!("all".parse::<RaceSelection>().unwrap(), RaceSelection::All);
        assert_eq!("ALL".parse::<RaceSelection>().unwrap(), RaceSelection::All);
        assert_eq!(" 3 ".parse::<RaceSelection>().unwrap(), RaceSelection::Race(3));
        assert!("first".parse::<RaceSelection>().is_err());
    }

    #[test]
    fn race_entries_filters_by_race() {
        let result = sample();
        let contexts: Vec<_> = result.race_entries(1).map(|e| e.context.as_str()).collect();
        assert_eq!(contexts, vec!["BOARDING_IC"]);
    }

    #[test]
    fn kind_serializes_as_screaming_snake() {
        let json = serde_json::to_string(&LogKind::SectionChange).unwrap();
        assert_eq!(json, "\"SECTION_CHANGE\"");
    }
}
