//! Implementation of the `rt races` command.

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use rt_core::{AnalysisResult, RangeError};

use super::util::{analyze_file, format_end};

/// Run the races command.
pub fn run(path: &Path, race: Option<usize>) -> Result<()> {
    let result = analyze_file(path, false)?;
    print!("{}", format_races(&result, race)?);
    Ok(())
}

/// Formats the section-change timeline of every race, or of a single one.
pub fn format_races(result: &AnalysisResult, only: Option<usize>) -> Result<String> {
    if let Some(race) = only {
        if race >= result.race_times.len() {
            return Err(RangeError::NoSuchRace {
                race,
                total: result.total_race_count,
            }
            .into());
        }
    }

    let mut output = String::new();
    for (race, times) in result.race_times.iter().enumerate() {
        if only.is_some_and(|r| r != race) {
            continue;
        }
        if !output.is_empty() {
            writeln!(output).unwrap();
        }
        writeln!(
            output,
            "Race {race}: {} - {}",
            times.start,
            format_end(times.end.as_deref())
        )
        .unwrap();
        for change in result.section_changes(race).unwrap_or_default() {
            writeln!(output, "  [{}]  {}", change.time, change.section).unwrap();
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use rt_core::LogAnalyzer;

    use super::*;

    const CSV: &str = "time,section,area\n\
        2025-02-02 12:00:00.000,GARAGE,0\n\
        2025-02-02 12:01:00.000,BOARDING_IC,0\n\
        2025-02-02 12:02:00.000,BOARDING,0\n\
        2025-02-02 12:03:00.000,DOWNHILL,3\n";

    #[test]
    fn test_all_races() {
        let result = LogAnalyzer::default().analyze(CSV.as_bytes()).unwrap();
        assert_snapshot!(format_races(&result, None).unwrap(), @r"
        Race 0: 2025-02-02 12:00:00.000 - 2025-02-02 12:01:00.000
          [2025-02-02 12:00:00.000]  GARAGE
          [2025-02-02 12:01:00.000]  BOARDING_IC

        Race 1: 2025-02-02 12:01:00.000 - 2025-02-02 12:03:00.000
          [2025-02-02 12:01:00.000]  BOARDING_IC
          [2025-02-02 12:02:00.000]  BOARDING
          [2025-02-02 12:03:00.000]  DOWNHILL
        ");
    }

    #[test]
    fn test_single_race() {
        let result = LogAnalyzer::default().analyze(CSV.as_bytes()).unwrap();
        let output = format_races(&result, Some(0)).unwrap();
        assert!(output.starts_with("Race 0:"));
        assert!(!output.contains("Race 1"));
    }

    #[test]
    fn test_unknown_race() {
        let result = LogAnalyzer::default().analyze(CSV.as_bytes()).unwrap();
        let err = format_races(&result, Some(2)).unwrap_err();
        assert_eq!(err.to_string(), "race 2 does not exist (last race is 1)");
        assert_eq!(
            err.downcast_ref::<RangeError>(),
            Some(&RangeError::NoSuchRace { race: 2, total: 1 })
        );
    }
}
