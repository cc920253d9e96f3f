//! Implementation of the `rt analyze` command.
//!
//! Prints the headline of an analysis: overall time span, race count and the
//! time range of every race.

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use rt_core::AnalysisResult;

use super::util::{analyze_file, format_end};

/// Run the analyze command.
pub fn run(path: &Path, json: bool, area_markers: bool) -> Result<()> {
    let result = analyze_file(path, area_markers)?;

    if json {
        let output =
            serde_json::to_string_pretty(&result).context("failed to serialize analysis")?;
        println!("{output}");
    } else {
        print!("{}", format_summary(&result));
    }
    Ok(())
}

/// Formats the human-readable summary.
pub fn format_summary(result: &AnalysisResult) -> String {
    let mut output = String::new();

    let Some((first, last)) = result.time_span() else {
        writeln!(output, "No telemetry rows found.").unwrap();
        return output;
    };

    writeln!(output, "Time span:   {first} - {last}").unwrap();
    writeln!(output, "Total races: {}", result.total_race_count).unwrap();
    writeln!(output).unwrap();

    for (race, times) in result.race_times.iter().enumerate() {
        let changes = result.section_changes(race).map_or(0, <[_]>::len);
        let label = if race == 0 {
            "pre-race".to_string()
        } else {
            format!("race {race}")
        };
        writeln!(
            output,
            "{label:<10} {} - {}  ({changes} section changes)",
            times.start,
            format_end(times.end.as_deref()),
        )
        .unwrap();
    }

    output
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use rt_core::LogAnalyzer;

    use super::*;

    #[test]
    fn test_summary_lists_races() {
        let csv = "time,section,area\n\
            2025-06-14 09:00:00.000,ENTERING,0\n\
            2025-06-14 09:01:00.000,BOARDING_IC,0\n\
            2025-06-14 09:02:00.000,DOWNHILL,1\n\
            2025-06-14 09:03:00.000,BOARDING_IC,0\n\
            2025-06-14 09:04:00.000,GARAGE,0\n";
        let result = LogAnalyzer::default().analyze(csv.as_bytes()).unwrap();

        assert_snapshot!(format_summary(&result), @r"
        Time span:   2025-06-14 09:00:00.000 - 2025-06-14 09:04:00.000
        Total races: 2

        pre-race   2025-06-14 09:00:00.000 - 2025-06-14 09:01:00.000  (2 section changes)
        race 1     2025-06-14 09:01:00.000 - 2025-06-14 09:03:00.000  (3 section changes)
        race 2     2025-06-14 09:03:00.000 - 2025-06-14 09:04:00.000  (2 section changes)
        ");
    }

    #[test]
    fn test_summary_empty() {
        let output = format_summary(&AnalysisResult::default());
        assert_eq!(output, "No telemetry rows found.\n");
    }

    #[test]
    fn test_summary_blank_times_is_empty() {
        let result = LogAnalyzer::default()
            .analyze("time,section\n,GARAGE\n".as_bytes())
            .unwrap();
        assert_eq!(format_summary(&result), "No telemetry rows found.\n");
    }
}
