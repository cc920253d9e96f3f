//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rt_core::RaceSelection;

/// Race timeline analyzer.
///
/// Splits ride telemetry logs into races and section transitions and
/// exports them as timeline reports.
#[derive(Debug, Parser)]
#[command(name = "rt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summarize the races found in a telemetry log.
    Analyze {
        /// Telemetry CSV file.
        file: PathBuf,

        /// Print the full analysis result as JSON.
        #[arg(long)]
        json: bool,

        /// Emit GPS race-start/race-end zone markers.
        #[arg(long)]
        area_markers: bool,
    },

    /// Write the timeline report to a text file.
    Export {
        /// Telemetry CSV file.
        file: PathBuf,

        /// Directory to write the report into (overrides config).
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Emit GPS race-start/race-end zone markers.
        #[arg(long)]
        area_markers: bool,
    },

    /// Print the start and end timestamps of a race selection.
    Range {
        /// Telemetry CSV file.
        file: PathBuf,

        /// `all` for the whole log, or a race number (0 is the pre-race segment).
        #[arg(long, default_value = "all")]
        race: RaceSelection,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List section changes per race.
    Races {
        /// Telemetry CSV file.
        file: PathBuf,

        /// Only show this race.
        #[arg(long)]
        race: Option<usize>,
    },
}
