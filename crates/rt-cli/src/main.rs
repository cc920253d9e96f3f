use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rt_cli::commands::{analyze, export, races, range};
use rt_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match &cli.command {
        Some(Commands::Analyze {
            file,
            json,
            area_markers,
        }) => {
            analyze::run(file, *json, *area_markers || config.area_markers)?;
        }
        Some(Commands::Export {
            file,
            output_dir,
            area_markers,
        }) => {
            let output_dir = output_dir.as_deref().unwrap_or(&config.output_dir);
            export::run(file, output_dir, *area_markers || config.area_markers)?;
        }
        Some(Commands::Range { file, race, json }) => {
            range::run(file, *race, *json)?;
        }
        Some(Commands::Races { file, race }) => {
            races::run(file, *race)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
