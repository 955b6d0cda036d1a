//! Command implementations for the USC CLI.
//!
//! `preprocess` turns raw county AQI and station files into per-state
//! summaries; `compare` prints the dashboard's comparison for two years
//! without a browser.

use clap::{Subcommand, ValueEnum};
use std::path::PathBuf;
use usc_data::comparison::ComparisonMode;

pub mod compare;
pub mod preprocess;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text columns
    #[default]
    Table,
    /// One JSON object per state
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Aggregate raw AQI and climate files into <year>_processed.csv
    Preprocess {
        /// Directory holding states.csv, ghcnd-stations.txt and the per-year inputs
        #[arg(short = 'd', long, default_value = ".")]
        data_dir: PathBuf,

        /// Directory the processed files are written to
        #[arg(short = 'o', long, default_value = ".")]
        output_dir: PathBuf,

        /// First year to process
        #[arg(long, default_value_t = usc_core::year::FIRST_OBSERVED_YEAR)]
        from_year: i32,

        /// Last year to process (inclusive)
        #[arg(long, default_value_t = usc_core::year::LAST_OBSERVED_YEAR)]
        to_year: i32,
    },

    /// Compare metrics between two years for every state
    Compare {
        /// Left (baseline) year
        #[arg(short = 'l', long)]
        left: i32,

        /// Right year
        #[arg(short = 'r', long)]
        right: i32,

        /// percent or absolute; defaults to the config's mode
        #[arg(short = 'm', long)]
        mode: Option<ComparisonMode>,

        /// Directory holding <year>_processed.csv files
        #[arg(short = 'd', long, default_value = usc_utils::paths::PROCESSED_DIR)]
        data_dir: PathBuf,

        /// State geometry JSON
        #[arg(short = 'g', long, default_value = "fixtures/us_states.json")]
        geometry: PathBuf,

        /// Dashboard config JSON (defaults apply when omitted)
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Preprocess {
            data_dir,
            output_dir,
            from_year,
            to_year,
        } => {
            let options = preprocess::PreprocessOptions {
                data_dir,
                output_dir,
                years: usc_core::YearRange::new(from_year, to_year),
            };
            let written = preprocess::run_preprocess(&options)?;
            log::info!("Wrote {} processed files", written.len());
            Ok(())
        }
        Command::Compare {
            left,
            right,
            mode,
            data_dir,
            geometry,
            config,
            format,
        } => {
            let options = compare::CompareOptions {
                left,
                right,
                mode,
                data_dir,
                geometry,
                config,
                format,
            };
            let output = compare::run_compare(&options)?;
            println!("{}", output);
            Ok(())
        }
    }
}
