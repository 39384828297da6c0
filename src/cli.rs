use clap::Parser;
use std::path::PathBuf;

use spmv::matrix::config::{DEFAULT_OUTPUT_PATH, DEFAULT_TOLERANCE};
use spmv::{Schedule, SpmvConfig, SystemParameters};

/// Command-line interface of the spmv tool
#[derive(Debug, Parser)]
#[command(name = "spmv")]
#[command(about = "Sparse matrix-vector multiplication with static row partitioning", long_about = None)]
pub struct Cli {
    /// Matrix Market coordinate file (real, general)
    #[arg(value_name = "MATRIX")]
    pub matrix: PathBuf,

    /// Vector file: a length line followed by one value per line
    #[arg(value_name = "VECTOR")]
    pub vector: PathBuf,

    /// Number of worker threads
    #[arg(value_name = "WORKERS", value_parser = clap::value_parser!(u32).range(1..))]
    pub workers: u32,

    /// Where to write the result vector
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Relative-error tolerance when checking against the sequential result
    #[arg(long, default_value_t = DEFAULT_TOLERANCE, value_parser = parse_tolerance)]
    pub tolerance: f64,

    /// How rows are assigned to workers
    #[arg(long, value_enum, default_value_t = ScheduleChoice::Static)]
    pub schedule: ScheduleChoice,

    /// Sort coordinate partitions on the worker pool
    #[arg(long)]
    pub parallel_sort: bool,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Accepts a finite, non-negative tolerance
fn parse_tolerance(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("`{}` is not a number: {}", s, e))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("tolerance must be finite and non-negative, got {}", s));
    }
    Ok(value)
}

/// Row scheduling choices exposed on the command line
#[derive(Debug, Clone, Copy, clap::ValueEnum, PartialEq, Eq)]
pub enum ScheduleChoice {
    /// Equal contiguous row blocks, one per worker
    Static,
    /// Rayon work stealing over individual rows
    WorkStealing,
}

impl From<ScheduleChoice> for Schedule {
    fn from(choice: ScheduleChoice) -> Self {
        match choice {
            ScheduleChoice::Static => Schedule::Static,
            ScheduleChoice::WorkStealing => Schedule::WorkStealing,
        }
    }
}

impl From<&Cli> for SpmvConfig {
    fn from(cli: &Cli) -> Self {
        SpmvConfig {
            system_params: SystemParameters {
                n_threads: cli.workers as usize,
            },
            tolerance: cli.tolerance,
            schedule: cli.schedule.into(),
            parallel_sort: cli.parallel_sort,
            output_path: cli.output.clone(),
        }
    }
}

impl Cli {
    /// Log level selected by the `-v` count
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
