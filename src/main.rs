use clap::Parser;
use std::process::ExitCode;

use spmv::SpmvConfig;

mod cli;

use cli::Cli;

fn init_logging(level: log::LevelFilter) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.try_init().ok();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    let config = SpmvConfig::from(&cli);

    match spmv::run(&cli.matrix, &cli.vector, &config) {
        Ok(report) => {
            log::debug!(
                "load {:?}, sort {:?}, index {:?}, compute {:?}",
                report.load_time,
                report.sort_time,
                report.index_time,
                report.compute_time
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
