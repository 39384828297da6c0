//! Writes a random SpMV problem: a Matrix Market matrix and a matching vector

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use spmv::generate::ProblemGenerator;
use spmv::io::{write_matrix, write_vector_file};

#[derive(Debug, Parser)]
#[command(name = "spmv-gen")]
#[command(about = "Generate a random sparse matrix and vector for spmv", long_about = None)]
struct GenArgs {
    /// Number of matrix rows
    rows: usize,

    /// Number of matrix columns (and vector length)
    cols: usize,

    /// Average entries per row
    nnz_per_row: usize,

    /// Output matrix file
    matrix_out: PathBuf,

    /// Output vector file
    vector_out: PathBuf,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> ExitCode {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(log::LevelFilter::Info);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();

    let args = GenArgs::parse();

    let mut generator = ProblemGenerator::new(args.seed);
    let matrix = generator.sparse_matrix(args.rows, args.cols, args.nnz_per_row);
    let vector = generator.vector(args.cols);

    let written = write_matrix(&args.matrix_out, &matrix)
        .and_then(|_| write_vector_file(&args.vector_out, &vector));

    match written {
        Ok(()) => {
            log::info!(
                "wrote {} x {} matrix with {} entries to {} and vector to {}",
                matrix.n_rows,
                matrix.n_cols,
                matrix.nnz(),
                args.matrix_out.display(),
                args.vector_out.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
