//! End-to-end run: load, sort, index, multiply, verify, write
//!
//! The phases run strictly in that order. Only the multiply (and, when
//! enabled, the sort) use the worker pool; loading, indexing, the sequential
//! reference and verification run on the calling thread.

use std::path::Path;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::io::{read_matrix, read_vector_for, write_vector};
use crate::matrix::{reference_spmv, CooMatrix, RowIndex, SpmvConfig};
use crate::parallel::{build_pool, spmv_parallel_in};
use crate::sort::sort_matrix;
use crate::verify::verify;

/// Timings and sizes of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub n_rows: usize,
    pub n_cols: usize,
    pub nnz: usize,
    pub n_workers: usize,
    pub load_time: Duration,
    pub sort_time: Duration,
    pub index_time: Duration,
    pub compute_time: Duration,
    /// The verified result vector
    pub result: Vec<f64>,
}

/// A matrix sorted into row-major order together with its row index
#[derive(Debug, Clone)]
pub struct PreparedMatrix {
    pub matrix: CooMatrix<f64>,
    pub index: RowIndex,
}

/// Sorts the matrix in place and builds its row index
pub fn prepare(mut matrix: CooMatrix<f64>, parallel_sort: bool) -> Result<PreparedMatrix> {
    let keys = sort_matrix(&mut matrix, parallel_sort)?;
    let index = RowIndex::build(&keys, matrix.n_rows, matrix.n_cols);
    debug_assert!(index.covers(matrix.nnz()));
    Ok(PreparedMatrix { matrix, index })
}

/// Runs the whole pipeline on a matrix file and a vector file
///
/// The result is written to `config.output_path` only after it has been
/// verified against the sequential reference.
///
/// # Errors
///
/// Any load or format error, an invalid worker count, or
/// [`crate::SpmvError::Verification`] when the parallel result disagrees with
/// the reference beyond `config.tolerance`.
pub fn run(matrix_path: &Path, vector_path: &Path, config: &SpmvConfig) -> Result<RunReport> {
    let n_workers = config.system_params.n_threads;
    let pool = build_pool(n_workers)?;

    log::info!("opening input matrix file: {}", matrix_path.display());
    let start = Instant::now();
    let matrix = read_matrix(matrix_path)?;
    log::info!("opening input vector file: {}", vector_path.display());
    let x = read_vector_for(vector_path, matrix.n_cols)?;
    let load_time = start.elapsed();

    let (n_rows, n_cols, nnz) = (matrix.n_rows, matrix.n_cols, matrix.nnz());
    log::info!("matrix {} x {} with {} entries", n_rows, n_cols, nnz);

    // Reference result from the unsorted triples
    let reference = reference_spmv(&matrix, &x);

    let start = Instant::now();
    let mut matrix = matrix;
    let keys = if config.parallel_sort {
        pool.install(|| sort_matrix(&mut matrix, true))?
    } else {
        sort_matrix(&mut matrix, false)?
    };
    let sort_time = start.elapsed();

    let start = Instant::now();
    let index = RowIndex::build(&keys, n_rows, n_cols);
    let index_time = start.elapsed();
    log::debug!("{} of {} rows have entries", index.non_empty_rows(), n_rows);

    log::info!("start computation ({} workers, {:?} schedule)", n_workers, config.schedule);
    let start = Instant::now();
    let result = spmv_parallel_in(&pool, &matrix, &index, &x, config.schedule);
    let compute_time = start.elapsed();
    log::info!("end of computation");

    verify(&reference, &result, config.tolerance)?;
    log::info!("test result passed");
    log::info!(
        "parallel computation time: {} micro-seconds",
        compute_time.as_micros()
    );

    write_vector(&config.output_path, &result)?;
    log::info!("result written to {}", config.output_path.display());

    Ok(RunReport {
        n_rows,
        n_cols,
        nnz,
        n_workers,
        load_time,
        sort_time,
        index_time,
        compute_time,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::spmv_serial;

    #[test]
    fn test_prepare_sorts_and_indexes() {
        let matrix = CooMatrix::from_triplets(
            3,
            3,
            &[(0, 0, 2.0), (1, 1, 3.0), (2, 0, 1.0), (0, 2, 4.0)],
        );
        let prepared = prepare(matrix, false).unwrap();

        assert_eq!(prepared.matrix.row_idx, vec![0, 0, 1, 2]);
        assert!(prepared.index.covers(4));

        let y = spmv_serial(&prepared.matrix, &prepared.index, &[1.0, 1.0, 1.0]);
        assert_eq!(y, vec![6.0, 3.0, 1.0]);
    }
}
