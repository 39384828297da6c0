//! # spmv: statically partitioned sparse matrix-vector multiplication
//!
//! Computes `y = A * x` for a real sparse matrix read from a Matrix Market
//! coordinate file and a dense vector read from a text file.
//!
//! ## Pipeline
//!
//! 1. **Load**: coordinate triples, converted from 1-based to 0-based
//!    indices, and a vector whose length is checked against the matrix.
//!
//! 2. **Sort**: entries are put into row-major order in place by a partition
//!    sort that permutes values, keys, rows and columns together.
//!
//! 3. **Index**: one scan over the sorted keys records each row's range.
//!
//! 4. **Multiply**: each row's dot product is independent, so the output is
//!    split into contiguous row blocks, one per worker.
//!
//! 5. **Verify**: the parallel result is checked against a sequential
//!    reference within a relative-error tolerance.
//!
//! ## Usage
//!
//! ```
//! use spmv::{CooMatrix, RowIndex, Schedule, reference_spmv, sort_matrix, spmv_parallel, verify};
//!
//! // 1-based input (1,1,2.0),(2,2,3.0),(3,1,1.0),(1,3,4.0)
//! let mut a = CooMatrix::from_triplets(3, 3, &[(0, 0, 2.0), (1, 1, 3.0), (2, 0, 1.0), (0, 2, 4.0)]);
//! let x = [1.0, 1.0, 1.0];
//! let reference = reference_spmv(&a, &x);
//!
//! let keys = sort_matrix(&mut a, false).unwrap();
//! let index = RowIndex::build(&keys, a.n_rows, a.n_cols);
//! let y = spmv_parallel(&a, &index, &x, 2, Schedule::Static).unwrap();
//!
//! assert_eq!(y, vec![6.0, 3.0, 1.0]);
//! assert!(verify(&reference, &y, 1e-6).is_ok());
//! ```

pub mod error;
pub mod generate;
pub mod io;
pub mod kernel;
pub mod matrix;
pub mod parallel;
pub mod pipeline;
pub mod sort;
pub mod utils;
pub mod verify;

// Re-export primary components
pub use error::{Result, SpmvError};
pub use matrix::{CooMatrix, RowIndex, RowRange, reference_spmv};
pub use matrix::config::{Schedule, SpmvConfig, SystemParameters, DEFAULT_TOLERANCE};
pub use kernel::{row_dot, spmv_serial};
pub use parallel::{block_size, row_blocks, spmv_parallel, spmv_parallel_in};
pub use sort::{sort_matrix, CoordinateSlices};
pub use verify::{check_error, verify, Mismatch, VerificationError};
pub use pipeline::{prepare, run, PreparedMatrix, RunReport};

/// Version information for the spmv library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
