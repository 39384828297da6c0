//! Error types for the SpMV pipeline

use std::path::PathBuf;
use thiserror::Error;

use crate::verify::VerificationError;

/// Result type alias using the crate's error
pub type Result<T> = std::result::Result<T, SpmvError>;

/// Errors that terminate an SpMV run
///
/// Every variant is fatal: the tool is a batch computation and nothing is
/// retried.
#[derive(Error, Debug)]
pub enum SpmvError {
    /// A file could not be opened, read or written
    #[error("{}: {source}", path.display())]
    Io {
        /// The file being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The first line is not a Matrix Market banner
    #[error("could not process Matrix Market banner: {0}")]
    InvalidBanner(String),

    /// The banner names a matrix type this tool does not handle
    #[error("this application does not support Matrix Market type: [{typecode}]")]
    UnsupportedType {
        /// Banner descriptors, e.g. `matrix coordinate complex general`
        typecode: String,
    },

    /// A line could not be parsed
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number in the input file
        line: usize,
        /// What was wrong with it
        message: String,
    },

    /// A coordinate entry lies outside the declared dimensions
    #[error("line {line}: entry ({row}, {col}) outside {n_rows} x {n_cols} matrix")]
    IndexOutOfBounds {
        line: usize,
        row: usize,
        col: usize,
        n_rows: usize,
        n_cols: usize,
    },

    /// The vector length does not match the matrix
    #[error("dimension mismatch: matrix expects a vector of length {expected}, got {found}")]
    DimensionMismatch {
        /// Length required by the matrix
        expected: usize,
        /// Length found
        found: usize,
    },

    /// `row * n_cols + col` does not fit in a `usize`
    #[error("sort key overflow for entry ({row}, {col}) with {n_cols} columns")]
    SortKeyOverflow { row: usize, col: usize, n_cols: usize },

    /// Worker count must be at least one
    #[error("worker count must be a positive integer, got {0}")]
    InvalidWorkerCount(usize),

    /// The worker pool could not be created
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Parallel and sequential results disagree
    #[error("calculation error: {0}")]
    Verification(#[from] VerificationError),
}

impl SpmvError {
    /// Helper to wrap an I/O error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SpmvError::Io {
            path: path.into(),
            source,
        }
    }

    /// Helper for parse errors
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        SpmvError::Parse {
            line,
            message: message.into(),
        }
    }

    /// Process exit code for this error
    ///
    /// Input and invariant failures exit with 1; a verification mismatch
    /// exits with 3 so scripts can tell a wrong answer from bad input.
    /// (Usage errors exit with 2 from the argument parser.)
    pub fn exit_code(&self) -> u8 {
        match self {
            SpmvError::Verification(_) => 3,
            _ => 1,
        }
    }
}
