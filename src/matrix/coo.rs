//! Coordinate (COO) sparse matrix storage

use std::fmt;
use num_traits::Num;

use crate::error::{Result, SpmvError};

/// A sparse matrix in coordinate format
///
/// The entries are stored as three parallel arrays of length `nnz`:
/// - row_idx: 0-based row index of each entry
/// - col_idx: 0-based column index of each entry
/// - values: the value of each entry
///
/// Order is not significant until the entries are sorted into row-major
/// order by [`crate::sort`]. Duplicate coordinates are legal and contribute
/// additively to any product.
#[derive(Clone, PartialEq)]
pub struct CooMatrix<T> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Row indices (size: nnz)
    pub row_idx: Vec<usize>,

    /// Column indices (size: nnz)
    pub col_idx: Vec<usize>,

    /// Entry values (size: nnz)
    pub values: Vec<T>,
}

impl<T> CooMatrix<T>
where
    T: Copy + Num,
{
    /// Creates a new coordinate matrix with the given dimensions and entries
    ///
    /// # Panics
    ///
    /// Panics if the input arrays are inconsistent:
    /// - row_idx, col_idx and values must have the same length
    /// - every row index must be < n_rows, every column index < n_cols
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_idx: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        assert_eq!(row_idx.len(), values.len(), "row_idx.len() must equal values.len()");
        assert_eq!(col_idx.len(), values.len(), "col_idx.len() must equal values.len()");

        for &row in &row_idx {
            assert!(row < n_rows, "Row index {} out of bounds (n_rows = {})", row, n_rows);
        }
        for &col in &col_idx {
            assert!(col < n_cols, "Column index {} out of bounds (n_cols = {})", col, n_cols);
        }

        Self {
            n_rows,
            n_cols,
            row_idx,
            col_idx,
            values,
        }
    }

    /// Builds a matrix from `(row, col, value)` triples
    pub fn from_triplets(n_rows: usize, n_cols: usize, triplets: &[(usize, usize, T)]) -> Self {
        let row_idx = triplets.iter().map(|&(r, _, _)| r).collect();
        let col_idx = triplets.iter().map(|&(_, c, _)| c).collect();
        let values = triplets.iter().map(|&(_, _, v)| v).collect();
        Self::new(n_rows, n_cols, row_idx, col_idx, values)
    }

    /// Creates a matrix with no entries
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            row_idx: Vec::new(),
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns the number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Iterates over `(row, col, value)` in storage order
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.row_idx
            .iter()
            .zip(&self.col_idx)
            .zip(&self.values)
            .map(|((&r, &c), &v)| (r, c, v))
    }

    /// Computes the row-major sort key `row * n_cols + col` of every entry
    ///
    /// Keys order entries by row first and column second. A key that does not
    /// fit in a `usize` means the dimensions are corrupt, which is reported as
    /// [`SpmvError::SortKeyOverflow`].
    pub fn sort_keys(&self) -> Result<Vec<usize>> {
        self.row_idx
            .iter()
            .zip(&self.col_idx)
            .map(|(&row, &col)| sort_key(row, col, self.n_cols))
            .collect()
    }
}

/// Row-major key of a single coordinate
pub fn sort_key(row: usize, col: usize, n_cols: usize) -> Result<usize> {
    row.checked_mul(n_cols)
        .and_then(|base| base.checked_add(col))
        .ok_or(SpmvError::SortKeyOverflow { row, col, n_cols })
}

impl<T: fmt::Debug + Copy + Num> fmt::Debug for CooMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CooMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        let max_entries = 8.min(self.nnz());
        if max_entries > 0 {
            writeln!(f, "  entries:")?;
            for (r, c, v) in self.entries().take(max_entries) {
                writeln!(f, "    ({}, {}) = {:?}", r, c, v)?;
            }
            if self.nnz() > max_entries {
                writeln!(f, "    ... ({} more)", self.nnz() - max_entries)?;
            }
        }

        write!(f, "}}")
    }
}
