//! Utilities for converting between coordinate matrices and sprs

use crate::matrix::CooMatrix;
use sprs::{CsMat, TriMat};

/// Converts a coordinate matrix to an sprs CSR matrix
///
/// Duplicate coordinates are summed by sprs during the conversion.
pub fn to_sprs_csr(matrix: &CooMatrix<f64>) -> CsMat<f64> {
    let triplets = TriMat::from_triplets(
        (matrix.n_rows, matrix.n_cols),
        matrix.row_idx.clone(),
        matrix.col_idx.clone(),
        matrix.values.clone(),
    );
    triplets.to_csr()
}

/// Converts an sprs matrix (CSR or CSC) into coordinate form, row-major
pub fn from_sprs(matrix: CsMat<f64>) -> CooMatrix<f64> {
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (n_rows, n_cols) = matrix.shape();
    let mut row_idx = Vec::with_capacity(matrix.nnz());
    let mut col_idx = Vec::with_capacity(matrix.nnz());
    let mut values = Vec::with_capacity(matrix.nnz());

    for (row, row_vec) in matrix.outer_iterator().enumerate() {
        for (col, &val) in row_vec.iter() {
            row_idx.push(row);
            col_idx.push(col);
            values.push(val);
        }
    }

    CooMatrix::new(n_rows, n_cols, row_idx, col_idx, values)
}

/// `y = A * x` computed by walking an sprs CSR matrix
///
/// Shares no code with the crate's kernels, which makes it a useful
/// independent check.
pub fn sprs_spmv(matrix: &CsMat<f64>, x: &[f64]) -> Vec<f64> {
    assert!(matrix.is_csr(), "sprs_spmv expects a CSR matrix");
    matrix
        .outer_iterator()
        .map(|row| row.iter().map(|(col, &val)| val * x[col]).sum())
        .collect()
}
