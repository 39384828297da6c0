//! Reference implementation of SpMV straight from the coordinate triples
//!
//! This provides a baseline for verifying the sorted, row-indexed kernels.
//! It does not depend on entry order, the sorter or the row index.

use num_traits::Num;
use std::ops::AddAssign;

use crate::matrix::CooMatrix;

/// Computes `y = A * x` by scattering every entry into its output row
///
/// # Panics
///
/// Panics if `x.len()` differs from the number of columns of `a`.
pub fn reference_spmv<T>(a: &CooMatrix<T>, x: &[T]) -> Vec<T>
where
    T: Copy + Num + AddAssign,
{
    assert_eq!(
        a.n_cols,
        x.len(),
        "Vector length must match the number of matrix columns"
    );

    let mut y = vec![T::zero(); a.n_rows];
    for (row, col, val) in a.entries() {
        y[row] += val * x[col];
    }
    y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_multiplication() {
        // A = [2 0 4; 0 3 0; 1 0 0], x = [1 1 1]
        let a = CooMatrix::from_triplets(
            3,
            3,
            &[(0, 0, 2.0), (1, 1, 3.0), (2, 0, 1.0), (0, 2, 4.0)],
        );

        let y = reference_spmv(&a, &[1.0, 1.0, 1.0]);
        assert_eq!(y, vec![6.0, 3.0, 1.0]);
    }

    #[test]
    fn test_duplicates_accumulate() {
        let a = CooMatrix::from_triplets(2, 2, &[(1, 0, 2), (1, 0, 3), (0, 1, 1)]);
        let y = reference_spmv(&a, &[10, 100]);
        assert_eq!(y, vec![100, 50]);
    }

    #[test]
    fn test_rectangular() {
        // 2 x 3 matrix times a length-3 vector gives length 2
        let a = CooMatrix::from_triplets(2, 3, &[(0, 2, 1.5), (1, 0, -1.0)]);
        let y = reference_spmv(&a, &[4.0, 5.0, 2.0]);
        assert_eq!(y, vec![3.0, -4.0]);
    }

    #[test]
    #[should_panic(expected = "Vector length must match")]
    fn test_wrong_vector_length() {
        let a = CooMatrix::<f64>::zeros(2, 2);
        reference_spmv(&a, &[1.0]);
    }
}
