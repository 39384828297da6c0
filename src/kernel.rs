//! Row-oriented SpMV kernel over sorted coordinate entries
//!
//! Each output row is the dot product of that row's entries with the input
//! vector. Rows are independent, which is what lets [`crate::parallel`] hand
//! disjoint blocks of output rows to different workers.

use num_traits::Num;
use std::ops::AddAssign;

use crate::matrix::{CooMatrix, RowIndex, RowRange};

/// Dot product of one row's entries with `x`
///
/// An empty row (`None`) contributes zero.
#[inline]
pub fn row_dot<T>(a: &CooMatrix<T>, range: Option<RowRange>, x: &[T]) -> T
where
    T: Copy + Num + AddAssign,
{
    let mut sum = T::zero();
    if let Some(range) = range {
        for j in range.as_range() {
            sum += a.values[j] * x[a.col_idx[j]];
        }
    }
    sum
}

/// Computes the output rows `first_row .. first_row + out.len()` into `out`
///
/// `a` must be sorted in row-major order and `index` built from its keys.
pub fn spmv_rows<T>(a: &CooMatrix<T>, index: &RowIndex, x: &[T], first_row: usize, out: &mut [T])
where
    T: Copy + Num + AddAssign,
{
    for (offset, slot) in out.iter_mut().enumerate() {
        *slot = row_dot(a, index.get(first_row + offset), x);
    }
}

/// Computes `y = A * x` on the calling thread
///
/// # Panics
///
/// Panics if `x.len()` differs from the number of columns of `a`, or if the
/// index does not cover every row of `a`.
pub fn spmv_serial<T>(a: &CooMatrix<T>, index: &RowIndex, x: &[T]) -> Vec<T>
where
    T: Copy + Num + AddAssign,
{
    check_operands(a, index, x);

    let mut y = vec![T::zero(); a.n_rows];
    spmv_rows(a, index, x, 0, &mut y);
    y
}

pub(crate) fn check_operands<T>(a: &CooMatrix<T>, index: &RowIndex, x: &[T]) {
    assert_eq!(
        a.n_cols,
        x.len(),
        "Vector length must match the number of matrix columns"
    );
    assert_eq!(a.n_rows, index.n_rows(), "Row index must cover every matrix row");
}
