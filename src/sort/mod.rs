//! Row-major sorting of coordinate entries
//!
//! Entries are ordered by the key `row * n_cols + col`, which sorts by row
//! first and column second. The sort permutes four parallel sequences
//! (values, keys, rows, columns) in place; every exchange goes through
//! [`CoordinateSlices::swap`] so the sequences can never drift apart.

pub mod parallel;
pub mod quicksort;

use num_traits::Num;

use crate::error::Result;
use crate::matrix::CooMatrix;

pub use parallel::{default_parallel_depth, sort_coordinates_parallel};
pub use quicksort::{partition, sort_coordinates};

/// Four parallel mutable sequences sorted together by `keys`
pub struct CoordinateSlices<'a, T> {
    pub values: &'a mut [T],
    pub keys: &'a mut [usize],
    pub rows: &'a mut [usize],
    pub cols: &'a mut [usize],
}

impl<'a, T> CoordinateSlices<'a, T> {
    /// Bundles the four sequences
    ///
    /// # Panics
    ///
    /// Panics if the sequences differ in length.
    pub fn new(
        values: &'a mut [T],
        keys: &'a mut [usize],
        rows: &'a mut [usize],
        cols: &'a mut [usize],
    ) -> Self {
        let n = values.len();
        assert!(
            keys.len() == n && rows.len() == n && cols.len() == n,
            "coordinate sequences must have equal length"
        );
        Self {
            values,
            keys,
            rows,
            cols,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Exchanges entries `i` and `j` in all four sequences
    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        self.values.swap(i, j);
        self.keys.swap(i, j);
        self.rows.swap(i, j);
        self.cols.swap(i, j);
    }

    /// Splits into `[0, mid)` and `[mid, len)`, each owning its own slices
    pub fn split_at(self, mid: usize) -> (CoordinateSlices<'a, T>, CoordinateSlices<'a, T>) {
        let (v1, v2) = self.values.split_at_mut(mid);
        let (k1, k2) = self.keys.split_at_mut(mid);
        let (r1, r2) = self.rows.split_at_mut(mid);
        let (c1, c2) = self.cols.split_at_mut(mid);
        (
            CoordinateSlices {
                values: v1,
                keys: k1,
                rows: r1,
                cols: c1,
            },
            CoordinateSlices {
                values: v2,
                keys: k2,
                rows: r2,
                cols: c2,
            },
        )
    }
}

/// Sorts the matrix entries into row-major order in place
///
/// Returns the sort keys, permuted together with the entries. With
/// `parallel` set, disjoint partitions are sorted on the current rayon pool.
pub fn sort_matrix<T>(matrix: &mut CooMatrix<T>, parallel: bool) -> Result<Vec<usize>>
where
    T: Copy + Num + Send,
{
    let mut keys = matrix.sort_keys()?;

    let mut slices = CoordinateSlices::new(
        &mut matrix.values,
        &mut keys,
        &mut matrix.row_idx,
        &mut matrix.col_idx,
    );

    if parallel {
        sort_coordinates_parallel(slices, default_parallel_depth());
    } else {
        sort_coordinates(&mut slices);
    }

    debug_assert!(is_row_major(&keys));
    log::debug!("sorted {} entries (parallel: {})", keys.len(), parallel);

    Ok(keys)
}

/// Returns true if the keys are non-decreasing
pub fn is_row_major(keys: &[usize]) -> bool {
    keys.windows(2).all(|w| w[0] <= w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_moves_all_sequences() {
        let mut values = vec![1.0, 2.0, 3.0];
        let mut keys = vec![10, 20, 30];
        let mut rows = vec![0, 1, 2];
        let mut cols = vec![5, 6, 7];

        let mut slices = CoordinateSlices::new(&mut values, &mut keys, &mut rows, &mut cols);
        slices.swap(0, 2);

        assert_eq!(values, vec![3.0, 2.0, 1.0]);
        assert_eq!(keys, vec![30, 20, 10]);
        assert_eq!(rows, vec![2, 1, 0]);
        assert_eq!(cols, vec![7, 6, 5]);
    }

    #[test]
    fn test_split_at() {
        let mut values = vec![1, 2, 3, 4];
        let mut keys = vec![0, 1, 2, 3];
        let mut rows = vec![0, 0, 1, 1];
        let mut cols = vec![0, 1, 0, 1];

        let slices = CoordinateSlices::new(&mut values, &mut keys, &mut rows, &mut cols);
        let (left, right) = slices.split_at(1);
        assert_eq!(left.len(), 1);
        assert_eq!(right.len(), 3);
        assert_eq!(right.keys, &[1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "coordinate sequences must have equal length")]
    fn test_unequal_lengths() {
        let mut values = vec![1.0];
        let mut keys = vec![0, 1];
        let mut rows = vec![0];
        let mut cols = vec![0];
        CoordinateSlices::new(&mut values, &mut keys, &mut rows, &mut cols);
    }

    #[test]
    fn test_sort_matrix() {
        // 1-based input (1,1,2.0),(2,2,3.0),(3,1,1.0),(1,3,4.0)
        let mut matrix = CooMatrix::from_triplets(
            3,
            3,
            &[(0, 0, 2.0), (1, 1, 3.0), (2, 0, 1.0), (0, 2, 4.0)],
        );

        let keys = sort_matrix(&mut matrix, false).unwrap();

        assert_eq!(keys, vec![0, 2, 4, 6]);
        assert_eq!(matrix.row_idx, vec![0, 0, 1, 2]);
        assert_eq!(matrix.col_idx, vec![0, 2, 1, 0]);
        assert_eq!(matrix.values, vec![2.0, 4.0, 3.0, 1.0]);
    }

    #[test]
    fn test_sort_matrix_parallel_matches_serial() {
        let triplets: Vec<_> = (0..500)
            .map(|i| ((i * 37) % 50, (i * 11) % 40, i as f64))
            .collect();
        let mut serial = CooMatrix::from_triplets(50, 40, &triplets);
        let mut parallel = serial.clone();

        let serial_keys = sort_matrix(&mut serial, false).unwrap();
        let parallel_keys = sort_matrix(&mut parallel, true).unwrap();

        assert_eq!(serial_keys, parallel_keys);
        assert!(is_row_major(&parallel_keys));
    }
}
