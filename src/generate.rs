//! Seeded random SpMV problems for benchmarks and tests

use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::matrix::CooMatrix;

/// Generates random coordinate matrices and dense vectors
///
/// Entries are emitted in shuffled (non row-major) order so that generated
/// problems exercise the sorter.
pub struct ProblemGenerator {
    rng: ChaCha8Rng,
}

impl ProblemGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Random matrix with about `avg_nnz_per_row` entries per row
    ///
    /// Each row draws between 0 and `2 * avg_nnz_per_row` entries, so some
    /// rows are empty. Column indices may repeat within a row; duplicates are
    /// legal and accumulate.
    pub fn sparse_matrix(&mut self, n_rows: usize, n_cols: usize, avg_nnz_per_row: usize) -> CooMatrix<f64> {
        if n_rows == 0 || n_cols == 0 {
            return CooMatrix::zeros(n_rows, n_cols);
        }

        let nnz_dist = Uniform::from(0..=avg_nnz_per_row * 2);
        let col_dist = Uniform::from(0..n_cols);
        let val_dist = Uniform::from(-10.0f64..10.0);

        let mut triplets = Vec::with_capacity(n_rows * avg_nnz_per_row);
        for row in 0..n_rows {
            let row_nnz = nnz_dist.sample(&mut self.rng);
            for _ in 0..row_nnz {
                triplets.push((row, col_dist.sample(&mut self.rng), val_dist.sample(&mut self.rng)));
            }
        }

        self.shuffle(&mut triplets);
        CooMatrix::from_triplets(n_rows, n_cols, &triplets)
    }

    /// Banded matrix with `bandwidth` diagonals on each side of the main one
    pub fn banded_matrix(&mut self, n: usize, bandwidth: usize) -> CooMatrix<f64> {
        let val_dist = Uniform::from(0.5f64..2.0);

        let mut triplets = Vec::new();
        for row in 0..n {
            let lo = row.saturating_sub(bandwidth);
            let hi = (row + bandwidth + 1).min(n);
            for col in lo..hi {
                triplets.push((row, col, val_dist.sample(&mut self.rng)));
            }
        }

        self.shuffle(&mut triplets);
        CooMatrix::from_triplets(n, n, &triplets)
    }

    /// Dense vector with entries in `[-1, 1)`
    pub fn vector(&mut self, len: usize) -> Vec<f64> {
        let dist = Uniform::from(-1.0..1.0);
        (0..len).map(|_| dist.sample(&mut self.rng)).collect()
    }

    fn shuffle<E>(&mut self, items: &mut [E]) {
        use rand::seq::SliceRandom;
        items.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_problem() {
        let a = ProblemGenerator::new(7).sparse_matrix(50, 40, 3);
        let b = ProblemGenerator::new(7).sparse_matrix(50, 40, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sparse_matrix_bounds() {
        let m = ProblemGenerator::new(1).sparse_matrix(100, 20, 4);
        assert_eq!(m.n_rows, 100);
        assert_eq!(m.n_cols, 20);
        assert!(m.entries().all(|(r, c, v)| r < 100 && c < 20 && (-10.0..10.0).contains(&v)));
    }

    #[test]
    fn test_banded_nnz() {
        // 5 x 5 tridiagonal: 5 + 2 * 4 entries
        let m = ProblemGenerator::new(3).banded_matrix(5, 1);
        assert_eq!(m.nnz(), 13);
        assert!(m.entries().all(|(r, c, _)| r.abs_diff(c) <= 1));
    }

    #[test]
    fn test_empty_dimensions() {
        let m = ProblemGenerator::new(0).sparse_matrix(0, 10, 3);
        assert_eq!(m.nnz(), 0);
        assert_eq!(ProblemGenerator::new(0).vector(0).len(), 0);
    }
}
