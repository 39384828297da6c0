//! Property-based tests for sorting, row indexing and the kernels

use proptest::prelude::*;

use spmv::sort::is_row_major;
use spmv::{
    check_error, reference_spmv, sort_matrix, spmv_parallel, spmv_serial, CooMatrix, RowIndex,
    Schedule,
};

/// A random matrix with possibly repeated coordinates and empty rows
fn arb_matrix() -> impl Strategy<Value = CooMatrix<f64>> {
    (1usize..40, 1usize..40).prop_flat_map(|(n_rows, n_cols)| {
        prop::collection::vec((0..n_rows, 0..n_cols, -100.0f64..100.0), 0..200)
            .prop_map(move |triplets| CooMatrix::from_triplets(n_rows, n_cols, &triplets))
    })
}

fn arb_problem() -> impl Strategy<Value = (CooMatrix<f64>, Vec<f64>)> {
    arb_matrix().prop_flat_map(|a| {
        let n_cols = a.n_cols;
        (Just(a), prop::collection::vec(-10.0f64..10.0, n_cols))
    })
}

fn sorted_entries(a: &CooMatrix<f64>) -> Vec<(usize, usize, u64)> {
    let mut entries: Vec<_> = a.entries().map(|(r, c, v)| (r, c, v.to_bits())).collect();
    entries.sort_unstable();
    entries
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn sort_is_row_major_permutation(a in arb_matrix()) {
        let mut sorted = a.clone();
        let keys = sort_matrix(&mut sorted, false).unwrap();

        prop_assert!(is_row_major(&keys));
        for (i, &key) in keys.iter().enumerate() {
            prop_assert_eq!(key, sorted.row_idx[i] * sorted.n_cols + sorted.col_idx[i]);
        }
        prop_assert_eq!(sorted_entries(&sorted), sorted_entries(&a));
    }

    #[test]
    fn sort_is_idempotent(a in arb_matrix()) {
        let mut once = a.clone();
        let keys_once = sort_matrix(&mut once, false).unwrap();
        let mut twice = once.clone();
        let keys_twice = sort_matrix(&mut twice, false).unwrap();

        prop_assert_eq!(&keys_once, &keys_twice);

        // Ties may permute, but each row holds the same entries
        let index_once = RowIndex::build(&keys_once, once.n_rows, once.n_cols);
        let index_twice = RowIndex::build(&keys_twice, twice.n_rows, twice.n_cols);
        prop_assert_eq!(&index_once, &index_twice);
        prop_assert_eq!(sorted_entries(&once), sorted_entries(&twice));
    }

    #[test]
    fn row_ranges_partition_sorted_entries(a in arb_matrix()) {
        let mut a = a;
        let keys = sort_matrix(&mut a, false).unwrap();
        let index = RowIndex::build(&keys, a.n_rows, a.n_cols);

        prop_assert!(index.covers(a.nnz()));

        let mut previous_end: Option<usize> = None;
        for (row, range) in index.ranges().iter().enumerate() {
            if let Some(range) = range {
                if let Some(end) = previous_end {
                    prop_assert!(end < range.start);
                }
                for j in range.as_range() {
                    prop_assert_eq!(a.row_idx[j], row);
                }
                previous_end = Some(range.end);
            } else {
                prop_assert!(!a.row_idx.contains(&row));
            }
        }
    }

    #[test]
    fn parallel_matches_serial((a, x) in arb_problem(), workers in 1usize..9) {
        let mut a = a;
        let keys = sort_matrix(&mut a, false).unwrap();
        let index = RowIndex::build(&keys, a.n_rows, a.n_cols);

        let serial = spmv_serial(&a, &index, &x);
        let static_blocks = spmv_parallel(&a, &index, &x, workers, Schedule::Static).unwrap();
        let stealing = spmv_parallel(&a, &index, &x, workers, Schedule::WorkStealing).unwrap();

        prop_assert_eq!(&static_blocks, &serial);
        prop_assert_eq!(&stealing, &serial);
    }

    #[test]
    fn kernel_matches_reference((a, x) in arb_problem()) {
        let reference = reference_spmv(&a, &x);

        let mut a = a;
        let keys = sort_matrix(&mut a, false).unwrap();
        let index = RowIndex::build(&keys, a.n_rows, a.n_cols);
        let y = spmv_serial(&a, &index, &x);

        for (r, c) in reference.iter().zip(&y) {
            // Reordered sums differ only by rounding
            let scale = r.abs().max(1.0);
            prop_assert!((r - c).abs() <= 1e-9 * scale * 200.0, "{} vs {}", r, c);
        }
    }

    #[test]
    fn verifier_accepts_identical_vectors(v in prop::collection::vec(-1e6f64..1e6, 0..50)) {
        prop_assert!(check_error(&v, &v, 1e-6));
    }
}
