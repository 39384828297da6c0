//! # Parallel SpMV
//!
//! The output vector is split into disjoint contiguous row blocks, one per
//! worker, fixed before any work starts. Each block is computed by exactly
//! one task on a dedicated rayon pool of `n_workers` threads; which pool
//! thread runs a given task is left to rayon, so an idle thread may pick up
//! a second block while a busy one is still on its first. Tasks share the
//! sorted matrix, row index and input vector read-only and write only their
//! own slice of the output, so no locks or atomics are involved.
//! The end of the pool scope is the join point: the result is complete when
//! [`spmv_parallel`] returns.

use num_traits::Num;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::ops::{AddAssign, Range};

use crate::error::{Result, SpmvError};
use crate::kernel::{check_operands, row_dot, spmv_rows};
use crate::matrix::{CooMatrix, RowIndex, Schedule};

/// Rows per static block: `ceil(n_rows / n_workers)`, at least one
///
/// # Panics
///
/// Panics if `n_workers` is zero.
pub fn block_size(n_rows: usize, n_workers: usize) -> usize {
    assert!(n_workers > 0, "n_workers must be positive");
    n_rows.div_ceil(n_workers).max(1)
}

/// The static row partition: one contiguous block per worker
///
/// Every block but the last holds [`block_size`] rows; the last holds the
/// remainder. When there are more workers than rows, the surplus workers get
/// no block and fewer than `n_workers` ranges are returned.
pub fn row_blocks(n_rows: usize, n_workers: usize) -> Vec<Range<usize>> {
    let block = block_size(n_rows, n_workers);
    (0..n_rows)
        .step_by(block)
        .map(|start| start..(start + block).min(n_rows))
        .collect()
}

/// Builds a pool of exactly `n_workers` threads
pub fn build_pool(n_workers: usize) -> Result<ThreadPool> {
    if n_workers == 0 {
        return Err(SpmvError::InvalidWorkerCount(n_workers));
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n_workers)
        .thread_name(|i| format!("spmv-worker-{}", i))
        .build()?;
    Ok(pool)
}

/// Computes `y = A * x` on a pool of `n_workers` threads
///
/// `a` must be sorted in row-major order and `index` built from its keys.
///
/// # Errors
///
/// [`SpmvError::InvalidWorkerCount`] for zero workers,
/// [`SpmvError::ThreadPool`] if the pool cannot be created.
///
/// # Examples
///
/// ```
/// use spmv::{CooMatrix, RowIndex, Schedule, sort_matrix, spmv_parallel};
///
/// let mut a = CooMatrix::from_triplets(2, 2, &[(1, 1, 2.0), (0, 0, 1.0)]);
/// let keys = sort_matrix(&mut a, false).unwrap();
/// let index = RowIndex::build(&keys, a.n_rows, a.n_cols);
///
/// let y = spmv_parallel(&a, &index, &[3.0, 4.0], 2, Schedule::Static).unwrap();
/// assert_eq!(y, vec![3.0, 8.0]);
/// ```
pub fn spmv_parallel<T>(
    a: &CooMatrix<T>,
    index: &RowIndex,
    x: &[T],
    n_workers: usize,
    schedule: Schedule,
) -> Result<Vec<T>>
where
    T: Copy + Num + AddAssign + Send + Sync,
{
    let pool = build_pool(n_workers)?;
    Ok(spmv_parallel_in(&pool, a, index, x, schedule))
}

/// Computes `y = A * x` on an existing pool
///
/// With [`Schedule::Static`] the rows are cut by [`row_blocks`] for the
/// pool's thread count and each block becomes one task.
///
/// # Panics
///
/// Panics if `x.len()` differs from the number of columns of `a`, or if the
/// index does not cover every row of `a`.
pub fn spmv_parallel_in<T>(
    pool: &ThreadPool,
    a: &CooMatrix<T>,
    index: &RowIndex,
    x: &[T],
    schedule: Schedule,
) -> Vec<T>
where
    T: Copy + Num + AddAssign + Send + Sync,
{
    check_operands(a, index, x);

    let n_workers = pool.current_num_threads();
    let mut y = vec![T::zero(); a.n_rows];

    match schedule {
        Schedule::Static => {
            let blocks = row_blocks(a.n_rows, n_workers);
            log::debug!(
                "static schedule: {} rows, {} workers, {} blocks of up to {} rows",
                a.n_rows,
                n_workers,
                blocks.len(),
                block_size(a.n_rows, n_workers)
            );

            for_each_block(pool, &mut y, &blocks, |rows, out| {
                log::trace!("block rows {}..{}", rows.start, rows.end);
                spmv_rows(a, index, x, rows.start, out);
            });
        }
        Schedule::WorkStealing => {
            log::debug!("work-stealing schedule: {} rows, {} workers", a.n_rows, n_workers);

            pool.install(|| {
                y.par_iter_mut()
                    .enumerate()
                    .for_each(|(row, slot)| *slot = row_dot(a, index.get(row), x));
            });
        }
    }

    y
}

/// Runs `f` once per block on `pool`, each call getting the block's rows and
/// the matching slice of `y`
///
/// `blocks` must tile `0..y.len()` in order.
fn for_each_block<T, F>(pool: &ThreadPool, y: &mut [T], blocks: &[Range<usize>], f: F)
where
    T: Send,
    F: Fn(Range<usize>, &mut [T]) + Sync,
{
    debug_assert_eq!(blocks.iter().map(|b| b.len()).sum::<usize>(), y.len());

    let f = &f;
    pool.scope(|s| {
        let mut rest = y;
        for rows in blocks {
            let (out, tail) = std::mem::take(&mut rest).split_at_mut(rows.len());
            rest = tail;
            let rows = rows.clone();
            s.spawn(move |_| f(rows, out));
        }
    });
}
