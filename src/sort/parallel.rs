//! Parallel partition sort
//!
//! The top levels of the partition tree are split across rayon workers with
//! `rayon::join`. Each side owns a disjoint `split_at` half of the four
//! sequences, so no synchronization is needed.

use super::{partition, sort_coordinates, CoordinateSlices};

/// Below this length a slice is sorted on the calling thread
pub const PARALLEL_SORT_MIN_LEN: usize = 4096;

/// Fork depth that yields a few tasks per thread of the current pool
pub fn default_parallel_depth() -> usize {
    let threads = rayon::current_num_threads().max(1);
    let log2 = (usize::BITS - threads.leading_zeros()) as usize;
    log2 + 2
}

/// Sorts the sequences by key, forking at most `depth` levels deep
///
/// Past the depth limit, or for short slices, the sequential iterative sort
/// finishes the job, which keeps the recursion bounded on adversarial input.
pub fn sort_coordinates_parallel<T: Send>(s: CoordinateSlices<'_, T>, depth: usize) {
    let mut s = s;
    if depth == 0 || s.len() < PARALLEL_SORT_MIN_LEN {
        sort_coordinates(&mut s);
        return;
    }

    let len = s.len();
    let mid = partition(&mut s, 0, len);
    let (left, right) = s.split_at(mid);

    rayon::join(
        || sort_coordinates_parallel(left, depth - 1),
        || sort_coordinates_parallel(right, depth - 1),
    );
}
