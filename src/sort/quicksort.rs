//! Partition-based sort over synchronized coordinate sequences
//!
//! Hoare partitioning around the middle key, driven by an explicit work
//! stack instead of recursion. The larger partition is always deferred and
//! the smaller one processed next, so the stack holds at most `log2(n)`
//! ranges even when every key is equal.

use super::CoordinateSlices;

/// Partitions `[lo, hi)` around the key at its midpoint
///
/// Returns `mid` with `lo < mid < hi` such that every key in `[lo, mid)` is
/// `<=` the pivot and every key in `[mid, hi)` is `>=` it. Both scans stop on
/// keys equal to the pivot, so runs of duplicates are split evenly rather
/// than swept to one side.
///
/// Requires `hi - lo >= 2`.
pub fn partition<T>(s: &mut CoordinateSlices<'_, T>, lo: usize, hi: usize) -> usize {
    debug_assert!(hi - lo >= 2);

    let pivot = s.keys[lo + (hi - lo) / 2];
    let mut i = lo;
    let mut j = hi - 1;

    loop {
        while s.keys[i] < pivot {
            i += 1;
        }
        while pivot < s.keys[j] {
            j -= 1;
        }
        if i >= j {
            return i;
        }
        s.swap(i, j);
        i += 1;
        j -= 1;
    }
}

/// Sorts the sequences by key in place
///
/// Lengths 0 and 1 are returned untouched.
pub fn sort_coordinates<T>(s: &mut CoordinateSlices<'_, T>) {
    let mut pending: Vec<(usize, usize)> = Vec::new();
    let (mut lo, mut hi) = (0, s.len());

    loop {
        while hi - lo >= 2 {
            let mid = partition(s, lo, hi);
            if mid - lo < hi - mid {
                pending.push((mid, hi));
                hi = mid;
            } else {
                pending.push((lo, mid));
                lo = mid;
            }
        }

        match pending.pop() {
            Some((next_lo, next_hi)) => {
                lo = next_lo;
                hi = next_hi;
            }
            None => break,
        }
    }
}
