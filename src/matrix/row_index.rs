//! Per-row offset ranges into row-major sorted entries

use std::ops::RangeInclusive;

/// Inclusive offsets `[start, end]` of one row's entries in the sorted arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    /// Number of entries in the row
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn as_range(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Row ranges for every row of a sorted matrix
///
/// `ranges[r]` is `None` when row `r` has no entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIndex {
    ranges: Vec<Option<RowRange>>,
}

impl RowIndex {
    /// Builds the index with one scan over the sorted keys
    ///
    /// The row of each entry is recovered from its key as `key / n_cols`.
    /// The first entry seen for a row sets both ends of its range; later
    /// entries of the same row only advance the end.
    ///
    /// # Panics
    ///
    /// Panics if a key maps to a row `>= n_rows`, which can only happen if the
    /// keys were not produced for an `n_rows x n_cols` matrix.
    pub fn build(keys: &[usize], n_rows: usize, n_cols: usize) -> Self {
        let mut ranges: Vec<Option<RowRange>> = vec![None; n_rows];

        for (pos, &key) in keys.iter().enumerate() {
            let row = key / n_cols;
            if let Some(range) = ranges[row].as_mut() {
                range.end = pos;
            } else {
                ranges[row] = Some(RowRange {
                    start: pos,
                    end: pos,
                });
            }
        }

        Self { ranges }
    }

    /// Number of rows covered by the index
    pub fn n_rows(&self) -> usize {
        self.ranges.len()
    }

    /// Range of row `row`, or `None` if the row is empty
    pub fn get(&self, row: usize) -> Option<RowRange> {
        self.ranges[row]
    }

    pub fn ranges(&self) -> &[Option<RowRange>] {
        &self.ranges
    }

    /// Number of rows with at least one entry
    pub fn non_empty_rows(&self) -> usize {
        self.ranges.iter().filter(|r| r.is_some()).count()
    }

    /// Checks that the non-empty ranges tile `[0, nnz)` in row order
    pub fn covers(&self, nnz: usize) -> bool {
        let mut next = 0;
        for range in self.ranges.iter().flatten() {
            if range.start != next || range.end < range.start {
                return false;
            }
            next = range.end + 1;
        }
        next == nnz
    }
}
