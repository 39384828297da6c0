//! Reading and writing the text formats of the tool
//!
//! - Matrix Market coordinate files for the matrix operand
//! - A plain list of values, preceded by its length, for vectors

pub mod matrix_market;
pub mod vector;

pub use matrix_market::{parse_matrix, read_matrix, write_matrix, MatrixMarketBanner};
pub use vector::{parse_vector, read_vector, read_vector_for, write_vector, write_vector_file};

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::error::{Result, SpmvError};

/// Upper bound on storage reserved from a count declared in a file header
pub(crate) const MAX_PREALLOCATED: usize = 1 << 20;

/// Opens a file for buffered reading, tagging failures with the path
pub(crate) fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| SpmvError::io(path, e))
}

/// Line reader that counts lines and attributes I/O errors to a source
pub(crate) struct LineReader<R> {
    lines: Lines<R>,
    line_no: usize,
    origin: PathBuf,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(reader: R, origin: &Path) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            origin: origin.to_path_buf(),
        }
    }

    /// Next raw line with its 1-based number
    pub(crate) fn next_line(&mut self) -> Result<Option<(usize, String)>> {
        match self.lines.next() {
            None => Ok(None),
            Some(Err(e)) => Err(SpmvError::io(&self.origin, e)),
            Some(Ok(line)) => {
                self.line_no += 1;
                Ok(Some((self.line_no, line)))
            }
        }
    }

    /// Next line that is neither blank nor, if `skip_comments`, a `%` comment
    pub(crate) fn next_content_line(&mut self, skip_comments: bool) -> Result<Option<(usize, String)>> {
        while let Some((no, line)) = self.next_line()? {
            let trimmed = line.trim();
            if trimmed.is_empty() || (skip_comments && trimmed.starts_with('%')) {
                continue;
            }
            return Ok(Some((no, line)));
        }
        Ok(None)
    }

    /// Number of the last line returned
    pub(crate) fn line_no(&self) -> usize {
        self.line_no
    }
}

/// Parses one whitespace-separated token, naming it in the error
pub(crate) fn parse_token<T: std::str::FromStr>(token: &str, what: &str, line: usize) -> Result<T> {
    token
        .parse()
        .map_err(|_| SpmvError::parse(line, format!("invalid {}: {:?}", what, token)))
}
