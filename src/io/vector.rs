//! Dense vector files: a length line followed by that many values

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use crate::error::{Result, SpmvError};
use crate::io::{open, parse_token, LineReader, MAX_PREALLOCATED};

/// Reads a vector file
pub fn read_vector<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let path = path.as_ref();
    parse_vector(open(path)?, path)
}

/// Reads a vector file and checks it has `expected_len` entries
///
/// The declared length is checked before any value is parsed, so a
/// mismatched file is rejected without reading its body.
pub fn read_vector_for<P: AsRef<Path>>(path: P, expected_len: usize) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let vector = parse_vector_checked(open(path)?, path, Some(expected_len))?;
    log::debug!("loaded vector of length {} from {}", vector.len(), path.display());
    Ok(vector)
}

/// Parses vector text from any reader
pub fn parse_vector<R: BufRead>(reader: R, origin: &Path) -> Result<Vec<f64>> {
    parse_vector_checked(reader, origin, None)
}

fn parse_vector_checked<R: BufRead>(
    reader: R,
    origin: &Path,
    expected_len: Option<usize>,
) -> Result<Vec<f64>> {
    let mut lines = LineReader::new(reader, origin);

    let (line_no, dim_line) = lines
        .next_content_line(false)?
        .ok_or_else(|| SpmvError::parse(lines.line_no(), "missing vector dimension"))?;
    let dim: usize = parse_token(dim_line.trim(), "vector dimension", line_no)?;

    if let Some(expected) = expected_len {
        if dim != expected {
            return Err(SpmvError::DimensionMismatch {
                expected,
                found: dim,
            });
        }
    }

    let mut values = Vec::with_capacity(dim.min(MAX_PREALLOCATED));
    while values.len() < dim {
        let (line_no, line) = lines.next_content_line(false)?.ok_or_else(|| {
            SpmvError::parse(
                lines.line_no(),
                format!("expected {} values, found {}", dim, values.len()),
            )
        })?;
        for token in line.split_whitespace() {
            if values.len() == dim {
                log::warn!("{}: ignoring extra value on line {}", origin.display(), line_no);
                break;
            }
            values.push(parse_token(token, "value", line_no)?);
        }
    }

    if let Some((line_no, _)) = lines.next_content_line(false)? {
        log::warn!(
            "{}: ignoring data after the declared {} values (line {})",
            origin.display(),
            dim,
            line_no
        );
    }

    Ok(values)
}

/// Writes a result vector, one value per line
///
/// Values use Rust's shortest round-trip formatting, so reading them back
/// with `str::parse::<f64>` recovers them exactly.
pub fn write_vector<P: AsRef<Path>>(path: P, values: &[f64]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| SpmvError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_values_to(&mut writer, values)
        .and_then(|_| writer.flush())
        .map_err(|e| SpmvError::io(path, e))
}

/// Writes a vector file (length line, then values) that [`read_vector`] accepts
pub fn write_vector_file<P: AsRef<Path>>(path: P, values: &[f64]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| SpmvError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", values.len())
        .and_then(|_| write_values_to(&mut writer, values))
        .and_then(|_| writer.flush())
        .map_err(|e| SpmvError::io(path, e))
}

/// One value per line
pub fn write_values_to<W: Write>(writer: &mut W, values: &[f64]) -> std::io::Result<()> {
    for v in values {
        writeln!(writer, "{}", v)?;
    }
    Ok(())
}
