//! Matrix Market coordinate reader and writer
//!
//! Only the `matrix coordinate real general` type (and its `integer`
//! variant) is accepted. Complex, pattern, dense `array` and symmetric
//! storage are rejected with [`SpmvError::UnsupportedType`].

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, SpmvError};
use crate::io::{open, parse_token, LineReader, MAX_PREALLOCATED};
use crate::matrix::CooMatrix;

const BANNER_PREFIX: &str = "%%MatrixMarket";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmFormat {
    Coordinate,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmField {
    Real,
    Integer,
    Complex,
    Pattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmSymmetry {
    General,
    Symmetric,
    SkewSymmetric,
    Hermitian,
}

/// The type descriptors of a `%%MatrixMarket` banner line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixMarketBanner {
    pub format: MmFormat,
    pub field: MmField,
    pub symmetry: MmSymmetry,
}

impl MatrixMarketBanner {
    /// The banner written by [`write_matrix`]
    pub const REAL_GENERAL: MatrixMarketBanner = MatrixMarketBanner {
        format: MmFormat::Coordinate,
        field: MmField::Real,
        symmetry: MmSymmetry::General,
    };

    /// Whether the loader can read matrices of this type
    pub fn is_supported(&self) -> bool {
        self.format == MmFormat::Coordinate
            && matches!(self.field, MmField::Real | MmField::Integer)
            && self.symmetry == MmSymmetry::General
    }
}

impl fmt::Display for MatrixMarketBanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = match self.format {
            MmFormat::Coordinate => "coordinate",
            MmFormat::Array => "array",
        };
        let field = match self.field {
            MmField::Real => "real",
            MmField::Integer => "integer",
            MmField::Complex => "complex",
            MmField::Pattern => "pattern",
        };
        let symmetry = match self.symmetry {
            MmSymmetry::General => "general",
            MmSymmetry::Symmetric => "symmetric",
            MmSymmetry::SkewSymmetric => "skew-symmetric",
            MmSymmetry::Hermitian => "hermitian",
        };
        write!(f, "matrix {} {} {}", format, field, symmetry)
    }
}

impl FromStr for MatrixMarketBanner {
    type Err = SpmvError;

    /// Parses a banner line such as `%%MatrixMarket matrix coordinate real general`
    ///
    /// Descriptors are case-insensitive. A line that is not a banner at all is
    /// an [`SpmvError::InvalidBanner`]; a well-formed banner naming an unknown
    /// type is an [`SpmvError::UnsupportedType`].
    fn from_str(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if tokens.first() != Some(&BANNER_PREFIX) {
            return Err(SpmvError::InvalidBanner(format!(
                "expected {:?}, found {:?}",
                BANNER_PREFIX,
                line.trim()
            )));
        }
        if tokens.len() != 5 {
            return Err(SpmvError::InvalidBanner(format!(
                "expected 4 type descriptors, found {}",
                tokens.len() - 1
            )));
        }

        let words: Vec<String> = tokens[1..].iter().map(|t| t.to_ascii_lowercase()).collect();
        let unsupported = || SpmvError::UnsupportedType {
            typecode: words.join(" "),
        };

        if words[0] != "matrix" {
            return Err(unsupported());
        }
        let format = match words[1].as_str() {
            "coordinate" => MmFormat::Coordinate,
            "array" => MmFormat::Array,
            _ => return Err(unsupported()),
        };
        let field = match words[2].as_str() {
            "real" => MmField::Real,
            "integer" => MmField::Integer,
            "complex" => MmField::Complex,
            "pattern" => MmField::Pattern,
            _ => return Err(unsupported()),
        };
        let symmetry = match words[3].as_str() {
            "general" => MmSymmetry::General,
            "symmetric" => MmSymmetry::Symmetric,
            "skew-symmetric" => MmSymmetry::SkewSymmetric,
            "hermitian" => MmSymmetry::Hermitian,
            _ => return Err(unsupported()),
        };

        Ok(Self {
            format,
            field,
            symmetry,
        })
    }
}

/// Reads a coordinate matrix from a Matrix Market file
///
/// Indices are converted from 1-based to 0-based. Entries keep file order.
pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<CooMatrix<f64>> {
    let path = path.as_ref();
    let matrix = parse_matrix(open(path)?, path)?;
    log::debug!(
        "loaded {} x {} matrix with {} entries from {}",
        matrix.n_rows,
        matrix.n_cols,
        matrix.nnz(),
        path.display()
    );
    Ok(matrix)
}

/// Parses Matrix Market text from any reader
///
/// `origin` names the source in I/O error messages.
pub fn parse_matrix<R: BufRead>(reader: R, origin: &Path) -> Result<CooMatrix<f64>> {
    let mut lines = LineReader::new(reader, origin);

    let banner: MatrixMarketBanner = match lines.next_line()? {
        Some((_, line)) => line.parse()?,
        None => return Err(SpmvError::InvalidBanner("empty file".to_string())),
    };
    if !banner.is_supported() {
        return Err(SpmvError::UnsupportedType {
            typecode: banner.to_string(),
        });
    }

    // Size line: rows columns entries
    let (line_no, size_line) = lines
        .next_content_line(true)?
        .ok_or_else(|| SpmvError::parse(lines.line_no(), "missing size line"))?;
    let parts: Vec<&str> = size_line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(SpmvError::parse(line_no, "expected `rows columns nonzeros`"));
    }
    let n_rows: usize = parse_token(parts[0], "number of rows", line_no)?;
    let n_cols: usize = parse_token(parts[1], "number of columns", line_no)?;
    let nnz: usize = parse_token(parts[2], "number of nonzeros", line_no)?;

    // The declared count is untrusted; let the vectors grow past this
    let capacity = nnz.min(MAX_PREALLOCATED);
    let mut row_idx = Vec::with_capacity(capacity);
    let mut col_idx = Vec::with_capacity(capacity);
    let mut values = Vec::with_capacity(capacity);

    while values.len() < nnz {
        let (line_no, line) = lines.next_content_line(true)?.ok_or_else(|| {
            SpmvError::parse(
                lines.line_no(),
                format!("expected {} entries, found {}", nnz, values.len()),
            )
        })?;

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(SpmvError::parse(line_no, "expected `row column value`"));
        }
        let row: usize = parse_token(parts[0], "row index", line_no)?;
        let col: usize = parse_token(parts[1], "column index", line_no)?;
        let val: f64 = parse_token(parts[2], "value", line_no)?;

        if row == 0 || row > n_rows || col == 0 || col > n_cols {
            return Err(SpmvError::IndexOutOfBounds {
                line: line_no,
                row,
                col,
                n_rows,
                n_cols,
            });
        }

        // Convert from 1-indexed to 0-indexed
        row_idx.push(row - 1);
        col_idx.push(col - 1);
        values.push(val);
    }

    if let Some((line_no, _)) = lines.next_content_line(true)? {
        log::warn!(
            "{}: ignoring data after the declared {} entries (line {})",
            origin.display(),
            nnz,
            line_no
        );
    }

    Ok(CooMatrix::new(n_rows, n_cols, row_idx, col_idx, values))
}

/// Writes a matrix as `matrix coordinate real general`, entries in storage order
pub fn write_matrix<P: AsRef<Path>>(path: P, matrix: &CooMatrix<f64>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| SpmvError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_matrix_to(&mut writer, matrix)
        .and_then(|_| writer.flush())
        .map_err(|e| SpmvError::io(path, e))
}

/// Writes Matrix Market text to any writer
pub fn write_matrix_to<W: Write>(writer: &mut W, matrix: &CooMatrix<f64>) -> std::io::Result<()> {
    writeln!(writer, "{} {}", BANNER_PREFIX, MatrixMarketBanner::REAL_GENERAL)?;
    writeln!(writer, "{} {} {}", matrix.n_rows, matrix.n_cols, matrix.nnz())?;
    for (row, col, val) in matrix.entries() {
        writeln!(writer, "{} {} {}", row + 1, col + 1, val)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Result<CooMatrix<f64>> {
        parse_matrix(Cursor::new(text), Path::new("<test>"))
    }

    #[test]
    fn test_parse_scenario() {
        let text = "%%MatrixMarket matrix coordinate real general\n\
                    % a comment\n\
                    3 3 4\n\
                    1 1 2.0\n\
                    2 2 3.0\n\
                    3 1 1.0\n\
                    1 3 4.0\n";
        let matrix = parse(text).unwrap();

        assert_eq!(matrix.n_rows, 3);
        assert_eq!(matrix.n_cols, 3);
        assert_eq!(matrix.row_idx, vec![0, 1, 2, 0]);
        assert_eq!(matrix.col_idx, vec![0, 1, 0, 2]);
        assert_eq!(matrix.values, vec![2.0, 3.0, 1.0, 4.0]);
    }

    #[test]
    fn test_huge_declared_count_is_parse_error() {
        // 2^61 entries declared, one present
        let text = "%%MatrixMarket matrix coordinate real general\n\
                    2 2 2305843009213693952\n\
                    1 1 1.0\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, SpmvError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_banner_case_insensitive() {
        let banner: MatrixMarketBanner = "%%MatrixMarket MATRIX Coordinate Integer GENERAL"
            .parse()
            .unwrap();
        assert_eq!(banner.field, MmField::Integer);
        assert!(banner.is_supported());
    }

    #[test]
    fn test_rejects_complex() {
        let text = "%%MatrixMarket matrix coordinate complex general\n1 1 1\n1 1 1.0 0.0\n";
        match parse(text).unwrap_err() {
            SpmvError::UnsupportedType { typecode } => {
                assert_eq!(typecode, "matrix coordinate complex general")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rejects_symmetric_and_array() {
        for banner in [
            "%%MatrixMarket matrix coordinate real symmetric",
            "%%MatrixMarket matrix array real general",
            "%%MatrixMarket matrix coordinate pattern general",
            "%%MatrixMarket vector coordinate real general",
        ] {
            let text = format!("{}\n1 1 0\n", banner);
            assert!(
                matches!(parse(&text), Err(SpmvError::UnsupportedType { .. })),
                "{}",
                banner
            );
        }
    }

    #[test]
    fn test_rejects_missing_banner() {
        assert!(matches!(parse("3 3 0\n"), Err(SpmvError::InvalidBanner(_))));
        assert!(matches!(parse(""), Err(SpmvError::InvalidBanner(_))));
        assert!(matches!(
            parse("%%MatrixMarket matrix coordinate\n"),
            Err(SpmvError::InvalidBanner(_))
        ));
    }

    #[test]
    fn test_truncated_entries() {
        let text = "%%MatrixMarket matrix coordinate real general\n2 2 3\n1 1 1.0\n2 2 1.0\n";
        match parse(text).unwrap_err() {
            SpmvError::Parse { message, .. } => assert!(message.contains("expected 3 entries")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_index_out_of_bounds() {
        let text = "%%MatrixMarket matrix coordinate real general\n2 2 1\n3 1 1.0\n";
        assert!(matches!(
            parse(text),
            Err(SpmvError::IndexOutOfBounds { line: 3, row: 3, .. })
        ));

        let text = "%%MatrixMarket matrix coordinate real general\n2 2 1\n1 0 1.0\n";
        assert!(matches!(parse(text), Err(SpmvError::IndexOutOfBounds { col: 0, .. })));
    }

    #[test]
    fn test_bad_value() {
        let text = "%%MatrixMarket matrix coordinate real general\n1 1 1\n1 1 abc\n";
        assert!(matches!(parse(text), Err(SpmvError::Parse { line: 3, .. })));
    }

    #[test]
    fn test_write_then_parse() {
        let matrix = CooMatrix::from_triplets(2, 3, &[(1, 2, -0.125), (0, 0, 1e-9)]);
        let mut buf = Vec::new();
        write_matrix_to(&mut buf, &matrix).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("%%MatrixMarket matrix coordinate real general\n2 3 2\n"));
        assert_eq!(parse(&text).unwrap(), matrix);
    }
}
