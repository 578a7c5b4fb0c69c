//! Flat-text dataset loaders and bundled sample generators.
//!
//! Every data file is numeric, one sample per line, whitespace or tab
//! separated. Blank lines are skipped. Tab-separated lines keep empty
//! fields; an empty field or a literal `?` reads as 0.0, the missing-value
//! encoding of the colic schema.
//!
//! The [`samples`] submodule generates deterministic stand-ins with the same
//! schemas as the files bundled under `data/`.

use std::path::Path;

use crate::error::{EstudioError, Result};
use crate::primitives::{Matrix, Vector};

pub mod samples;

/// Loads a numeric file as a row-major matrix.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, `InvalidRecord` (with the
/// 1-based line number) for a malformed field or a ragged row, and an error
/// for a file with no data rows.
pub fn load_matrix(path: impl AsRef<Path>) -> Result<Matrix<f32>> {
    let rows = read_rows(path.as_ref())?;
    let n_rows = rows.len();
    let n_cols = rows[0].1.len();

    let mut data = Vec::with_capacity(n_rows * n_cols);
    for (_, fields) in rows {
        data.extend(fields);
    }

    Matrix::from_vec(n_rows, n_cols, data).map_err(EstudioError::from)
}

/// Loads a numeric file whose last column is the regression target.
///
/// Returns the feature matrix and the target vector.
///
/// # Errors
///
/// Same conditions as [`load_matrix`], plus an error when the file has
/// fewer than two columns.
pub fn load_xy(path: impl AsRef<Path>) -> Result<(Matrix<f32>, Vector<f32>)> {
    let rows = read_rows(path.as_ref())?;
    let n_features = feature_width(&rows)?;
    let n_rows = rows.len();

    let mut x = Vec::with_capacity(n_rows * n_features);
    let mut y = Vec::with_capacity(n_rows);
    for (_, fields) in rows {
        x.extend_from_slice(&fields[..n_features]);
        y.push(fields[n_features]);
    }

    let x = Matrix::from_vec(n_rows, n_features, x).map_err(EstudioError::from)?;
    Ok((x, Vector::from_vec(y)))
}

/// Loads a numeric file whose last column is a 0/1 class label.
///
/// Returns the feature matrix and the label vector.
///
/// # Errors
///
/// Same conditions as [`load_xy`], plus `InvalidRecord` when a label value
/// is anything other than 0 or 1.
pub fn load_labeled(path: impl AsRef<Path>) -> Result<(Matrix<f32>, Vec<usize>)> {
    let rows = read_rows(path.as_ref())?;
    let n_features = feature_width(&rows)?;
    let n_rows = rows.len();

    let mut x = Vec::with_capacity(n_rows * n_features);
    let mut y = Vec::with_capacity(n_rows);
    for (line_no, fields) in rows {
        let label = fields[n_features];
        if label != 0.0 && label != 1.0 {
            return Err(EstudioError::invalid_record(
                line_no,
                format!("class label must be 0 or 1, got {label}"),
            ));
        }
        x.extend_from_slice(&fields[..n_features]);
        y.push(label as usize);
    }

    let x = Matrix::from_vec(n_rows, n_features, x).map_err(EstudioError::from)?;
    Ok((x, y))
}

/// Reads all non-blank lines as numeric rows, keeping 1-based line numbers
/// for error reporting and enforcing a consistent width.
fn read_rows(path: &Path) -> Result<Vec<(usize, Vec<f32>)>> {
    let text = std::fs::read_to_string(path)?;
    let mut rows: Vec<(usize, Vec<f32>)> = Vec::new();
    let mut width = 0usize;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields = parse_line(line, line_no)?;
        if rows.is_empty() {
            width = fields.len();
        } else if fields.len() != width {
            return Err(EstudioError::invalid_record(
                line_no,
                format!("expected {width} fields, got {}", fields.len()),
            ));
        }
        rows.push((line_no, fields));
    }

    if rows.is_empty() {
        return Err(EstudioError::empty_input("data file has no rows"));
    }

    Ok(rows)
}

fn parse_line(line: &str, line_no: usize) -> Result<Vec<f32>> {
    // Tab-separated lines keep empty fields; split_whitespace would swallow
    // the colic missing-value slots.
    if line.contains('\t') {
        line.split('\t')
            .map(|tok| parse_field(tok, line_no))
            .collect()
    } else {
        line.split_whitespace()
            .map(|tok| parse_field(tok, line_no))
            .collect()
    }
}

fn parse_field(tok: &str, line_no: usize) -> Result<f32> {
    let tok = tok.trim();
    if tok.is_empty() || tok == "?" {
        return Ok(0.0);
    }
    tok.parse::<f32>().map_err(|_| {
        EstudioError::invalid_record(line_no, format!("expected a number, got '{tok}'"))
    })
}

fn feature_width(rows: &[(usize, Vec<f32>)]) -> Result<usize> {
    let width = rows[0].1.len();
    if width < 2 {
        return Err(EstudioError::invalid_record(
            rows[0].0,
            "need at least two columns (features and target)",
        ));
    }
    Ok(width - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().expect("create temp file");
        f.write_all(contents.as_bytes()).expect("write temp file");
        f
    }

    #[test]
    fn test_load_matrix_whitespace_separated() {
        let f = write_temp("1.0 2.0\n3.0 4.0\n");
        let m = load_matrix(f.path()).expect("load should succeed");
        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m.get(1, 0), 3.0);
    }

    #[test]
    fn test_load_matrix_skips_blank_lines() {
        let f = write_temp("1.0 2.0\n\n   \n3.0 4.0\n");
        let m = load_matrix(f.path()).expect("load should succeed");
        assert_eq!(m.shape(), (2, 2));
    }

    #[test]
    fn test_load_matrix_missing_values_read_as_zero() {
        let f = write_temp("1.0\t?\t3.0\n4.0\t\t6.0\n");
        let m = load_matrix(f.path()).expect("load should succeed");
        assert_eq!(m.get(0, 1), 0.0);
        assert_eq!(m.get(1, 1), 0.0);
        assert_eq!(m.get(1, 2), 6.0);
    }

    #[test]
    fn test_load_matrix_reports_line_number() {
        let f = write_temp("1.0 2.0\nfoo 4.0\n");
        let err = load_matrix(f.path()).unwrap_err();
        match err {
            EstudioError::InvalidRecord { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("foo"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_matrix_rejects_ragged_rows() {
        let f = write_temp("1.0 2.0\n3.0 4.0 5.0\n");
        let err = load_matrix(f.path()).unwrap_err();
        match err {
            EstudioError::InvalidRecord { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_matrix_empty_file() {
        let f = write_temp("\n   \n");
        assert!(load_matrix(f.path()).is_err());
    }

    #[test]
    fn test_load_matrix_missing_file_is_io_error() {
        let err = load_matrix("/no/such/file.txt").unwrap_err();
        assert!(matches!(err, EstudioError::Io(_)));
    }

    #[test]
    fn test_load_xy_splits_target() {
        let f = write_temp("1.0 2.0 3.0\n4.0 5.0 6.0\n");
        let (x, y) = load_xy(f.path()).expect("load should succeed");
        assert_eq!(x.shape(), (2, 2));
        assert_eq!(y.as_slice(), &[3.0, 6.0]);
    }

    #[test]
    fn test_load_xy_rejects_single_column() {
        let f = write_temp("1.0\n2.0\n");
        assert!(load_xy(f.path()).is_err());
    }

    #[test]
    fn test_load_labeled_binary() {
        let f = write_temp("0.5 1.5 1\n0.7 0.2 0\n");
        let (x, y) = load_labeled(f.path()).expect("load should succeed");
        assert_eq!(x.shape(), (2, 2));
        assert_eq!(y, vec![1, 0]);
    }

    #[test]
    fn test_load_labeled_rejects_non_binary_label() {
        let f = write_temp("0.5 1.5 1\n0.7 0.2 2\n");
        let err = load_labeled(f.path()).unwrap_err();
        match err {
            EstudioError::InvalidRecord { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("0 or 1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
