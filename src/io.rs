//! Reading point files and formatting matrices for output.
//!
//! The input format is plain text: one point per line, coordinates
//! comma-separated, no header. Every row must have the same number of
//! coordinates; ragged or non-numeric input is rejected before any matrix
//! is constructed.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use ndarray::{Array2, ArrayBase, Data, Ix2};

use crate::error::{Error, Result};
use crate::Float;

/// Parses a comma-separated point set into an `n x d` matrix.
///
/// Fails with [`Error::InputFormat`] on empty input, rows with a differing
/// coordinate count, or fields that do not parse as floating point numbers.
pub fn parse_points(input: &str) -> Result<Array2<f64>> {
    let mut values = Vec::new();
    let mut n_rows = 0;
    let mut n_cols = None;

    for (line_index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            return Err(Error::InputFormat(format!(
                "line {} is empty",
                line_index + 1
            )));
        }
        let mut row_len = 0;
        for field in line.split(',') {
            let value = field.trim().parse::<f64>().map_err(|_| {
                Error::InputFormat(format!(
                    "line {}: '{}' is not a number",
                    line_index + 1,
                    field
                ))
            })?;
            values.push(value);
            row_len += 1;
        }
        match n_cols {
            None => n_cols = Some(row_len),
            Some(expected) if expected != row_len => {
                return Err(Error::InputFormat(format!(
                    "line {} has {} coordinates, expected {}",
                    line_index + 1,
                    row_len,
                    expected
                )));
            }
            Some(_) => {}
        }
        n_rows += 1;
    }

    let n_cols = n_cols.ok_or_else(|| Error::InputFormat("no points in input".into()))?;
    Array2::from_shape_vec((n_rows, n_cols), values)
        .map_err(|e| Error::InputFormat(e.to_string()))
}

/// Reads a point file from disk. See [`parse_points`] for the format.
pub fn read_points<P: AsRef<Path>>(path: P) -> Result<Array2<f64>> {
    let contents = fs::read_to_string(path).map_err(|e| Error::InputFormat(e.to_string()))?;
    parse_points(&contents)
}

/// Formats a matrix as comma-joined rows with four decimal places, the
/// output format shared by all matrix-printing goals.
pub fn format_matrix<F: Float>(matrix: &ArrayBase<impl Data<Elem = F>, Ix2>) -> String {
    let mut out = String::new();
    for row in matrix.rows() {
        for (j, value) in row.iter().enumerate() {
            if j > 0 {
                out.push(',');
            }
            let _ = write!(out, "{:.4}", value);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn parses_a_simple_point_set() {
        let points = parse_points("1.0,2.0\n3.5,-4.25\n0,0\n").unwrap();
        assert_eq!(points.dim(), (3, 2));
        assert_abs_diff_eq!(points, array![[1.0, 2.0], [3.5, -4.25], [0.0, 0.0]]);
    }

    #[test]
    fn single_column_rows_are_fine() {
        let points = parse_points("1.0\n2.0\n").unwrap();
        assert_eq!(points.dim(), (2, 1));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let res = parse_points("1.0,2.0\n3.0\n");
        assert!(matches!(res, Err(Error::InputFormat(_))));
    }

    #[test]
    fn non_numeric_fields_are_rejected() {
        let res = parse_points("1.0,two\n");
        assert!(matches!(res, Err(Error::InputFormat(_))));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(parse_points(""), Err(Error::InputFormat(_))));
        assert!(matches!(parse_points("\n"), Err(Error::InputFormat(_))));
    }

    #[test]
    fn formats_rows_to_four_decimals() {
        let matrix = array![[0.0, 0.123456], [1.0, 2.5]];
        assert_eq!(format_matrix(&matrix), "0.0000,0.1235\n1.0000,2.5000\n");
    }
}
