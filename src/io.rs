//! Plain-text dataset input and matrix output.
//!
//! Datasets are comma-separated values, one point per line. Matrices are written back in
//! the same layout with four decimal places per entry.

use crate::{Matrix, SymNmfError};
use num_traits::Float;
use std::fmt::Display;
use std::fs;
use std::path::Path;

/// Finds the number of points and the number of coordinates of a dataset without
/// parsing its values. The dimension is taken from the first line; blank lines are not
/// counted as points.
///
/// # Examples
/// ```
///use symnmf::io::discover_dimensions;
///
///assert_eq!((3, 2), discover_dimensions("1,2\n3,4\n5,6\n").unwrap());
/// ```
pub fn discover_dimensions(text: &str) -> Result<(usize, usize), SymNmfError> {
    let first = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| SymNmfError::FileFormat(String::from("file is empty")))?;
    let n_dims = first.matches(',').count() + 1;
    let n_samples = text.lines().filter(|line| !line.trim().is_empty()).count();
    Ok((n_samples, n_dims))
}

/// Parses a comma-separated dataset.
///
/// # Returns
/// * The data points, or `SymNmfError::FileFormat` naming the first offending line if the
///   file is empty, a value is not a number, or a line has the wrong number of values.
pub fn parse_dataset(text: &str) -> Result<Vec<Vec<f64>>, SymNmfError> {
    let (n_samples, n_dims) = discover_dimensions(text)?;
    let mut data = Vec::with_capacity(n_samples);
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let point = line
            .split(',')
            .map(|value| {
                value.trim().parse::<f64>().map_err(|_| {
                    SymNmfError::FileFormat(format!(
                        "line {}: '{}' is not a number",
                        line_no + 1,
                        value.trim()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if point.len() != n_dims {
            return Err(SymNmfError::FileFormat(format!(
                "line {}: expected {n_dims} values, found {}",
                line_no + 1,
                point.len()
            )));
        }
        data.push(point);
    }
    Ok(data)
}

/// Reads and parses a comma-separated dataset file.
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<f64>>, SymNmfError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| {
        SymNmfError::FileFormat(format!("cannot read {}: {err}", path.display()))
    })?;
    parse_dataset(&text)
}

/// Renders a matrix as comma-separated values with four decimal places, one row per
/// line and no separator after the last column.
///
/// # Examples
/// ```
///use symnmf::{io::format_matrix, Matrix};
///
///let m = Matrix::from_rows(&[vec![1.0, 0.123456], vec![-2.5, 3.0]]).unwrap();
///assert_eq!("1.0000,0.1235\n-2.5000,3.0000\n", format_matrix(&m));
/// ```
pub fn format_matrix<T: Float + Display>(matrix: &Matrix<T>) -> String {
    let mut out = String::new();
    for i in 0..matrix.rows() {
        let row: Vec<String> = matrix.row(i).iter().map(|x| format!("{x:.4}")).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}
