use crate::SymNmfError;
use num_traits::Float;
use std::ops::{Index, IndexMut};

/// A dense, row-major matrix held in a single contiguous buffer.
///
/// Element `(i, j)` lives at `i * stride + j`. Every operation that produces a matrix
/// allocates a fresh buffer; nothing is computed in place except [`Matrix::copy_from`].
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
    stride: usize,
}

impl<T: Float> Matrix<T> {
    /// Allocates a zero-initialised matrix.
    ///
    /// # Returns
    /// * The matrix, or `SymNmfError::Allocation` if `rows * cols` overflows or the
    ///   buffer could not be reserved. No memory is retained on failure.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, SymNmfError> {
        let alloc_err = || SymNmfError::Allocation { rows, cols };
        let len = rows.checked_mul(cols).ok_or_else(alloc_err)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| alloc_err())?;
        data.resize(len, T::zero());
        Ok(Matrix {
            data,
            rows,
            cols,
            stride: cols,
        })
    }

    /// Allocates the n×n identity matrix.
    pub fn identity(n: usize) -> Result<Self, SymNmfError> {
        let mut matrix = Self::zeros(n, n)?;
        for i in 0..n {
            matrix[(i, i)] = T::one();
        }
        Ok(matrix)
    }

    /// Copies a collection of equally sized rows into a new matrix.
    ///
    /// # Examples
    /// ```
    ///use symnmf::Matrix;
    ///
    ///let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    ///assert_eq!(m[(1, 0)], 3.0);
    ///assert_eq!(m.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    /// ```
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, SymNmfError> {
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut matrix = Self::zeros(rows.len(), n_cols)?;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(SymNmfError::WrongDimension(format!(
                    "0th row has {n_cols} columns, but {i}th has {}",
                    row.len()
                )));
            }
            matrix.row_mut(i).copy_from_slice(row);
        }
        Ok(matrix)
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The element at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.stride + col)
        } else {
            None
        }
    }

    /// Overwrites the element at `(row, col)`. Returns `false` when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> bool {
        if row < self.rows && col < self.cols {
            self.data[row * self.stride + col] = value;
            true
        } else {
            false
        }
    }

    pub fn row(&self, i: usize) -> &[T] {
        let start = i * self.stride;
        &self.data[start..start + self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        let start = i * self.stride;
        &mut self.data[start..start + self.cols]
    }

    /// Iterates over every element in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.rows).flat_map(move |i| self.row(i).iter())
    }

    /// Dense matrix product `self · rhs`.
    ///
    /// # Returns
    /// * A new `rows(self) × cols(rhs)` matrix, or `SymNmfError::WrongDimension` if the
    ///   inner dimensions differ.
    pub fn multiply(&self, rhs: &Matrix<T>) -> Result<Matrix<T>, SymNmfError> {
        if self.cols != rhs.rows {
            return Err(SymNmfError::WrongDimension(format!(
                "cannot multiply a {}x{} matrix by a {}x{} matrix",
                self.rows, self.cols, rhs.rows, rhs.cols
            )));
        }
        let mut product = Matrix::zeros(self.rows, rhs.cols)?;
        for i in 0..self.rows {
            let lhs_row = self.row(i);
            let out_row = product.row_mut(i);
            // i-k-j order walks both rhs and the output row contiguously
            for (k, &a) in lhs_row.iter().enumerate() {
                for (out, &b) in out_row.iter_mut().zip(rhs.row(k)) {
                    *out = *out + a * b;
                }
            }
        }
        Ok(product)
    }

    pub fn transpose(&self) -> Result<Matrix<T>, SymNmfError> {
        let mut transposed = Matrix::zeros(self.cols, self.rows)?;
        for i in 0..self.rows {
            for (j, &value) in self.row(i).iter().enumerate() {
                transposed[(j, i)] = value;
            }
        }
        Ok(transposed)
    }

    /// Overwrites `self` elementwise with `src`. Both must have the same shape.
    pub fn copy_from(&mut self, src: &Matrix<T>) -> Result<(), SymNmfError> {
        if self.rows != src.rows || self.cols != src.cols {
            return Err(SymNmfError::WrongDimension(format!(
                "cannot copy a {}x{} matrix into a {}x{} matrix",
                src.rows, src.cols, self.rows, self.cols
            )));
        }
        for i in 0..self.rows {
            self.row_mut(i).copy_from_slice(src.row(i));
        }
        Ok(())
    }

    /// Whether the matrix is square and `|m[i][j] - m[j][i]| <= tolerance` everywhere.
    pub fn is_symmetric(&self, tolerance: T) -> bool {
        if self.rows != self.cols {
            return false;
        }
        (0..self.rows).all(|i| {
            (i + 1..self.cols).all(|j| (self[(i, j)] - self[(j, i)]).abs() <= tolerance)
        })
    }

    /// Mean of all entries, or zero for an empty matrix.
    pub fn mean(&self) -> T {
        let len = self.rows * self.cols;
        if len == 0 {
            return T::zero();
        }
        let sum = self.iter().fold(T::zero(), |acc, &x| acc + x);
        sum / T::from(len).unwrap_or(T::one())
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(col < self.cols);
        &self.data[row * self.stride + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(col < self.cols);
        &mut self.data[row * self.stride + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Matrix<f64> {
        Matrix::from_rows(&[
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.5],
        ])
        .unwrap()
    }

    #[test]
    fn zeros_has_requested_shape() {
        let m: Matrix<f64> = Matrix::zeros(3, 2).unwrap();
        assert_eq!((3, 2), (m.rows(), m.cols()));
        assert!(m.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn zeros_reports_overflowing_shape() {
        let result: Result<Matrix<f64>, _> = Matrix::zeros(usize::MAX, 2);
        assert_eq!(
            Err(SymNmfError::Allocation {
                rows: usize::MAX,
                cols: 2
            }),
            result
        );
    }

    #[test]
    fn multiply_by_identity() {
        let a = sample();
        let identity = Matrix::identity(3).unwrap();
        assert_eq!(a, a.multiply(&identity).unwrap());
        assert_eq!(a, identity.multiply(&a).unwrap());
    }

    #[test]
    fn multiply_rectangular() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let b = Matrix::from_rows(&[vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]]).unwrap();
        let c = a.multiply(&b).unwrap();
        assert_eq!(vec![vec![58.0, 64.0], vec![139.0, 154.0]], c.to_rows());
    }

    #[test]
    fn multiply_rejects_mismatched_inner_dimension() {
        let a: Matrix<f64> = Matrix::zeros(2, 3).unwrap();
        let b: Matrix<f64> = Matrix::zeros(2, 3).unwrap();
        assert!(matches!(a.multiply(&b), Err(SymNmfError::WrongDimension(_))));
    }

    #[test]
    fn transpose_twice_is_identity() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let t = a.transpose().unwrap();
        assert_eq!((3, 2), (t.rows(), t.cols()));
        assert_eq!(6.0, t[(2, 1)]);
        assert_eq!(a, t.transpose().unwrap());
    }

    #[test]
    fn copy_from_overwrites_and_checks_shape() {
        let src = sample();
        let mut dest = Matrix::zeros(3, 3).unwrap();
        dest.copy_from(&src).unwrap();
        assert_eq!(src, dest);

        let mut wrong: Matrix<f64> = Matrix::zeros(2, 3).unwrap();
        assert!(wrong.copy_from(&src).is_err());
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let result = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(result, Err(SymNmfError::WrongDimension(_))));
    }

    #[test]
    fn symmetry_and_mean() {
        let sym = Matrix::from_rows(&[vec![0.0, 2.0], vec![2.0, 4.0]]).unwrap();
        assert!(sym.is_symmetric(0.0));
        assert!(!sample().is_symmetric(1e-9));
        assert_relative_eq!(2.0, sym.mean());
    }

    #[test]
    fn get_and_set_check_bounds() {
        let mut m = sample();
        assert_eq!(Some(&6.0), m.get(1, 2));
        assert_eq!(None, m.get(3, 0));
        assert_eq!(None, m.get(0, 3));
        assert!(m.set(2, 1, -1.0));
        assert_eq!(-1.0, m[(2, 1)]);
        assert!(!m.set(0, 5, 1.0));
    }
}
