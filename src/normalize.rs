use crate::similarity::similarity_matrix;
use crate::{Matrix, SymNmfError};
use num_traits::Float;

/// Computes the diagonal degree matrix of a similarity matrix: `D[i][i] = Σⱼ A[i][j]`.
pub fn degree_matrix<T: Float>(similarity: &Matrix<T>) -> Result<Matrix<T>, SymNmfError> {
    check_square(similarity)?;
    let n_samples = similarity.rows();
    let mut degree = Matrix::zeros(n_samples, n_samples)?;
    for i in 0..n_samples {
        degree[(i, i)] = row_sum(similarity.row(i));
    }
    Ok(degree)
}

/// Builds the normalized affinity matrix `W = D^(-1/2) · A · D^(-1/2)` for a dataset.
///
/// # Returns
/// * The n×n normalized matrix, or `SymNmfError::DegenerateGraph` if some point has zero
///   similarity to every other point.
///
/// # Examples
/// ```
///use symnmf::normalized_matrix;
///
///let data = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0]];
///let w = normalized_matrix(&data).unwrap();
///assert!(w.is_symmetric(1e-12));
///assert!(w.iter().all(|&x| (0.0..=1.0).contains(&x)));
/// ```
pub fn normalized_matrix<T: Float>(data: &[Vec<T>]) -> Result<Matrix<T>, SymNmfError> {
    let similarity = similarity_matrix(data)?;
    normalize_similarity(&similarity)
}

/// Normalizes an existing similarity matrix. See [`normalized_matrix`].
pub fn normalize_similarity<T: Float>(similarity: &Matrix<T>) -> Result<Matrix<T>, SymNmfError> {
    let mut inv_sqrt_degree = degree_matrix(similarity)?;
    for i in 0..inv_sqrt_degree.rows() {
        let degree = inv_sqrt_degree[(i, i)];
        if degree <= T::zero() {
            return Err(SymNmfError::DegenerateGraph { point: i });
        }
        let scale = T::one() / degree.sqrt();
        if !scale.is_finite() {
            return Err(SymNmfError::DegenerateGraph { point: i });
        }
        inv_sqrt_degree[(i, i)] = scale;
    }
    let left = inv_sqrt_degree.multiply(similarity)?;
    let normalized = left.multiply(&inv_sqrt_degree)?;
    tracing::debug!(n_samples = normalized.rows(), "normalized similarity matrix");
    Ok(normalized)
}

fn row_sum<T: Float>(row: &[T]) -> T {
    row.iter().fold(T::zero(), |acc, &x| acc + x)
}

fn check_square<T: Float>(matrix: &Matrix<T>) -> Result<(), SymNmfError> {
    if matrix.rows() != matrix.cols() {
        return Err(SymNmfError::WrongDimension(format!(
            "similarity matrix must be square, got {}x{}",
            matrix.rows(),
            matrix.cols()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn blobs() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![0.5, 0.0],
            vec![0.0, 0.5],
            vec![2.0, 2.0],
            vec![2.5, 2.0],
        ]
    }

    #[test]
    fn degree_is_diagonal_row_sum() {
        let a = similarity_matrix(&blobs()).unwrap();
        let d = degree_matrix(&a).unwrap();
        for i in 0..a.rows() {
            let expected: f64 = a.row(i).iter().sum();
            assert_relative_eq!(expected, d[(i, i)], max_relative = 1e-12);
            for j in 0..a.cols() {
                if i != j {
                    assert_eq!(0.0, d[(i, j)]);
                }
            }
        }
    }

    #[test]
    fn normalized_is_symmetric_finite_and_bounded() {
        let w = normalized_matrix(&blobs()).unwrap();
        assert!(w.is_symmetric(1e-12));
        assert!(w.iter().all(|x| x.is_finite() && *x >= 0.0 && *x <= 1.0));
        for i in 0..w.rows() {
            assert_eq!(0.0, w[(i, i)]);
        }
    }

    #[test]
    fn normalized_entries_match_definition() {
        let data = blobs();
        let a = similarity_matrix(&data).unwrap();
        let d = degree_matrix(&a).unwrap();
        let w = normalize_similarity(&a).unwrap();
        let expected = a[(0, 3)] / (d[(0, 0)] * d[(3, 3)]).sqrt();
        assert_relative_eq!(expected, w[(0, 3)], max_relative = 1e-12);
    }

    #[test]
    fn isolated_point_is_degenerate() {
        let data = vec![vec![0.0, 0.0], vec![0.0, 0.0], vec![100.0, 100.0]];
        assert_eq!(
            Err(SymNmfError::DegenerateGraph { point: 2 }),
            normalized_matrix(&data)
        );
    }

    #[test]
    fn single_point_is_degenerate() {
        assert_eq!(
            Err(SymNmfError::DegenerateGraph { point: 0 }),
            normalized_matrix(&[vec![1.0f64]])
        );
    }

    #[test]
    fn degree_rejects_rectangular_input() {
        let m: Matrix<f64> = Matrix::zeros(2, 3).unwrap();
        assert!(matches!(degree_matrix(&m), Err(SymNmfError::WrongDimension(_))));
    }
}
