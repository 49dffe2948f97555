use crate::distance::squared_euclidean_distance;
use crate::{Matrix, SymNmfError};
use num_traits::Float;

/// Builds the Gaussian-kernel similarity matrix `A[i][j] = exp(-½‖xᵢ − xⱼ‖²)`.
///
/// Only the upper triangle is evaluated and then mirrored. The diagonal stays at zero so
/// that a point never contributes to its own degree.
///
/// # Parameters
/// * `data` - the data points, all of the same dimensionality. Checked by the caller.
///
/// # Returns
/// * The n×n similarity matrix, or `SymNmfError::Allocation`.
pub fn similarity_matrix<T: Float>(data: &[Vec<T>]) -> Result<Matrix<T>, SymNmfError> {
    let n_samples = data.len();
    let mut similarity = Matrix::zeros(n_samples, n_samples)?;
    let half = T::from(0.5).unwrap_or_else(|| T::one() / (T::one() + T::one()));
    for i in 0..n_samples {
        for j in i + 1..n_samples {
            let value = (-half * squared_euclidean_distance(&data[i], &data[j])).exp();
            similarity[(i, j)] = value;
            similarity[(j, i)] = value;
        }
    }
    tracing::debug!(n_samples, "built similarity matrix");
    Ok(similarity)
}
