use crate::validation::validate_rank;
use crate::{Matrix, SymNmfError};
use num_traits::Float;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Draws a random starting point for the factorization.
///
/// Entries are uniform in `[0, 2·√(mean(W)/k))`, which puts `HHᵀ` on the same scale as
/// `W`. The same seed always gives the same matrix.
///
/// # Parameters
/// * `w` - the n×n normalized matrix to be factorized.
/// * `k` - the number of clusters, 1 ≤ k ≤ n.
/// * `seed` - the random seed.
///
/// # Returns
/// * The n×k initial factor matrix.
pub fn random_factor<T: Float>(
    w: &Matrix<T>,
    k: usize,
    seed: u64,
) -> Result<Matrix<T>, SymNmfError> {
    let n_samples = w.rows();
    validate_rank(k, n_samples)?;
    let k_float = T::from(k).unwrap_or(T::one());
    let two = T::one() + T::one();
    let upper = (two * (w.mean() / k_float).sqrt()).to_f64().unwrap_or(0.0);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut h = Matrix::zeros(n_samples, k)?;
    if upper > 0.0 && upper.is_finite() {
        for i in 0..n_samples {
            for value in h.row_mut(i) {
                *value = T::from(rng.random_range(0.0..upper)).unwrap_or(T::zero());
            }
        }
    }
    Ok(h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalized_matrix;

    fn w() -> Matrix<f64> {
        normalized_matrix(&[vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]])
            .unwrap()
    }

    #[test]
    fn bounded_and_reproducible() {
        let w = w();
        let k = 2;
        let h = random_factor(&w, k, 0).unwrap();
        assert_eq!((4, 2), (h.rows(), h.cols()));
        let upper = 2.0 * (w.mean() / k as f64).sqrt();
        assert!(h.iter().all(|&x| (0.0..upper).contains(&x)));
        assert_eq!(h, random_factor(&w, k, 0).unwrap());
        assert_ne!(h, random_factor(&w, k, 1).unwrap());
    }

    #[test]
    fn rejects_invalid_rank() {
        assert_eq!(
            Err(SymNmfError::InvalidRank { k: 5, n: 4 }),
            random_factor(&w(), 5, 0)
        );
    }
}
