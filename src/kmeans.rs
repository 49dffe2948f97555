use crate::distance::{euclidean_distance, squared_euclidean_distance};
use crate::validation::DataValidator;
use crate::SymNmfError;
use num_traits::Float;

const MAX_ITER_DEFAULT: usize = 300;
const TOLERANCE_DEFAULT: f64 = 1e-4;

/// Lloyd's k-means, used as a baseline to compare SymNMF labellings against.
///
/// The first `k` data points seed the centroids, so results are deterministic. The loop
/// stops once no centroid moves by `tolerance` or more, or after `max_iter` rounds.
#[derive(Debug, Clone)]
pub struct KMeans {
    k: usize,
    max_iter: usize,
    tolerance: f64,
}

/// Labels and centroids found by [`KMeans::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansResult<T> {
    pub labels: Vec<usize>,
    pub centroids: Vec<Vec<T>>,
    pub iterations: usize,
}

impl KMeans {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: MAX_ITER_DEFAULT,
            tolerance: TOLERANCE_DEFAULT,
        }
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter.max(1);
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Clusters `data` into `k` groups.
    ///
    /// # Examples
    /// ```
    ///use symnmf::KMeans;
    ///
    ///let data = vec![vec![0.0, 0.0], vec![9.0, 9.0], vec![0.0, 1.0], vec![9.0, 8.0]];
    ///let result = KMeans::new(2).fit(&data).unwrap();
    ///assert_eq!(vec![0, 1, 0, 1], result.labels);
    /// ```
    pub fn fit<T: Float>(&self, data: &[Vec<T>]) -> Result<KMeansResult<T>, SymNmfError> {
        let validator = DataValidator::new(data);
        validator.validate_input_data()?;
        validator.validate_rank(self.k)?;
        let tolerance = T::from(self.tolerance).unwrap_or_else(T::epsilon);
        let n_dims = data[0].len();

        let mut centroids: Vec<Vec<T>> = data[..self.k].to_vec();
        let mut labels = vec![0usize; data.len()];
        let mut iterations = 0;

        while iterations < self.max_iter {
            iterations += 1;
            for (label, point) in labels.iter_mut().zip(data) {
                *label = nearest_centroid(point, &centroids);
            }

            let mut sums = vec![vec![T::zero(); n_dims]; self.k];
            let mut counts = vec![0usize; self.k];
            for (point, &label) in data.iter().zip(&labels) {
                counts[label] += 1;
                for (sum, &x) in sums[label].iter_mut().zip(point) {
                    *sum = *sum + x;
                }
            }

            let mut max_shift = T::zero();
            for ((centroid, sum), &count) in centroids.iter_mut().zip(sums).zip(&counts) {
                // An empty cluster keeps its previous centroid
                if count == 0 {
                    continue;
                }
                let count = T::from(count).unwrap_or(T::one());
                let updated: Vec<T> = sum.into_iter().map(|s| s / count).collect();
                max_shift = max_shift.max(euclidean_distance(centroid, &updated));
                *centroid = updated;
            }
            if max_shift < tolerance {
                break;
            }
        }
        for (label, point) in labels.iter_mut().zip(data) {
            *label = nearest_centroid(point, &centroids);
        }
        tracing::debug!(iterations, k = self.k, "k-means finished");

        Ok(KMeansResult {
            labels,
            centroids,
            iterations,
        })
    }
}

fn nearest_centroid<T: Float>(point: &[T], centroids: &[Vec<T>]) -> usize {
    let mut best_cluster = 0;
    let mut best_dist = T::infinity();
    for (c, centroid) in centroids.iter().enumerate() {
        let dist = squared_euclidean_distance(point, centroid);
        if dist < best_dist {
            best_dist = dist;
            best_cluster = c;
        }
    }
    best_cluster
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_blobs() {
        let data = vec![
            vec![1.0, 1.0],
            vec![1.2, 0.8],
            vec![8.0, 8.0],
            vec![0.9, 1.1],
            vec![8.2, 7.9],
            vec![7.8, 8.1],
        ];
        let result = KMeans::new(2).fit(&data).unwrap();
        assert_eq!(vec![0, 0, 1, 0, 1, 1], result.labels);
        assert!((result.centroids[1][0] - 8.0).abs() < 1e-9);
        assert!(result.iterations < 10);
    }

    #[test]
    fn k_larger_than_dataset() {
        let data = vec![vec![1.0], vec![2.0]];
        assert_eq!(
            Err(SymNmfError::InvalidRank { k: 3, n: 2 }),
            KMeans::new(3).fit(&data)
        );
    }
}
