use crate::distance::euclidean_distance;
use crate::{Matrix, SymNmfError};
use num_traits::Float;
use std::collections::HashSet;

/// Turns a soft assignment into hard cluster labels: each point goes to the column of its
/// row in `h` with the largest value. Ties go to the lowest column.
///
/// # Examples
/// ```
///use symnmf::{hard_labels, Matrix};
///
///let h = Matrix::from_rows(&[vec![0.9, 0.1], vec![0.2, 0.7], vec![0.5, 0.5]]).unwrap();
///assert_eq!(vec![0, 1, 0], hard_labels(&h));
/// ```
pub fn hard_labels<T: Float>(h: &Matrix<T>) -> Vec<usize> {
    (0..h.rows())
        .map(|i| {
            h.row(i)
                .iter()
                .enumerate()
                .fold((0, T::neg_infinity()), |(best, best_val), (j, &val)| {
                    if val > best_val {
                        (j, val)
                    } else {
                        (best, best_val)
                    }
                })
                .0
        })
        .collect()
}

/// Computes the mean silhouette coefficient of a labelling, using Euclidean distance.
///
/// For each point, `a` is its mean distance to the rest of its cluster and `b` the lowest
/// mean distance to any other cluster; its coefficient is `(b − a) / max(a, b)`, or zero
/// when it is alone in its cluster.
///
/// # Returns
/// * A score in [-1, 1], or `SymNmfError::InvalidLabels` if the label count does not match
///   the data or the number of distinct labels is not between 2 and n − 1.
pub fn silhouette_score<T: Float>(data: &[Vec<T>], labels: &[usize]) -> Result<T, SymNmfError> {
    let n_samples = data.len();
    if labels.len() != n_samples {
        return Err(SymNmfError::InvalidLabels(format!(
            "{} labels given for {n_samples} data points",
            labels.len()
        )));
    }
    let n_labels = labels.iter().collect::<HashSet<_>>().len();
    if n_labels < 2 || n_labels >= n_samples {
        return Err(SymNmfError::InvalidLabels(format!(
            "number of distinct labels is {n_labels}, but must be between 2 and {}",
            n_samples.saturating_sub(1)
        )));
    }
    let n_clusters = labels.iter().max().map_or(0, |max| max + 1);
    let mut cluster_sizes = vec![0usize; n_clusters];
    labels.iter().for_each(|&label| cluster_sizes[label] += 1);

    let mut total = T::zero();
    for (i, point) in data.iter().enumerate() {
        let own = labels[i];
        if cluster_sizes[own] == 1 {
            continue;
        }
        let mut dist_sums = vec![T::zero(); n_clusters];
        for (j, other) in data.iter().enumerate() {
            if i != j {
                dist_sums[labels[j]] = dist_sums[labels[j]] + euclidean_distance(point, other);
            }
        }
        let a = dist_sums[own] / to_float::<T>(cluster_sizes[own] - 1);
        let b = (0..n_clusters)
            .filter(|&c| c != own && cluster_sizes[c] > 0)
            .map(|c| dist_sums[c] / to_float::<T>(cluster_sizes[c]))
            .fold(T::infinity(), T::min);
        let denom = a.max(b);
        if denom > T::zero() {
            total = total + (b - a) / denom;
        }
    }
    Ok(total / to_float::<T>(n_samples))
}

fn to_float<T: Float>(n: usize) -> T {
    T::from(n).unwrap_or(T::one())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn blobs() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![10.0, 0.0],
            vec![10.0, 1.0],
        ]
    }

    #[test]
    fn separated_blobs_score_high() {
        let score = silhouette_score(&blobs(), &[0, 0, 1, 1]).unwrap();
        // a = 1, b = (10 + √101) / 2 for every point
        let b = (10.0 + 101f64.sqrt()) / 2.0;
        assert_relative_eq!((b - 1.0) / b, score, max_relative = 1e-12);
    }

    #[test]
    fn mixed_labels_score_lower() {
        let good = silhouette_score(&blobs(), &[0, 0, 1, 1]).unwrap();
        let bad = silhouette_score(&blobs(), &[0, 1, 0, 1]).unwrap();
        assert!(bad < 0.0);
        assert!(good > bad);
    }

    #[test]
    fn singleton_cluster_counts_as_zero() {
        let data = vec![vec![0.0], vec![1.0], vec![50.0]];
        let score = silhouette_score(&data, &[0, 0, 1]).unwrap();
        // points 0 and 1: a = 1, b = 50 and 49
        let expected = ((50.0 - 1.0) / 50.0 + (49.0 - 1.0) / 49.0) / 3.0;
        assert_relative_eq!(expected, score, max_relative = 1e-12);
    }

    #[test]
    fn invalid_labellings() {
        assert!(matches!(
            silhouette_score(&blobs(), &[0, 0, 0, 0]),
            Err(SymNmfError::InvalidLabels(_))
        ));
        assert!(matches!(
            silhouette_score(&blobs(), &[0, 1, 2, 3]),
            Err(SymNmfError::InvalidLabels(_))
        ));
        assert!(matches!(
            silhouette_score(&blobs(), &[0, 1]),
            Err(SymNmfError::InvalidLabels(_))
        ));
    }

    #[test]
    fn hard_labels_pick_row_argmax() {
        let h = Matrix::from_rows(&[vec![0.1, 0.3, 0.2], vec![0.0, 0.0, 0.4]]).unwrap();
        assert_eq!(vec![1, 2], hard_labels(&h));
    }
}
