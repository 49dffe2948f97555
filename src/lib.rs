//! Symmetric Non-negative Matrix Factorization ("SymNMF") clustering in Rust. Generic over
//! floating point numeric types.
//!
//! SymNMF clusters data by factorizing a graph of pairwise similarities. Given n points it:
//!  1. builds the Gaussian similarity matrix A, with `A[i][j] = exp(-½‖xᵢ − xⱼ‖²)` and a
//!     zero diagonal;
//!  2. normalizes it by the degree matrix D (the row sums of A) into
//!     `W = D^(-1/2) · A · D^(-1/2)`; and
//!  3. iteratively finds a nonnegative n×k matrix H with `H·Hᵀ ≈ W`, using the damped
//!     multiplicative update `H ← H ∘ (β·(WH) / (HHᵀH) + (1 − β))`.
//!
//! Row i of H is a soft assignment of point i to the k clusters; its largest entry gives a
//! hard label. Degenerate inputs, such as a point with zero similarity to every other
//! point, are reported as errors rather than leaking NaNs into the result.
//!
//! # Examples
//! ```
//!use symnmf::{Matrix, StopReason, SymNmf};
//!
//!let data: Vec<Vec<f64>> = vec![
//!    vec![0.0, 0.0],
//!    vec![0.5, 0.0],
//!    vec![0.0, 0.5],
//!    vec![4.0, 4.0],
//!    vec![4.5, 4.0],
//!    vec![4.0, 4.5],
//!];
//!let model = SymNmf::default_params(&data);
//!let initial_h = Matrix::from_rows(&[
//!    vec![0.1, 0.2],
//!    vec![0.3, 0.4],
//!    vec![0.5, 0.6],
//!    vec![0.7, 0.8],
//!    vec![0.9, 1.0],
//!    vec![1.1, 1.2],
//!]).unwrap();
//!let result = model.factorize(&initial_h).unwrap();
//!assert_eq!(StopReason::Converged, result.stop_reason);
//!let labels = symnmf::hard_labels(&result.h);
//!assert_eq!(vec![1, 1, 1, 0, 0, 0], labels);
//! ```
//!
//! # References
//! * [Kuang, D.; Ding, C.; Park, H. Symmetric Nonnegative Matrix Factorization for Graph Clustering.](https://doi.org/10.1137/1.9781611972825.10)

pub use crate::analysis::{hard_labels, silhouette_score};
pub use crate::cancellation::CancellationToken;
pub use crate::error::{FactorizationError, Interruption, SymNmfError};
pub use crate::factorize::{Factorization, Factorizer, StopReason};
pub use crate::goal::{Goal, GoalOutput, Output};
pub use crate::hyper_parameters::{ParamsBuilder, SymNmfParams};
pub use crate::init::random_factor;
pub use crate::kmeans::{KMeans, KMeansResult};
pub use crate::matrix::Matrix;
pub use crate::normalize::{degree_matrix, normalize_similarity, normalized_matrix};
pub use crate::similarity::similarity_matrix;
pub use crate::symnmf::SymNmf;

mod analysis;
mod cancellation;
mod distance;
mod error;
mod factorize;
mod goal;
mod hyper_parameters;
mod init;
pub mod io;
mod kmeans;
mod matrix;
mod normalize;
mod similarity;
mod symnmf;
mod validation;
