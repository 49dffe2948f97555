use crate::analysis::hard_labels;
use crate::cancellation::CancellationToken;
use crate::init::random_factor;
use crate::io::format_matrix;
use crate::normalize::{degree_matrix, normalize_similarity};
use crate::similarity::similarity_matrix;
use crate::validation::DataValidator;
use crate::{
    Factorization, Factorizer, Goal, GoalOutput, Matrix, Output, SymNmfError, SymNmfParams,
};
use num_traits::Float;
use std::fmt::Display;

/// The SymNMF clustering model. Generic over floating point numeric types.
///
/// Borrows the data points and produces, on request, each stage of the pipeline:
/// similarity matrix, degree matrix, normalized matrix and factor matrix. Every call
/// validates the data and owns everything it allocates.
#[derive(Debug, Clone)]
pub struct SymNmf<'a, T> {
    data: &'a [Vec<T>],
    params: SymNmfParams,
    token: Option<CancellationToken>,
}

impl<'a, T: Float> SymNmf<'a, T> {
    /// Creates an instance of the SymNMF model using a custom parameter configuration.
    ///
    /// # Parameters
    /// * `data` - a reference to the data to cluster, a collection of vectors of floating
    ///            point numbers. The vectors must all be of the same dimensionality and
    ///            contain only finite values.
    /// * `params` - the parameter configuration.
    ///
    /// # Returns
    /// * The SymNMF model instance.
    ///
    /// # Examples
    /// ```
    ///use symnmf::{SymNmf, SymNmfParams};
    ///
    ///let data: Vec<Vec<f64>> = vec![vec![0.0, 0.0], vec![0.2, 0.1], vec![3.0, 3.0]];
    ///let params = SymNmfParams::builder().max_iter(100).epsilon(1e-6).build();
    ///let model = SymNmf::new(&data, params);
    /// ```
    pub fn new(data: &'a [Vec<T>], params: SymNmfParams) -> Self {
        SymNmf {
            data,
            params,
            token: None,
        }
    }

    /// Creates an instance of the SymNMF model using the default parameters.
    pub fn default_params(data: &'a [Vec<T>]) -> Self {
        SymNmf::new(data, SymNmfParams::default())
    }

    /// Attaches a cancellation token to the factorization loop.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    pub fn n_samples(&self) -> usize {
        self.data.len()
    }

    /// The Gaussian similarity matrix A of the data points.
    pub fn similarity(&self) -> Result<Matrix<T>, SymNmfError> {
        DataValidator::new(self.data).validate_input_data()?;
        similarity_matrix(self.data)
    }

    /// The diagonal degree matrix D of the similarity graph.
    pub fn degree(&self) -> Result<Matrix<T>, SymNmfError> {
        let similarity = self.similarity()?;
        degree_matrix(&similarity)
    }

    /// The normalized matrix W = D^(-1/2)·A·D^(-1/2).
    pub fn normalized(&self) -> Result<Matrix<T>, SymNmfError> {
        let similarity = self.similarity()?;
        normalize_similarity(&similarity)
    }

    /// Factorizes the normalized matrix starting from a caller-supplied n×k matrix.
    ///
    /// # Examples
    /// ```
    ///use symnmf::{Matrix, SymNmf};
    ///
    ///let data = vec![vec![0.0, 0.0], vec![0.0, 0.0], vec![10.0, 10.0]];
    ///let h0 = Matrix::from_rows(&[vec![0.5], vec![0.5], vec![0.5]]).unwrap();
    ///let result = SymNmf::default_params(&data).factorize(&h0).unwrap();
    /// // The far away point fades out of the single cluster
    ///assert!(result.h[(2, 0)] < 0.1 * result.h[(0, 0)]);
    /// ```
    pub fn factorize(&self, initial_h: &Matrix<T>) -> Result<Factorization<T>, SymNmfError> {
        let w = self.normalized()?;
        self.factorizer().factorize(&w, initial_h)
    }

    /// Factorizes the normalized matrix into `k` clusters, starting from a random matrix
    /// drawn with the configured seed.
    pub fn factorize_random(&self, k: usize) -> Result<Factorization<T>, SymNmfError> {
        let validator = DataValidator::new(self.data);
        validator.validate_input_data()?;
        validator.validate_rank(k)?;
        let w = self.normalized()?;
        let initial_h = random_factor(&w, k, self.params.seed)?;
        self.factorizer().factorize(&w, &initial_h)
    }

    /// Performs clustering into `k` clusters and returns a hard label per data point, the
    /// index of the largest entry in its row of H.
    pub fn cluster(&self, k: usize) -> Result<Vec<usize>, SymNmfError> {
        let factorization = self.factorize_random(k)?;
        Ok(hard_labels(&factorization.h))
    }

    /// Computes the matrix selected by `goal`, with a random starting point for
    /// `Goal::SymNmf`. `k` is only used by `Goal::SymNmf`.
    pub fn compute(&self, goal: Goal, k: usize) -> Result<Matrix<T>, SymNmfError> {
        let matrix = match goal {
            Goal::Sym => self.similarity()?,
            Goal::Ddg => self.degree()?,
            Goal::Norm => self.normalized()?,
            Goal::SymNmf => self.factorize_random(k)?.h,
        };
        tracing::info!(%goal, rows = matrix.rows(), cols = matrix.cols(), "goal computed");
        Ok(matrix)
    }

    fn factorizer(&self) -> Factorizer<T> {
        let factorizer = Factorizer::new(self.params.clone());
        match &self.token {
            Some(token) => factorizer.with_cancellation(token.clone()),
            None => factorizer,
        }
    }
}

impl<'a, T: Float + Display> SymNmf<'a, T> {
    /// Like [`SymNmf::compute`], but hands the matrix back either as a value or rendered
    /// as comma-separated text with four decimals.
    ///
    /// # Examples
    /// ```
    ///use symnmf::{Goal, Output, SymNmf};
    ///
    ///let data = vec![vec![0.0], vec![0.0]];
    ///let model = SymNmf::default_params(&data);
    ///let text = model.run(Goal::Sym, 1, Output::Text).unwrap().into_text().unwrap();
    ///assert_eq!("0.0000,1.0000\n1.0000,0.0000\n", text);
    /// ```
    pub fn run(
        &self,
        goal: Goal,
        k: usize,
        output: Output,
    ) -> Result<GoalOutput<T>, SymNmfError> {
        let matrix = self.compute(goal, k)?;
        Ok(match output {
            Output::Value => GoalOutput::Matrix(matrix),
            Output::Text => GoalOutput::Text(format_matrix(&matrix)),
        })
    }
}
