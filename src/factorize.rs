use crate::cancellation::{CancellationToken, Watchdog};
use crate::error::FactorizationError;
use crate::validation::validate_initial_factor;
use crate::{Matrix, SymNmfError, SymNmfParams};
use num_traits::Float;
use std::time::Duration;

/// Why the factorization loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Two consecutive iterates were closer than epsilon.
    Converged,
    /// The update step cap was reached first.
    MaxIterReached,
}

/// The outcome of a SymNMF factorization.
#[derive(Debug, Clone, PartialEq)]
pub struct Factorization<T> {
    /// The final n×k factor matrix.
    pub h: Matrix<T>,
    /// Update steps performed, the first unconditional one included.
    pub iterations: usize,
    pub stop_reason: StopReason,
}

/// Runs the damped multiplicative update of Symmetric NMF,
/// `H ← H ∘ (β·(WH) / (HHᵀH) + (1 − β))`, until consecutive iterates converge or the
/// iteration cap is reached.
#[derive(Debug, Clone)]
pub struct Factorizer<T> {
    max_iter: usize,
    epsilon: T,
    beta: T,
    time_limit: Option<Duration>,
    token: Option<CancellationToken>,
}

impl<T: Float> Factorizer<T> {
    /// Creates a factorizer from a parameter configuration.
    ///
    /// # Examples
    /// ```
    ///use symnmf::{Factorizer, Matrix, StopReason, SymNmfParams};
    ///
    ///let w = Matrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
    ///let h0 = Matrix::from_rows(&[vec![0.3], vec![0.6]]).unwrap();
    ///let result = Factorizer::new(SymNmfParams::default()).factorize(&w, &h0).unwrap();
    ///assert_eq!(StopReason::Converged, result.stop_reason);
    ///assert!(result.h.iter().all(|&x| x >= 0.0));
    /// ```
    pub fn new(params: SymNmfParams) -> Self {
        let epsilon = T::from(params.epsilon).unwrap_or_else(T::epsilon);
        let beta = T::from(params.beta).unwrap_or_else(|| T::one() / (T::one() + T::one()));
        Self {
            max_iter: params.max_iter,
            epsilon,
            beta,
            time_limit: params.time_limit,
            token: None,
        }
    }

    /// Attaches a cancellation token, checked once per iteration.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Factorizes the normalized matrix `w` starting from `initial_h`.
    ///
    /// # Parameters
    /// * `w` - the n×n normalized affinity matrix.
    /// * `initial_h` - the n×k nonnegative starting point, 1 ≤ k ≤ n. Left untouched.
    ///
    /// # Returns
    /// * The final iterate with the number of update steps and the stop reason. An error is
    ///   returned for mismatched shapes, a negative or non-finite starting point, a
    ///   non-positive update denominator, or when cancelled or past the time limit.
    pub fn factorize(
        &self,
        w: &Matrix<T>,
        initial_h: &Matrix<T>,
    ) -> Result<Factorization<T>, SymNmfError> {
        validate_initial_factor(w, initial_h)?;
        let watchdog = Watchdog::start(self.token.as_ref(), self.time_limit);

        let mut current = initial_h.clone();
        let mut next = self.update(w, &current)?;
        let mut iterations = 1;

        let stop_reason = loop {
            let diff = self.squared_difference(&current, &next);
            tracing::debug!(
                iterations,
                diff = diff.to_f64().unwrap_or(f64::NAN),
                "symnmf update step"
            );
            if diff < self.epsilon {
                break StopReason::Converged;
            }
            if iterations >= self.max_iter {
                break StopReason::MaxIterReached;
            }
            watchdog.check(iterations)?;
            current.copy_from(&next)?;
            next = self.update(w, &current)?;
            iterations += 1;
        };

        tracing::info!(iterations, ?stop_reason, "symnmf factorization finished");
        Ok(Factorization {
            h: next,
            iterations,
            stop_reason,
        })
    }

    /// Performs one multiplicative update step.
    ///
    /// # Returns
    /// * The next iterate, or `FactorizationError::NonPositiveDenominator` if an entry of
    ///   `HHᵀH` is zero, negative or NaN.
    pub fn update(&self, w: &Matrix<T>, h: &Matrix<T>) -> Result<Matrix<T>, SymNmfError> {
        let numerator = w.multiply(h)?;
        let gram = h.multiply(&h.transpose()?)?;
        let denominator = gram.multiply(h)?;

        let mut next = Matrix::zeros(h.rows(), h.cols())?;
        let keep = T::one() - self.beta;
        for row in 0..h.rows() {
            for col in 0..h.cols() {
                let denom = denominator[(row, col)];
                if !(denom > T::zero()) {
                    return Err(FactorizationError::NonPositiveDenominator { row, col }.into());
                }
                let ratio = numerator[(row, col)] / denom;
                next[(row, col)] = h[(row, col)] * (self.beta * ratio + keep);
            }
        }
        Ok(next)
    }

    /// Whether `Σ (next − prev)² < epsilon`.
    ///
    /// # Returns
    /// * `SymNmfError::WrongDimension` if the two iterates differ in shape.
    pub fn has_converged(&self, prev: &Matrix<T>, next: &Matrix<T>) -> Result<bool, SymNmfError> {
        if (prev.rows(), prev.cols()) != (next.rows(), next.cols()) {
            return Err(SymNmfError::WrongDimension(format!(
                "cannot compare a {}x{} iterate with a {}x{} iterate",
                prev.rows(),
                prev.cols(),
                next.rows(),
                next.cols()
            )));
        }
        Ok(self.squared_difference(prev, next) < self.epsilon)
    }

    // Callers guarantee equal shapes.
    fn squared_difference(&self, prev: &Matrix<T>, next: &Matrix<T>) -> T {
        prev.iter()
            .zip(next.iter())
            .map(|(&a, &b)| (b - a) * (b - a))
            .fold(T::zero(), std::ops::Add::add)
    }
}
