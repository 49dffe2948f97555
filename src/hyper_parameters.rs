use std::time::Duration;

// Defaults for parameters
const MAX_ITER_DEFAULT: usize = 300;
const EPSILON_DEFAULT: f64 = 1e-4;
const BETA_DEFAULT: f64 = 0.5;
const SEED_DEFAULT: u64 = 0;

// Valid minimums/left bounds of parameters
const MAX_ITER_MINIMUM: usize = 1;

/// A wrapper around the parameters of the SymNMF multiplicative-update loop. Use
/// `SymNmfParams::default()` for the standard configuration, or `SymNmfParams::builder()`
/// to tune it.
#[derive(Debug, Clone, PartialEq)]
pub struct SymNmfParams {
    pub(crate) max_iter: usize,
    pub(crate) epsilon: f64,
    pub(crate) beta: f64,
    pub(crate) time_limit: Option<Duration>,
    pub(crate) seed: u64,
}

/// Builder object to set custom parameters.
#[derive(Debug, Clone, Default)]
pub struct ParamsBuilder {
    max_iter: Option<usize>,
    epsilon: Option<f64>,
    beta: Option<f64>,
    time_limit: Option<Duration>,
    seed: Option<u64>,
}

impl Default for SymNmfParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SymNmfParams {
    /// Enters the builder pattern, allowing custom parameters to be set using
    /// various setter methods.
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn builder() -> ParamsBuilder {
        ParamsBuilder::default()
    }

    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl ParamsBuilder {
    /// Sets the hard cap on the number of update steps, the first unconditional step
    /// included. The loop stops here even if it has not converged. Defaults to 300.
    ///
    /// # Parameters
    /// * max_iter - the maximum number of update steps
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn max_iter(mut self, max_iter: usize) -> ParamsBuilder {
        let valid_max_iter = if max_iter < MAX_ITER_MINIMUM {
            tracing::warn!(
                "max_iter ({max_iter}) cannot be lower than {MAX_ITER_MINIMUM}. \
                Set to {MAX_ITER_MINIMUM}."
            );
            MAX_ITER_MINIMUM
        } else {
            max_iter
        };
        self.max_iter = Some(valid_max_iter);
        self
    }

    /// Sets the convergence threshold. The loop has converged once the squared Frobenius
    /// norm of the difference between two consecutive iterates drops below it.
    /// Must be positive and finite. Defaults to 1e-4.
    ///
    /// # Parameters
    /// * epsilon - the convergence threshold
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn epsilon(mut self, epsilon: f64) -> ParamsBuilder {
        let valid_epsilon = if epsilon > 0.0 && epsilon.is_finite() {
            epsilon
        } else {
            tracing::warn!(
                "epsilon ({epsilon}) must be positive and finite. Set to {EPSILON_DEFAULT}."
            );
            EPSILON_DEFAULT
        };
        self.epsilon = Some(valid_epsilon);
        self
    }

    /// Sets the mixing weight β of the damped multiplicative update
    /// `H ← H ∘ (β·(WH)/(HHᵀH) + (1 − β))`. β = 1 is the plain multiplicative update.
    /// Values outside (0, 1] are replaced by the nearest sensible value. Defaults to 0.5.
    ///
    /// # Parameters
    /// * beta - the mixing weight
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn beta(mut self, beta: f64) -> ParamsBuilder {
        let valid_beta = if beta.is_nan() {
            tracing::warn!("beta is NaN. Set to {BETA_DEFAULT}.");
            BETA_DEFAULT
        } else if beta > 1.0 {
            tracing::warn!("beta ({beta}) cannot be greater than 1. Set to 1.");
            1.0
        } else if beta <= 0.0 {
            tracing::warn!("beta ({beta}) must be positive. Set to {BETA_DEFAULT}.");
            BETA_DEFAULT
        } else {
            beta
        };
        self.beta = Some(valid_beta);
        self
    }

    /// Sets a wall-clock budget for the factorization loop, checked once per iteration.
    /// By default there is no limit.
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn time_limit(mut self, time_limit: Duration) -> ParamsBuilder {
        self.time_limit = Some(time_limit);
        self
    }

    /// Sets the seed used when the initial factor matrix is drawn at random. Defaults to 0.
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn seed(mut self, seed: u64) -> ParamsBuilder {
        self.seed = Some(seed);
        self
    }

    /// Finishes the building of the parameter configuration.
    ///
    /// # Returns
    /// * The completed SymNMF parameter configuration.
    pub fn build(self) -> SymNmfParams {
        SymNmfParams {
            max_iter: self.max_iter.unwrap_or(MAX_ITER_DEFAULT),
            epsilon: self.epsilon.unwrap_or(EPSILON_DEFAULT),
            beta: self.beta.unwrap_or(BETA_DEFAULT),
            time_limit: self.time_limit,
            seed: self.seed.unwrap_or(SEED_DEFAULT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = SymNmfParams::default();
        assert_eq!(300, params.max_iter());
        assert_eq!(1e-4, params.epsilon());
        assert_eq!(0.5, params.beta());
        assert_eq!(None, params.time_limit());
        assert_eq!(0, params.seed());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let params = SymNmfParams::builder()
            .max_iter(0)
            .epsilon(-1.0)
            .beta(3.0)
            .build();
        assert_eq!(1, params.max_iter());
        assert_eq!(EPSILON_DEFAULT, params.epsilon());
        assert_eq!(1.0, params.beta());

        let params = SymNmfParams::builder().beta(0.0).epsilon(f64::NAN).build();
        assert_eq!(BETA_DEFAULT, params.beta());
        assert_eq!(EPSILON_DEFAULT, params.epsilon());
    }

    #[test]
    fn custom_values_are_kept() {
        let params = SymNmfParams::builder()
            .max_iter(10)
            .epsilon(1e-8)
            .beta(0.25)
            .time_limit(Duration::from_millis(5))
            .seed(42)
            .build();
        assert_eq!(10, params.max_iter());
        assert_eq!(1e-8, params.epsilon());
        assert_eq!(0.25, params.beta());
        assert_eq!(Some(Duration::from_millis(5)), params.time_limit());
        assert_eq!(42, params.seed());
    }
}
