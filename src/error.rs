use thiserror::Error;

/// Possible errors that arise while building the affinity graph or factorizing it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SymNmfError {
    #[error("Input file is malformed: {0}")]
    FileFormat(String),
    #[error("The dataset provided is empty")]
    EmptyDataset,
    #[error("Mismatched dimensions: {0}")]
    WrongDimension(String),
    #[error("Non finite coordinate: {0}")]
    NonFiniteCoordinate(String),
    #[error("Rank k ({k}) must be between 1 and the number of data points ({n})")]
    InvalidRank { k: usize, n: usize },
    #[error("Initial factor matrix must be nonnegative and finite: {0}")]
    NegativeFactor(String),
    #[error("Invalid cluster labels: {0}")]
    InvalidLabels(String),
    #[error("Unknown goal '{0}', expected one of sym, ddg, norm, symnmf")]
    InvalidGoal(String),
    /// A point whose similarity to every other point is zero, leaving its degree at zero.
    #[error("Degree normalization failed: data point {point} is isolated (zero degree)")]
    DegenerateGraph { point: usize },
    #[error("Factorization failed: {0}")]
    Factorization(FactorizationError),
    #[error("Failed to allocate a {rows}x{cols} matrix")]
    Allocation { rows: usize, cols: usize },
    #[error("Factorization interrupted: {0}")]
    Interrupted(Interruption),
}

/// Numerical failures of the multiplicative update.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FactorizationError {
    #[error("denominator of H[{row}][{col}] is not strictly positive")]
    NonPositiveDenominator { row: usize, col: usize },
}

/// Why a running factorization stopped before converging or hitting its cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Interruption {
    #[error("cancelled after {iterations} update steps")]
    Cancelled { iterations: usize },
    #[error("time limit exceeded after {iterations} update steps")]
    DeadlineExceeded { iterations: usize },
}

impl SymNmfError {
    /// Process exit status for the error, distinct per failure class. Input file problems,
    /// invalid inputs, numerical degeneracy, resource exhaustion and interruption each map
    /// to their own code. Code 1 is left for usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            SymNmfError::FileFormat(_) => 2,
            SymNmfError::EmptyDataset
            | SymNmfError::WrongDimension(_)
            | SymNmfError::NonFiniteCoordinate(_)
            | SymNmfError::InvalidRank { .. }
            | SymNmfError::NegativeFactor(_)
            | SymNmfError::InvalidLabels(_)
            | SymNmfError::InvalidGoal(_) => 3,
            SymNmfError::DegenerateGraph { .. } => 4,
            SymNmfError::Factorization(_) => 5,
            SymNmfError::Allocation { .. } => 6,
            SymNmfError::Interrupted(_) => 7,
        }
    }
}

impl From<FactorizationError> for SymNmfError {
    fn from(err: FactorizationError) -> Self {
        SymNmfError::Factorization(err)
    }
}

impl From<Interruption> for SymNmfError {
    fn from(err: Interruption) -> Self {
        SymNmfError::Interrupted(err)
    }
}
