use crate::{Matrix, SymNmfError};
use std::fmt;
use std::str::FromStr;

/// Which product of the pipeline is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    /// The similarity matrix A.
    Sym,
    /// The diagonal degree matrix D.
    Ddg,
    /// The normalized matrix W.
    Norm,
    /// The factor matrix H.
    SymNmf,
}

/// Whether a goal's matrix is handed back as a value or rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Output {
    #[default]
    Value,
    Text,
}

/// The result of running a [`Goal`].
#[derive(Debug, Clone, PartialEq)]
pub enum GoalOutput<T> {
    Matrix(Matrix<T>),
    Text(String),
}

impl<T> GoalOutput<T> {
    pub fn into_matrix(self) -> Option<Matrix<T>> {
        match self {
            GoalOutput::Matrix(matrix) => Some(matrix),
            GoalOutput::Text(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            GoalOutput::Matrix(_) => None,
            GoalOutput::Text(text) => Some(text),
        }
    }
}

impl FromStr for Goal {
    type Err = SymNmfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sym" => Ok(Goal::Sym),
            "ddg" => Ok(Goal::Ddg),
            "norm" => Ok(Goal::Norm),
            "symnmf" => Ok(Goal::SymNmf),
            _ => Err(SymNmfError::InvalidGoal(s.to_string())),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Goal::Sym => "sym",
            Goal::Ddg => "ddg",
            Goal::Norm => "norm",
            Goal::SymNmf => "symnmf",
        };
        write!(f, "{name}")
    }
}
