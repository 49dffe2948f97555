use crate::{Matrix, SymNmfError};
use num_traits::Float;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DataValidator<'a, T> {
    data: &'a [Vec<T>],
}

impl<'a, T: Float> DataValidator<'a, T> {
    pub(crate) fn new(data: &'a [Vec<T>]) -> Self {
        Self { data }
    }

    pub(crate) fn validate_input_data(&self) -> Result<(), SymNmfError> {
        if self.data.is_empty() {
            return Err(SymNmfError::EmptyDataset);
        }
        let dims_0th = self.data[0].len();
        if dims_0th == 0 {
            return Err(SymNmfError::WrongDimension(String::from(
                "data points must have at least one coordinate",
            )));
        }
        for (n, datapoint) in self.data.iter().enumerate() {
            if datapoint.iter().any(|element| !element.is_finite()) {
                return Err(SymNmfError::NonFiniteCoordinate(format!(
                    "{n}th vector contains non-finite element(s)"
                )));
            }
            let dims_nth = datapoint.len();
            if dims_nth != dims_0th {
                return Err(SymNmfError::WrongDimension(format!(
                    "0th data point has {dims_0th} dimensions, but {n}th has {dims_nth}"
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn validate_rank(&self, k: usize) -> Result<(), SymNmfError> {
        validate_rank(k, self.data.len())
    }
}

pub(crate) fn validate_rank(k: usize, n: usize) -> Result<(), SymNmfError> {
    if k == 0 || k > n {
        return Err(SymNmfError::InvalidRank { k, n });
    }
    Ok(())
}

/// Checks that `h` is an n×k starting point for factorizing the n×n matrix `w`.
pub(crate) fn validate_initial_factor<T: Float>(
    w: &Matrix<T>,
    h: &Matrix<T>,
) -> Result<(), SymNmfError> {
    let n = w.rows();
    if w.cols() != n {
        return Err(SymNmfError::WrongDimension(format!(
            "normalized matrix must be square, got {n}x{}",
            w.cols()
        )));
    }
    if h.rows() != n {
        return Err(SymNmfError::WrongDimension(format!(
            "initial factor matrix has {} rows, but the normalized matrix has {n}",
            h.rows()
        )));
    }
    validate_rank(h.cols(), n)?;
    for row in 0..h.rows() {
        if h.row(row).iter().any(|x| !x.is_finite() || *x < T::zero()) {
            return Err(SymNmfError::NegativeFactor(format!(
                "{row}th row contains negative or non-finite element(s)"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_data() {
        let data: Vec<Vec<f64>> = Vec::new();
        let validator = DataValidator::new(&data);
        assert_eq!(Err(SymNmfError::EmptyDataset), validator.validate_input_data());
    }

    #[test]
    fn mismatched_dimensions() {
        let data = vec![vec![1.0, 2.0], vec![1.0]];
        let result = DataValidator::new(&data).validate_input_data();
        assert!(matches!(result, Err(SymNmfError::WrongDimension(_))));
    }

    #[test]
    fn non_finite_coordinate() {
        let data = vec![vec![1.0, 2.0], vec![f64::NAN, 1.0]];
        let result = DataValidator::new(&data).validate_input_data();
        assert!(matches!(result, Err(SymNmfError::NonFiniteCoordinate(_))));
        let data = vec![vec![f32::INFINITY]];
        let result = DataValidator::new(&data).validate_input_data();
        assert!(matches!(result, Err(SymNmfError::NonFiniteCoordinate(_))));
    }

    #[test]
    fn rank_bounds() {
        let data = vec![vec![1.0], vec![2.0], vec![3.0]];
        let validator = DataValidator::new(&data);
        assert_eq!(Ok(()), validator.validate_rank(1));
        assert_eq!(Ok(()), validator.validate_rank(3));
        assert_eq!(
            Err(SymNmfError::InvalidRank { k: 0, n: 3 }),
            validator.validate_rank(0)
        );
        assert_eq!(
            Err(SymNmfError::InvalidRank { k: 4, n: 3 }),
            validator.validate_rank(4)
        );
    }

    #[test]
    fn negative_initial_factor() {
        let w = Matrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let h = Matrix::from_rows(&[vec![0.5], vec![-0.1]]).unwrap();
        let result = validate_initial_factor(&w, &h);
        assert!(matches!(result, Err(SymNmfError::NegativeFactor(_))));
    }
}
