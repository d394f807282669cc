use thiserror::Error;

/// Failure modes of the quadrature, shape function, and Jacobian routines
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ElementError {
    /// An order, index, dimension, or reference point was out of range
    #[error("Invalid argument: {0}; cannot evaluate!")]
    InvalidArgument(String),
    /// A vertex or partial table did not match the expected node count
    #[error("Expected {expected} entries but found {found}; cannot evaluate!")]
    SizeMismatch { expected: usize, found: usize },
    /// The Jacobian determinant is not finite, or negligible next to the row norms
    #[error("Jacobian determinant {det:e} is singular at tolerance {tolerance:e}; cannot invert!")]
    SingularJacobian { det: f64, tolerance: f64 },
}

impl ElementError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub(crate) fn check_len(expected: usize, found: usize) -> Result<(), ElementError> {
    if expected != found {
        return Err(ElementError::SizeMismatch { expected, found });
    }
    Ok(())
}
