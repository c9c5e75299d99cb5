use thiserror::Error;

/// Failures of the Cholesky-based normal-parameter routines
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinalgError {
    /// The buffer is neither column- nor row-major contiguous
    #[error("provided array is not contiguous in column-major order (shape {rows}x{cols})")]
    Layout { rows: usize, cols: usize },

    /// Mismatched dimensions between operands
    #[error("shape mismatch: {0}")]
    Shape(String),

    /// The leading minor of this order is not positive definite
    #[error("matrix is not positive definite (leading minor of order {order})")]
    NotPositiveDefinite { order: usize },

    /// Inverting from a successful factorization reported a zero pivot
    #[error("positive-definite inverse failed with status {info}")]
    InverseFailed { info: usize },
}

pub type LinalgResult<T> = std::result::Result<T, LinalgError>;
