//! Error types for depth metrics.

use thiserror::Error;

/// The error type for metric computation.
#[derive(Error, Debug)]
pub enum MetricError {
    /// Ground truth, prediction or mask differ in shape.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Shape of the ground truth.
        expected: Vec<usize>,
        /// Shape of the offending array.
        actual: Vec<usize>,
    },

    /// Tensor data could not be read back as floating-point values.
    #[error("tensor data is not numeric: {reason}")]
    TypeMismatch { reason: String },

    /// A patch dimension is zero.
    #[error("invalid patch size: {height}x{width}")]
    InvalidPatchSize { height: usize, width: usize },
}

/// A specialized `Result` type for metric computation.
pub type MetricResult<T> = Result<T, MetricError>;
