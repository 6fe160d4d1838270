//! Error types for depth-map preprocessing.

use thiserror::Error;

/// The error type for masking, resampling, alignment and image conversion.
#[derive(Error, Debug)]
pub enum UtilError {
    /// Two arrays that must be congruent differ in shape.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Shape of the reference array.
        expected: Vec<usize>,
        /// Shape of the offending array.
        actual: Vec<usize>,
    },

    /// Tensor data could not be read back as floating-point values.
    #[error("tensor data is not numeric: {reason}")]
    TypeMismatch {
        /// Description of the conversion failure.
        reason: String,
    },

    #[error("invalid channel count: expected 3 for RGB input, got {actual}")]
    InvalidChannels { actual: usize },

    #[error("invalid target shape: {height}x{width}")]
    InvalidTargetShape { height: usize, width: usize },

    #[error("cannot resample an empty {height}x{width} depth map")]
    EmptyDepthMap { height: usize, width: usize },

    #[error("invalid aspect ratio: {ratio}")]
    InvalidAspectRatio { ratio: f64 },

    #[error("invalid depth scale: {scale}")]
    InvalidDepthScale { scale: f64 },

    /// The pseudo-inverse of the normal matrix could not be formed.
    #[error("least-squares solve failed: {reason}")]
    SolveFailed { reason: String },

    #[error("failed to open image at '{path}': {source}")]
    ImageLoad {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read depth array at '{path}': {source}")]
    NpyRead {
        path: String,
        #[source]
        source: ndarray_npy::ReadNpyError,
    },

    #[error("unsupported depth image format: {color} (expected 8- or 16-bit grayscale)")]
    UnsupportedDepthFormat { color: String },
}

/// A specialized `Result` type for preprocessing operations.
pub type UtilResult<T> = Result<T, UtilError>;

/// Fails with [`UtilError::ShapeMismatch`] unless both shapes are identical.
pub fn ensure_same_shape<const D: usize>(expected: [usize; D], actual: [usize; D]) -> UtilResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(UtilError::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        })
    }
}
