//! Error types for the evaluation pipeline.

use std::path::PathBuf;

use depth_eval_metric::MetricError;
use depth_eval_util::UtilError;
use thiserror::Error;

/// The error type for [`DepthEvaluator`](crate::DepthEvaluator) runs.
#[derive(Error, Debug)]
pub enum EvalError {
    /// Resizing, masking, alignment or image conversion failed.
    #[error(transparent)]
    Preprocess(#[from] UtilError),

    /// Metric computation failed.
    #[error(transparent)]
    Metric(#[from] MetricError),

    /// Locating or pairing dataset files failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Error for when an evaluator configuration is logically inconsistent.
    #[error("Invalid evaluator configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

/// A specialized `Result` type for evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

/// Error type for locating ground-truth / prediction pairs on disk.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Error when a dataset directory does not exist.
    #[error("Directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    /// Error when walking a dataset directory fails.
    #[error("Failed to read directory: {}", .path.display())]
    DirectoryReadFailed {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Error when no index appears on both sides.
    #[error("No ground-truth/prediction pairs found in {} and {}", .gt_dir.display(), .pred_dir.display())]
    NoValidPairs { gt_dir: PathBuf, pred_dir: PathBuf },
}

/// A specialized `Result` type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;
