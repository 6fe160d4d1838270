//! # depth-eval
//!
//! Evaluation of monocular depth predictions against ground truth.
//!
//! A [`DepthEvaluator`] runs a fixed pipeline on each `(gt, pred)` pair:
//!
//! 1. resize the prediction onto the ground-truth grid ([`ResizeStrategy`])
//! 2. compute the valid mask from the ground truth ([`MaskStrategy`])
//! 3. align the prediction to the ground-truth scale ([`AlignStrategy`])
//! 4. score it with the global metrics and, optionally, per patch
//!
//! Every step can be swapped for a closure or a custom type. The defaults
//! come from [`depth_eval_util`] and the metrics from [`depth_eval_metric`].
//!
//! ```rust,ignore
//! use depth_eval::{DepthEvaluator, EvaluatorConfig};
//!
//! let evaluator = DepthEvaluator::standard();
//! let report = evaluator.evaluate(gt.clone(), pred.clone(), Some([32, 32]))?;
//!
//! // or, from a saved configuration
//! let evaluator = EvaluatorConfig::load("eval.json")?.init()?;
//! println!("δ1 = {:.3}", report.global.delta1);
//! ```
//!
//! For datasets on disk, see [`discover_pairs`] and [`evaluate_pairs`].

pub mod backend;
pub mod batch;
pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluator;
pub mod strategy;

pub use batch::{evaluate_pairs, BatchReport, SampleReport};
pub use config::EvaluatorConfig;
pub use dataset::{discover_pairs, SamplePair, GROUND_TRUTH_PREFIX, PREDICTION_PREFIX};
pub use error::{DatasetError, DatasetResult, EvalError, EvalResult};
pub use evaluator::{DepthEvaluator, EvaluationReport};
pub use strategy::{
    AlignStrategy, DepthResizer, MaskStrategy, NoAlign, ResizeStrategy, ScaleShiftAligner,
    ThresholdMask,
};

pub use depth_eval_metric as metric;
pub use depth_eval_util as util;
