//! # Depth Metrics
//!
//! Standard monocular depth-estimation metrics on Burn tensors:
//!
//! - [`abs_rel`]: mean absolute relative error, `mean(|gt - pred| / gt)`
//! - [`threshold_accuracy`]: fraction of pixels with `max(gt/pred, pred/gt) < t` (δ1 for `t = 1.25`)
//! - [`rmse`]: root mean squared error
//!
//! [`global_metrics`] bundles the three into a [`DepthMetrics`] record,
//! [`patch_metrics`] repeats them over a non-overlapping tiling of the image,
//! and [`DepthMetricsAggregator`] averages records across a dataset.
//!
//! ## Masks
//!
//! Every function takes an optional boolean mask of the same shape as the
//! inputs; only masked elements participate. The metrics do not guard against
//! zero ground truth or zero predictions among included elements: excluding
//! invalid pixels is the caller's job, and an empty selection yields NaN.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use depth_eval_metric::{global_metrics, patch_metrics};
//!
//! let global = global_metrics(gt.clone(), pred.clone(), None)?;
//! let patches = patch_metrics(gt, pred, [32, 32], None)?;
//! println!("AbsRel {:.4}, {} patches", global.abs_rel, patches.len());
//! ```

pub mod abs_rel;
pub mod aggregator;
pub mod error;
pub mod global;
pub mod patch;
mod reduce;
pub mod rmse;
pub mod threshold;

pub use abs_rel::abs_rel;
pub use aggregator::DepthMetricsAggregator;
pub use error::{MetricError, MetricResult};
pub use global::{global_metrics, DepthMetrics};
pub use patch::{patch_grid, patch_metrics, PatchBounds, PatchRecord};
pub use rmse::rmse;
pub use threshold::{threshold_accuracy, DELTA1_THRESHOLD};
