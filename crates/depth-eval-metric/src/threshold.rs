//! Threshold accuracy (δ).

use burn::tensor::{backend::Backend, Bool, Tensor};

use crate::{
    error::MetricResult,
    reduce::{check_inputs, masked_mean},
};

/// Threshold for δ1.
pub const DELTA1_THRESHOLD: f64 = 1.25;

/// Fraction of included elements with `max(gt / pred, pred / gt) < threshold`.
///
/// `1.25` gives δ1, `1.25²` δ2 and so on. Zero values on either side are not
/// guarded: an infinite or NaN ratio simply counts as a miss. An empty mask
/// yields NaN.
///
/// # Errors
///
/// Returns [`MetricError::ShapeMismatch`](crate::MetricError::ShapeMismatch)
/// if the inputs are not congruent.
pub fn threshold_accuracy<B: Backend, const D: usize>(
    gt: Tensor<B, D>,
    pred: Tensor<B, D>,
    threshold: f64,
    mask: Option<Tensor<B, D, Bool>>,
) -> MetricResult<f64> {
    check_inputs(&gt, &pred, mask.as_ref())?;
    let ratio = (gt.clone() / pred.clone()).max_pair(pred / gt);
    let hits = ratio.lower_elem(threshold).float();
    Ok(masked_mean(hits, mask))
}
