//! Absolute relative error.

use burn::tensor::{backend::Backend, Bool, Tensor};

use crate::{
    error::MetricResult,
    reduce::{check_inputs, masked_mean},
};

/// Mean of `|gt - pred| / gt` over the included elements.
///
/// Divides by raw ground truth: zero ground truth among the included elements
/// produces NaN or infinity, so invalid pixels must be excluded by `mask`.
/// An empty mask yields NaN.
///
/// # Errors
///
/// Returns [`MetricError::ShapeMismatch`](crate::MetricError::ShapeMismatch)
/// if the inputs are not congruent.
pub fn abs_rel<B: Backend, const D: usize>(
    gt: Tensor<B, D>,
    pred: Tensor<B, D>,
    mask: Option<Tensor<B, D, Bool>>,
) -> MetricResult<f64> {
    check_inputs(&gt, &pred, mask.as_ref())?;
    let relative = (gt.clone() - pred).abs() / gt;
    Ok(masked_mean(relative, mask))
}
