//! Valid-pixel masks for ground-truth depth.

use burn::tensor::{backend::Backend, Bool, Tensor};

/// Default sentinel below or at which ground-truth depth is considered invalid.
pub const DEFAULT_INVALID_VALUE: f64 = 0.0;

/// Builds a boolean mask marking ground-truth pixels with `gt > invalid_val`.
///
/// The mask has the same shape as `gt`.
pub fn compute_valid_mask<B: Backend, const D: usize>(
    gt: Tensor<B, D>,
    invalid_val: f64,
) -> Tensor<B, D, Bool> {
    gt.greater_elem(invalid_val)
}
