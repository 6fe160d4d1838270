//! Pluggable resize, align and mask steps of the evaluation pipeline.
//!
//! Each step is its own trait so a [`DepthEvaluator`](crate::DepthEvaluator)
//! can mix the default implementations with closures or custom types.
//! Closures with the matching signature implement the traits directly.

use burn::tensor::{backend::Backend, Bool, Tensor};
use depth_eval_util::{
    compute_valid_mask, resize_depth_map, scale_and_shift_align, Interpolation,
    DEFAULT_INVALID_VALUE,
};

use crate::error::EvalResult;

/// Brings a prediction onto the ground-truth grid.
pub trait ResizeStrategy<B: Backend> {
    fn resize(&self, depth: Tensor<B, 2>, target_shape: [usize; 2]) -> EvalResult<Tensor<B, 2>>;
}

/// Maps prediction values onto the ground-truth scale.
pub trait AlignStrategy<B: Backend> {
    fn align(
        &self,
        pred: Tensor<B, 2>,
        gt: Tensor<B, 2>,
        mask: Tensor<B, 2, Bool>,
    ) -> EvalResult<Tensor<B, 2>>;
}

/// Selects the ground-truth pixels that take part in evaluation.
pub trait MaskStrategy<B: Backend> {
    fn valid_mask(&self, gt: Tensor<B, 2>) -> Tensor<B, 2, Bool>;
}

impl<B: Backend, F> ResizeStrategy<B> for F
where
    F: Fn(Tensor<B, 2>, [usize; 2]) -> EvalResult<Tensor<B, 2>>,
{
    fn resize(&self, depth: Tensor<B, 2>, target_shape: [usize; 2]) -> EvalResult<Tensor<B, 2>> {
        self(depth, target_shape)
    }
}

impl<B: Backend, F> AlignStrategy<B> for F
where
    F: Fn(Tensor<B, 2>, Tensor<B, 2>, Tensor<B, 2, Bool>) -> EvalResult<Tensor<B, 2>>,
{
    fn align(
        &self,
        pred: Tensor<B, 2>,
        gt: Tensor<B, 2>,
        mask: Tensor<B, 2, Bool>,
    ) -> EvalResult<Tensor<B, 2>> {
        self(pred, gt, mask)
    }
}

impl<B: Backend, F> MaskStrategy<B> for F
where
    F: Fn(Tensor<B, 2>) -> Tensor<B, 2, Bool>,
{
    fn valid_mask(&self, gt: Tensor<B, 2>) -> Tensor<B, 2, Bool> {
        self(gt)
    }
}

/// [`resize_depth_map`] with a fixed kernel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepthResizer {
    pub interpolation: Interpolation,
}

impl DepthResizer {
    pub const fn new(interpolation: Interpolation) -> Self {
        Self { interpolation }
    }
}

impl<B: Backend> ResizeStrategy<B> for DepthResizer {
    fn resize(&self, depth: Tensor<B, 2>, target_shape: [usize; 2]) -> EvalResult<Tensor<B, 2>> {
        Ok(resize_depth_map(depth, target_shape, self.interpolation)?)
    }
}

/// Least-squares scale-and-shift alignment, see [`scale_and_shift_align`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaleShiftAligner;

impl<B: Backend> AlignStrategy<B> for ScaleShiftAligner {
    fn align(
        &self,
        pred: Tensor<B, 2>,
        gt: Tensor<B, 2>,
        mask: Tensor<B, 2, Bool>,
    ) -> EvalResult<Tensor<B, 2>> {
        Ok(scale_and_shift_align(pred, gt, Some(mask))?)
    }
}

/// Leaves the prediction as is, for metric-scale models.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoAlign;

impl<B: Backend> AlignStrategy<B> for NoAlign {
    fn align(
        &self,
        pred: Tensor<B, 2>,
        _gt: Tensor<B, 2>,
        _mask: Tensor<B, 2, Bool>,
    ) -> EvalResult<Tensor<B, 2>> {
        Ok(pred)
    }
}

/// Marks pixels with `gt > invalid_value`, see [`compute_valid_mask`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdMask {
    pub invalid_value: f64,
}

impl ThresholdMask {
    pub const fn new(invalid_value: f64) -> Self {
        Self { invalid_value }
    }
}

impl Default for ThresholdMask {
    fn default() -> Self {
        Self::new(DEFAULT_INVALID_VALUE)
    }
}

impl<B: Backend> MaskStrategy<B> for ThresholdMask {
    fn valid_mask(&self, gt: Tensor<B, 2>) -> Tensor<B, 2, Bool> {
        compute_valid_mask(gt, self.invalid_value)
    }
}
