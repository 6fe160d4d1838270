//! Per-patch metrics over a non-overlapping tiling of the image.

use burn::tensor::{backend::Backend, cast::ToElement, Bool, Tensor};
use depth_eval_util::{compute_valid_mask, DEFAULT_INVALID_VALUE};
use serde::{Deserialize, Serialize};

use crate::{
    error::{MetricError, MetricResult},
    global::{global_metrics, DepthMetrics},
    reduce::check_inputs,
};

/// Half-open rectangle `[y0, y1) × [x0, x1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchBounds {
    pub y0: usize,
    pub y1: usize,
    pub x0: usize,
    pub x1: usize,
}

impl PatchBounds {
    pub const fn height(&self) -> usize {
        self.y1 - self.y0
    }

    pub const fn width(&self) -> usize {
        self.x1 - self.x0
    }
}

/// Metrics of one patch, serialised flat as `{y0, y1, x0, x1, AbsRel, δ1, RMSE}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatchRecord {
    #[serde(flatten)]
    pub bounds: PatchBounds,
    #[serde(flatten)]
    pub metrics: DepthMetrics,
}

/// Tiles a `[height, width]` image with `[ph, pw]` patches in row-major order.
///
/// The last row and column are clipped to the image boundary.
///
/// # Errors
///
/// Returns [`MetricError::InvalidPatchSize`] if either patch dimension is zero.
pub fn patch_grid(
    shape: [usize; 2],
    patch_size: [usize; 2],
) -> MetricResult<impl Iterator<Item = PatchBounds>> {
    let [height, width] = shape;
    let [ph, pw] = patch_size;
    if ph == 0 || pw == 0 {
        return Err(MetricError::InvalidPatchSize {
            height: ph,
            width: pw,
        });
    }

    Ok((0..height).step_by(ph).flat_map(move |y0| {
        (0..width).step_by(pw).map(move |x0| PatchBounds {
            y0,
            y1: (y0 + ph).min(height),
            x0,
            x1: (x0 + pw).min(width),
        })
    }))
}

/// Computes [`DepthMetrics`] for every patch that holds at least one masked pixel.
///
/// Patches without valid pixels are skipped. Records come in row-major order.
/// When `mask` is `None`, pixels with `gt > 0` are used.
///
/// # Errors
///
/// Returns [`MetricError::ShapeMismatch`] for incongruent inputs and
/// [`MetricError::InvalidPatchSize`] for a zero patch dimension.
pub fn patch_metrics<B: Backend>(
    gt: Tensor<B, 2>,
    pred: Tensor<B, 2>,
    patch_size: [usize; 2],
    mask: Option<Tensor<B, 2, Bool>>,
) -> MetricResult<Vec<PatchRecord>> {
    check_inputs(&gt, &pred, mask.as_ref())?;
    let mask = mask.unwrap_or_else(|| compute_valid_mask(gt.clone(), DEFAULT_INVALID_VALUE));

    let mut records = Vec::new();
    for bounds in patch_grid(gt.dims(), patch_size)? {
        let region = [bounds.y0..bounds.y1, bounds.x0..bounds.x1];
        let sub_mask = mask.clone().slice(region.clone());
        if !sub_mask.clone().any().into_scalar().to_bool() {
            continue;
        }

        let metrics = global_metrics(
            gt.clone().slice(region.clone()),
            pred.clone().slice(region),
            Some(sub_mask),
        )?;
        records.push(PatchRecord { bounds, metrics });
    }

    Ok(records)
}
