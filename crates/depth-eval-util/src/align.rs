//! Scale-and-shift alignment of predicted depth onto ground truth.
//!
//! Finds `(α, β)` minimising `‖α·x + β − y‖₂` over the masked pixels, where
//! `x` are predicted and `y` ground-truth depths, then applies the affine map
//! to the whole prediction. The fit runs on mean-centred values, which keeps
//! it well conditioned when predictions carry a large offset. Rank-deficient
//! inputs (no samples, a single sample, a constant prediction) fall back to
//! the minimum-norm solution of the uncentred system.

use burn::tensor::{backend::Backend, Bool, Tensor};
use nalgebra::{Matrix2, Vector2, SVD};

use crate::{
    data::{mask_to_vec, tensor_to_f64},
    error::{ensure_same_shape, UtilError, UtilResult},
    mask::{compute_valid_mask, DEFAULT_INVALID_VALUE},
};

/// Singular values of the normal matrix below this fraction of its largest
/// entry are treated as zero.
const RANK_TOLERANCE: f64 = 1e-12;

/// Predictions whose spread is below this fraction of their magnitude count
/// as constant.
const SPREAD_TOLERANCE: f64 = 1e-12;

/// Affine transform `aligned = scale · pred + shift`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentParams {
    pub scale: f64,
    pub shift: f64,
    /// Number of masked pixels the fit was computed from.
    pub samples: usize,
}

impl AlignmentParams {
    /// Applies the transform to every element of `pred`.
    pub fn apply<B: Backend, const D: usize>(&self, pred: Tensor<B, D>) -> Tensor<B, D> {
        pred.mul_scalar(self.scale).add_scalar(self.shift)
    }

    /// Whether fewer than two samples constrained the fit.
    pub const fn is_degenerate(&self) -> bool {
        self.samples < 2
    }
}

/// Masked `(x, y)` pairs of one fit.
#[derive(Debug, Default)]
struct Samples {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Samples {
    fn push(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }

    fn len(&self) -> usize {
        self.x.len()
    }

    fn solve(&self) -> UtilResult<AlignmentParams> {
        let n = self.len();
        if n == 0 {
            return Ok(AlignmentParams {
                scale: 0.0,
                shift: 0.0,
                samples: 0,
            });
        }

        let mean_x = self.x.iter().sum::<f64>() / n as f64;
        let mean_y = self.y.iter().sum::<f64>() / n as f64;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (&x, &y) in self.x.iter().zip(&self.y) {
            let dx = x - mean_x;
            sxx += dx * dx;
            sxy += dx * (y - mean_y);
        }

        let magnitude = self.x.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        let floor = SPREAD_TOLERANCE * magnitude;
        if sxx > n as f64 * floor * floor {
            let scale = sxy / sxx;
            return Ok(AlignmentParams {
                scale,
                shift: mean_y - scale * mean_x,
                samples: n,
            });
        }

        self.minimum_norm()
    }

    /// Minimum-norm solution through the pseudo-inverse of `AᵀA` with
    /// `A = [x | 1]`, for predictions without spread.
    fn minimum_norm(&self) -> UtilResult<AlignmentParams> {
        let (mut xx, mut sx, mut xy, mut sy) = (0.0, 0.0, 0.0, 0.0);
        for (&x, &y) in self.x.iter().zip(&self.y) {
            xx += x * x;
            sx += x;
            xy += x * y;
            sy += y;
        }
        let normal = Matrix2::new(xx, sx, sx, self.len() as f64);
        let rhs = Vector2::new(xy, sy);

        let pinv = SVD::new(normal, true, true)
            .pseudo_inverse(normal.amax() * RANK_TOLERANCE)
            .map_err(|reason| UtilError::SolveFailed {
                reason: reason.to_string(),
            })?;
        let solution = pinv * rhs;

        Ok(AlignmentParams {
            scale: solution[0],
            shift: solution[1],
            samples: self.len(),
        })
    }
}

/// Fits the scale and shift mapping `pred` onto `gt` over the masked pixels.
///
/// When `mask` is `None` the pixels with `gt > 0` are used.
///
/// # Errors
///
/// Returns [`UtilError::ShapeMismatch`] if `pred`, `gt` and `mask` are not
/// congruent.
pub fn fit_scale_and_shift<B: Backend, const D: usize>(
    pred: Tensor<B, D>,
    gt: Tensor<B, D>,
    mask: Option<Tensor<B, D, Bool>>,
) -> UtilResult<AlignmentParams> {
    ensure_same_shape(gt.dims(), pred.dims())?;
    let mask = match mask {
        Some(mask) => {
            ensure_same_shape(gt.dims(), mask.dims())?;
            mask
        }
        None => compute_valid_mask(gt.clone(), DEFAULT_INVALID_VALUE),
    };

    let xs = tensor_to_f64(pred)?;
    let ys = tensor_to_f64(gt)?;
    let keep = mask_to_vec(mask)?;

    let mut samples = Samples::default();
    for ((&x, &y), &k) in xs.iter().zip(&ys).zip(&keep) {
        if k {
            samples.push(x, y);
        }
    }

    let params = samples.solve()?;
    if params.is_degenerate() {
        tracing::warn!(
            samples = params.samples,
            "scale-and-shift fit is under-determined, using minimum-norm solution"
        );
    }
    Ok(params)
}

/// Aligns `pred` to `gt` with a least-squares scale and shift.
///
/// The fit uses only masked pixels, the transform is applied to all of them.
/// Returns a new tensor with the shape of `pred`.
///
/// # Errors
///
/// Returns [`UtilError::ShapeMismatch`] if the inputs are not congruent.
pub fn scale_and_shift_align<B: Backend, const D: usize>(
    pred: Tensor<B, D>,
    gt: Tensor<B, D>,
    mask: Option<Tensor<B, D, Bool>>,
) -> UtilResult<Tensor<B, D>> {
    let params = fit_scale_and_shift(pred.clone(), gt, mask)?;
    Ok(params.apply(pred))
}
