//! Symmetric padding of depth maps to a target aspect ratio.

use burn::tensor::{backend::Backend, Tensor};

use crate::error::{UtilError, UtilResult};

const RATIO_TOLERANCE: f64 = 1e-6;

/// Pads a `[H, W]` map with `pad_value` so that `W / H == target_ratio`.
///
/// Width is padded when the map is too narrow, height when it is too wide.
/// The extra pixel of an odd split goes to the right/bottom edge. A map
/// already within tolerance of the ratio is returned unchanged.
///
/// # Errors
///
/// Returns [`UtilError::InvalidAspectRatio`] unless `target_ratio` is finite
/// and positive.
pub fn pad_to_aspect_ratio<B: Backend>(
    image: Tensor<B, 2>,
    target_ratio: f64,
    pad_value: f64,
) -> UtilResult<Tensor<B, 2>> {
    if !(target_ratio.is_finite() && target_ratio > 0.0) {
        return Err(UtilError::InvalidAspectRatio {
            ratio: target_ratio,
        });
    }

    let [h, w] = image.dims();
    let current = w as f64 / h as f64;
    if (current - target_ratio).abs() < RATIO_TOLERANCE {
        return Ok(image);
    }

    let (new_h, new_w, top, left) = if current < target_ratio {
        let new_w = ((target_ratio * h as f64) as usize).max(w);
        (h, new_w, 0, (new_w - w) / 2)
    } else {
        let new_h = ((w as f64 / target_ratio) as usize).max(h);
        (new_h, w, (new_h - h) / 2, 0)
    };

    let canvas = Tensor::<B, 2>::full([new_h, new_w], pad_value, &image.device());
    Ok(canvas.slice_assign([top..top + h, left..left + w], image))
}
