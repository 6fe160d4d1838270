//! Resampling of prediction maps onto the ground-truth grid.
//!
//! Pixel centres sit at half-integer coordinates. Bilinear output pixel `d`
//! samples the source at `(d + 0.5) · in / out − 0.5`, clamped to the image;
//! nearest-neighbour takes source pixel `floor(d · in / out)`. Both axes are
//! resampled independently with index gathers.

use core::fmt;

use burn::tensor::{backend::Backend, Int, Tensor, TensorData};
use serde::{Deserialize, Serialize};

use crate::error::{UtilError, UtilResult};

/// Resampling kernel used by [`resize_depth_map`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Nearest,
    #[default]
    Linear,
}

impl Interpolation {
    /// Parses a kernel name. `"nearest"` selects nearest-neighbour, every other
    /// name falls back to bilinear.
    pub fn from_name(name: &str) -> Self {
        if name == "nearest" {
            Self::Nearest
        } else {
            Self::Linear
        }
    }
}

impl From<&str> for Interpolation {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => f.write_str("nearest"),
            Self::Linear => f.write_str("linear"),
        }
    }
}

/// Resamples `depth` to `target_shape = [height, width]`.
///
/// Works for both up- and downsampling. A map that already has the target
/// shape is returned as is.
///
/// # Errors
///
/// Returns [`UtilError::InvalidTargetShape`] if either target dimension is zero
/// and [`UtilError::EmptyDepthMap`] if the input has no pixels.
pub fn resize_depth_map<B: Backend>(
    depth: Tensor<B, 2>,
    target_shape: [usize; 2],
    interpolation: Interpolation,
) -> UtilResult<Tensor<B, 2>> {
    let [target_h, target_w] = target_shape;
    if target_h == 0 || target_w == 0 {
        return Err(UtilError::InvalidTargetShape {
            height: target_h,
            width: target_w,
        });
    }
    if depth.dims() == target_shape {
        return Ok(depth);
    }

    let [h, w] = depth.dims();
    if h == 0 || w == 0 {
        return Err(UtilError::EmptyDepthMap {
            height: h,
            width: w,
        });
    }
    let rows = SourceTaps::new(h, target_h, interpolation);
    let cols = SourceTaps::new(w, target_w, interpolation);

    let resized = rows.resample(depth, 0);
    Ok(cols.resample(resized, 1))
}

/// Source indices and blend weights along one axis.
#[derive(Debug)]
struct SourceTaps {
    lower: Vec<i64>,
    upper: Vec<i64>,
    /// Weight of `upper`; `None` for nearest-neighbour.
    frac: Option<Vec<f32>>,
}

impl SourceTaps {
    fn new(input: usize, output: usize, interpolation: Interpolation) -> Self {
        let scale = input as f64 / output as f64;
        let last = input - 1;

        match interpolation {
            Interpolation::Nearest => {
                let lower: Vec<i64> = (0..output)
                    .map(|d| ((d as f64 * scale).floor() as usize).min(last) as i64)
                    .collect();
                Self {
                    upper: lower.clone(),
                    lower,
                    frac: None,
                }
            }
            Interpolation::Linear => {
                let mut lower = Vec::with_capacity(output);
                let mut upper = Vec::with_capacity(output);
                let mut frac = Vec::with_capacity(output);
                for d in 0..output {
                    let pos = (d as f64 + 0.5) * scale - 0.5;
                    let floor = pos.floor();
                    let (i0, t) = if floor < 0.0 {
                        (0, 0.0)
                    } else if floor as usize >= last {
                        (last, 0.0)
                    } else {
                        (floor as usize, pos - floor)
                    };
                    lower.push(i0 as i64);
                    upper.push((i0 + 1).min(last) as i64);
                    frac.push(t as f32);
                }
                Self {
                    lower,
                    upper,
                    frac: Some(frac),
                }
            }
        }
    }

    fn indices<B: Backend>(values: &[i64], device: &B::Device) -> Tensor<B, 1, Int> {
        Tensor::from_data(TensorData::new(values.to_vec(), [values.len()]), device)
    }

    /// Resamples `depth` along `dim` (0 = rows, 1 = columns).
    fn resample<B: Backend>(&self, depth: Tensor<B, 2>, dim: usize) -> Tensor<B, 2> {
        let device = depth.device();
        let lower = depth
            .clone()
            .select(dim, Self::indices::<B>(&self.lower, &device));

        let Some(frac) = &self.frac else {
            return lower;
        };
        let upper = depth.select(dim, Self::indices::<B>(&self.upper, &device));

        let shape = if dim == 0 {
            [frac.len(), 1]
        } else {
            [1, frac.len()]
        };
        let weight = Tensor::<B, 2>::from_data(TensorData::new(frac.clone(), shape), &device);
        let keep = weight.clone().neg().add_scalar(1.0);

        lower * keep + upper * weight
    }
}
