//! NumPy `.npy` depth maps.
//!
//! Float arrays are taken as metric depth and read unscaled. Both `float32`
//! and `float64` files are accepted; `[H, W, 1]` arrays are squeezed.

use std::path::Path;

use burn::tensor::{backend::Backend, Tensor, TensorData};
use ndarray::{Array2, Array3, Axis};
use ndarray_npy::{read_npy, ReadNpyError};

use crate::error::{UtilError, UtilResult};

/// Whether `path` has a `.npy` extension (case-insensitive).
pub fn is_npy_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("npy"))
}

fn npy_error(path: &Path) -> impl Fn(ReadNpyError) -> UtilError + '_ {
    move |source| UtilError::NpyRead {
        path: path.display().to_string(),
        source,
    }
}

/// Reads a 2-D array, or a single-channel 3-D one, of `f32` or `f64`.
///
/// On failure the error of the plain `[H, W]` `f32` attempt is returned.
fn read_plane(path: &Path) -> Result<Array2<f32>, ReadNpyError> {
    let first = match read_npy::<_, Array2<f32>>(path) {
        Ok(depth) => return Ok(depth),
        Err(err) => err,
    };
    if !matches!(
        first,
        ReadNpyError::WrongDescriptor(_) | ReadNpyError::WrongNdim(..)
    ) {
        return Err(first);
    }

    if let Ok(depth) = read_npy::<_, Array2<f64>>(path) {
        return Ok(depth.mapv(|v| v as f32));
    }
    let volume = if let Ok(depth) = read_npy::<_, Array3<f32>>(path) {
        depth
    } else if let Ok(depth) = read_npy::<_, Array3<f64>>(path) {
        depth.mapv(|v| v as f32)
    } else {
        return Err(first);
    };

    if volume.len_of(Axis(2)) != 1 {
        return Err(first);
    }
    Ok(volume.index_axis_move(Axis(2), 0))
}

/// Loads an `.npy` depth map as an `[H, W]` tensor.
///
/// # Errors
///
/// Returns [`UtilError::NpyRead`] if the file is unreadable, not a float array,
/// or not a single plane.
pub fn load_npy_depth<B: Backend>(path: &Path, device: &B::Device) -> UtilResult<Tensor<B, 2>> {
    let depth = read_plane(path).map_err(npy_error(path))?;
    let (height, width) = depth.dim();
    let values: Vec<f32> = depth.iter().copied().collect();
    Ok(Tensor::from_data(TensorData::new(values, [height, width]), device))
}
