//! Host-side readback of tensor values.

use burn::tensor::{backend::Backend, Bool, Tensor};

use crate::error::{UtilError, UtilResult};

/// Reads every element of `tensor` as `f64`, in row-major order.
pub fn tensor_to_f64<B: Backend, const D: usize>(tensor: Tensor<B, D>) -> UtilResult<Vec<f64>> {
    tensor
        .into_data()
        .convert::<f64>()
        .to_vec::<f64>()
        .map_err(|e| UtilError::TypeMismatch {
            reason: format!("{e:?}"),
        })
}

/// Reads a boolean mask as a row-major `Vec<bool>`.
pub fn mask_to_vec<B: Backend, const D: usize>(mask: Tensor<B, D, Bool>) -> UtilResult<Vec<bool>> {
    Ok(tensor_to_f64(mask.float())?
        .into_iter()
        .map(|v| v > 0.5)
        .collect())
}
