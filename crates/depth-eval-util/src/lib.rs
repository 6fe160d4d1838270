//! # Depth map preprocessing
//!
//! Building blocks that prepare a predicted depth map for comparison with
//! ground truth, implemented on Burn tensors so they run on any [`Backend`].
//!
//! - [`compute_valid_mask`]: pixels with usable ground truth
//! - [`resize_depth_map`]: nearest or bilinear resampling to the ground-truth grid
//! - [`scale_and_shift_align`]: least-squares affine fit of prediction to ground truth
//! - [`rgb_to_grayscale_depth`], [`load_prediction`], [`load_ground_truth`]:
//!   image I/O and luminance conversion
//! - [`load_npy_depth`]: NumPy `.npy` ground truth
//! - [`pad_to_aspect_ratio`]: symmetric padding
//!
//! Every function returns a new tensor; inputs are never modified.
//!
//! [`Backend`]: burn::tensor::backend::Backend

pub mod align;
pub mod data;
pub mod error;
pub mod image_io;
pub mod mask;
pub mod npy;
pub mod pad;
pub mod resize;

pub use align::{fit_scale_and_shift, scale_and_shift_align, AlignmentParams};
pub use error::{ensure_same_shape, UtilError, UtilResult};
pub use image_io::{
    depth_from_image, grayscale_from_image, image_to_rgb_tensor, load_ground_truth,
    load_prediction, rgb_to_grayscale_depth, LUMA_WEIGHTS,
};
pub use mask::{compute_valid_mask, DEFAULT_INVALID_VALUE};
pub use npy::{is_npy_path, load_npy_depth};
pub use pad::pad_to_aspect_ratio;
pub use resize::{resize_depth_map, Interpolation};
