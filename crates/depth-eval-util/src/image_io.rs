//! Conversions between images and depth tensors.

use std::path::Path;

use burn::tensor::{backend::Backend, Tensor, TensorData};
use image::{DynamicImage, GenericImageView};

use crate::{
    error::{UtilError, UtilResult},
    npy::{is_npy_path, load_npy_depth},
};

/// ITU-R BT.601 luma weights for R, G and B.
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Collapses an `[H, W, 3]` RGB tensor to an `[H, W]` luminance map
/// (`0.299 R + 0.587 G + 0.114 B`).
///
/// # Errors
///
/// Returns [`UtilError::InvalidChannels`] if the last dimension is not 3.
pub fn rgb_to_grayscale_depth<B: Backend>(rgb: Tensor<B, 3>) -> UtilResult<Tensor<B, 2>> {
    let [height, width, channels] = rgb.dims();
    if channels != 3 {
        return Err(UtilError::InvalidChannels { actual: channels });
    }

    let weights = Tensor::<B, 1>::from_floats(LUMA_WEIGHTS, &rgb.device()).reshape([1, 1, 3]);
    Ok((rgb * weights).sum_dim(2).reshape([height, width]))
}

/// Converts an image to an `[H, W, 3]` tensor with channels scaled to `[0, 1]`.
pub fn image_to_rgb_tensor<B: Backend>(img: &DynamicImage, device: &B::Device) -> Tensor<B, 3> {
    let (width, height) = img.dimensions();
    let buf = img.to_rgb32f().into_raw();
    let data = TensorData::new(buf, [height as usize, width as usize, 3]);
    Tensor::from_data(data, device)
}

/// Luminance of an image as a depth proxy, with 8-bit channels normalised by 255.
pub fn grayscale_from_image<B: Backend>(
    img: &DynamicImage,
    device: &B::Device,
) -> UtilResult<Tensor<B, 2>> {
    rgb_to_grayscale_depth(image_to_rgb_tensor(img, device))
}

/// Reads a single-channel depth image, dividing raw pixel values by `depth_scale`.
///
/// # Errors
///
/// Returns [`UtilError::UnsupportedDepthFormat`] for anything but 8- or 16-bit
/// grayscale, and [`UtilError::InvalidDepthScale`] for a non-positive scale.
pub fn depth_from_image<B: Backend>(
    img: &DynamicImage,
    depth_scale: f64,
    device: &B::Device,
) -> UtilResult<Tensor<B, 2>> {
    if !(depth_scale.is_finite() && depth_scale > 0.0) {
        return Err(UtilError::InvalidDepthScale { scale: depth_scale });
    }

    let (width, height) = img.dimensions();
    let raw: Vec<f32> = match img {
        DynamicImage::ImageLuma16(buf) => buf.as_raw().iter().map(|&v| f32::from(v)).collect(),
        DynamicImage::ImageLuma8(buf) => buf.as_raw().iter().map(|&v| f32::from(v)).collect(),
        other => {
            return Err(UtilError::UnsupportedDepthFormat {
                color: format!("{:?}", other.color()),
            })
        }
    };

    let data = TensorData::new(raw, [height as usize, width as usize]);
    Ok(Tensor::<B, 2>::from_data(data, device).div_scalar(depth_scale))
}

fn open_image<P: AsRef<Path>>(path: P) -> UtilResult<DynamicImage> {
    image::open(&path).map_err(|source| UtilError::ImageLoad {
        path: path.as_ref().display().to_string(),
        source,
    })
}

/// Loads a ground-truth depth map from disk.
///
/// `.npy` files hold metric depth and are read as is (see
/// [`load_npy_depth`]); images go through [`depth_from_image`] and are divided
/// by `depth_scale`.
pub fn load_ground_truth<B: Backend, P: AsRef<Path>>(
    path: P,
    depth_scale: f64,
    device: &B::Device,
) -> UtilResult<Tensor<B, 2>> {
    let path = path.as_ref();
    if is_npy_path(path) {
        return load_npy_depth(path, device);
    }
    depth_from_image(&open_image(path)?, depth_scale, device)
}

/// Loads a predicted depth image from disk and converts it to luminance.
pub fn load_prediction<B: Backend, P: AsRef<Path>>(
    path: P,
    device: &B::Device,
) -> UtilResult<Tensor<B, 2>> {
    grayscale_from_image(&open_image(path)?, device)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use burn::backend::NdArray;
    use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};

    use super::*;

    type TestBackend = NdArray;

    #[test]
    fn primary_colours_map_to_luma_weights() {
        let device = Default::default();
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        img.put_pixel(1, 1, Rgb([255, 255, 255]));

        let gray =
            grayscale_from_image::<TestBackend>(&DynamicImage::ImageRgb8(img), &device).unwrap();
        assert_eq!(gray.dims(), [2, 2]);

        let values = gray.into_data().to_vec::<f32>().unwrap();
        for (v, e) in values.iter().zip([0.299, 0.587, 0.114, 1.0]) {
            assert_relative_eq!(*v, e, max_relative = 1e-2);
            assert!((0.0..=1.0 + 1e-6).contains(v));
        }
    }

    #[test]
    fn identical_channels_are_preserved() {
        let device = Default::default();
        let plane: Vec<f32> = (0..16).map(|v| v as f32).collect();
        let rgb: Vec<f32> = plane.iter().flat_map(|&v| [v, v, v]).collect();
        let tensor = Tensor::<TestBackend, 3>::from_data(TensorData::new(rgb, [4, 4, 3]), &device);

        let gray = rgb_to_grayscale_depth(tensor).unwrap();
        for (v, e) in gray.into_data().to_vec::<f32>().unwrap().iter().zip(plane) {
            assert_relative_eq!(*v, e, epsilon = 1e-4);
        }
    }

    #[test]
    fn non_rgb_input_is_rejected() {
        let device = Default::default();
        let tensor = Tensor::<TestBackend, 3>::zeros([10, 10, 1], &device);

        assert!(matches!(
            rgb_to_grayscale_depth(tensor),
            Err(UtilError::InvalidChannels { actual: 1 })
        ));
    }

    #[test]
    fn sixteen_bit_depth_is_scaled() {
        let device = Default::default();
        let img: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_raw(2, 1, vec![1500, 0]).unwrap();

        let depth =
            depth_from_image::<TestBackend>(&DynamicImage::ImageLuma16(img), 1000.0, &device)
                .unwrap();
        assert_eq!(depth.dims(), [1, 2]);
        assert_eq!(depth.into_data().to_vec::<f32>().unwrap(), vec![1.5, 0.0]);
    }

    #[test]
    fn colour_depth_images_are_rejected() {
        let device = Default::default();
        let img = DynamicImage::ImageRgb8(RgbImage::new(2, 2));

        assert!(matches!(
            depth_from_image::<TestBackend>(&img, 1.0, &device),
            Err(UtilError::UnsupportedDepthFormat { .. })
        ));
    }

    #[test]
    fn non_positive_scale_is_rejected() {
        let device = Default::default();
        let img = DynamicImage::ImageLuma8(GrayImage::new(2, 2));

        assert!(matches!(
            depth_from_image::<TestBackend>(&img, 0.0, &device),
            Err(UtilError::InvalidDepthScale { .. })
        ));
    }
}
