//! Root mean squared error.

use burn::tensor::{backend::Backend, Bool, Tensor};

use crate::{
    error::MetricResult,
    reduce::{check_inputs, masked_mean},
};

/// `sqrt(mean((gt - pred)²))` over the included elements. An empty mask
/// yields NaN.
///
/// # Errors
///
/// Returns [`MetricError::ShapeMismatch`](crate::MetricError::ShapeMismatch)
/// if the inputs are not congruent.
pub fn rmse<B: Backend, const D: usize>(
    gt: Tensor<B, D>,
    pred: Tensor<B, D>,
    mask: Option<Tensor<B, D, Bool>>,
) -> MetricResult<f64> {
    check_inputs(&gt, &pred, mask.as_ref())?;
    let squared = (gt - pred).powf_scalar(2.0);
    Ok(masked_mean(squared, mask).sqrt())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use burn::backend::NdArray;

    use super::*;
    use crate::MetricError;

    type TestBackend = NdArray;

    #[test]
    fn matches_hand_computed_value() {
        let device = Default::default();
        let gt = Tensor::<TestBackend, 1>::from_floats([1.0, 2.0, 3.0, 4.0], &device);
        let pred = Tensor::<TestBackend, 1>::from_floats([1.1, 2.0, 2.7, 3.8], &device);

        let expected = ((0.01 + 0.0 + 0.09 + 0.04) / 4.0_f64).sqrt();
        assert_relative_eq!(rmse(gt, pred, None).unwrap(), expected, epsilon = 1e-6);
    }

    #[test]
    fn only_masked_elements_participate() {
        let device = Default::default();
        let gt = Tensor::<TestBackend, 1>::from_floats([1.0, 2.0, 3.0, 4.0], &device);
        let pred = Tensor::<TestBackend, 1>::from_floats([1.1, 2.1, 3.1, 3.5], &device);
        let mask = Tensor::<TestBackend, 1, Bool>::from_data([true, false, true, false], &device);

        assert_relative_eq!(rmse(gt, pred, Some(mask)).unwrap(), 0.1, epsilon = 1e-6);
    }

    #[test]
    fn mismatched_mask_is_rejected() {
        let device = Default::default();
        let gt = Tensor::<TestBackend, 1>::ones([4], &device);
        let mask = Tensor::<TestBackend, 1, Bool>::from_data([true, false], &device);

        match rmse(gt.clone(), gt, Some(mask)) {
            Err(MetricError::ShapeMismatch { expected, actual }) => {
                assert_eq!(expected, vec![4]);
                assert_eq!(actual, vec![2]);
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }
}
