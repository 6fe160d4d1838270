//! Shared validation and masked reduction.

use burn::tensor::{backend::Backend, Bool, ElementConversion, Tensor};

use crate::error::{MetricError, MetricResult};

/// Checks that `pred` and, if present, `mask` have the shape of `gt`.
pub(crate) fn check_inputs<B: Backend, const D: usize>(
    gt: &Tensor<B, D>,
    pred: &Tensor<B, D>,
    mask: Option<&Tensor<B, D, Bool>>,
) -> MetricResult<()> {
    let expected = gt.dims();
    let mismatch = |actual: [usize; D]| MetricError::ShapeMismatch {
        expected: expected.to_vec(),
        actual: actual.to_vec(),
    };

    if pred.dims() != expected {
        return Err(mismatch(pred.dims()));
    }
    if let Some(mask) = mask {
        if mask.dims() != expected {
            return Err(mismatch(mask.dims()));
        }
    }
    Ok(())
}

/// Mean of `values` over the elements selected by `mask` (all elements if `None`).
///
/// Excluded elements are replaced before summation, so NaN or infinite values
/// there do not leak into the result. An empty selection yields NaN.
pub(crate) fn masked_mean<B: Backend, const D: usize>(
    values: Tensor<B, D>,
    mask: Option<Tensor<B, D, Bool>>,
) -> f64 {
    let (total, count) = match mask {
        Some(mask) => {
            let count = mask.clone().float().sum().into_scalar().elem::<f64>();
            let total = values
                .mask_fill(mask.bool_not(), 0.0)
                .sum()
                .into_scalar()
                .elem::<f64>();
            (total, count)
        }
        None => {
            let count = values.shape().num_elements() as f64;
            (values.sum().into_scalar().elem::<f64>(), count)
        }
    };
    total / count
}
