//! Whole-image metric record.

use burn::tensor::{backend::Backend, Bool, Tensor};
use depth_eval_util::{compute_valid_mask, DEFAULT_INVALID_VALUE};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    abs_rel::abs_rel,
    error::MetricResult,
    reduce::check_inputs,
    rmse::rmse,
    threshold::{threshold_accuracy, DELTA1_THRESHOLD},
};

/// AbsRel, δ1 and RMSE for one prediction.
///
/// JSON has no NaN, so undefined metrics serialise as `null` and read back
/// as NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthMetrics {
    #[serde(rename = "AbsRel", deserialize_with = "nan_from_null")]
    pub abs_rel: f64,
    #[serde(rename = "δ1", deserialize_with = "nan_from_null")]
    pub delta1: f64,
    #[serde(rename = "RMSE", deserialize_with = "nan_from_null")]
    pub rmse: f64,
}

fn nan_from_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl DepthMetrics {
    pub const ABS_REL: &'static str = "AbsRel";
    pub const DELTA1: &'static str = "δ1";
    pub const RMSE: &'static str = "RMSE";

    /// Metric names in report order.
    pub const NAMES: [&'static str; 3] = [Self::ABS_REL, Self::DELTA1, Self::RMSE];

    /// Values in the order of [`Self::NAMES`].
    pub const fn values(&self) -> [f64; 3] {
        [self.abs_rel, self.delta1, self.rmse]
    }

    /// `(name, value)` pairs in report order.
    pub fn entries(&self) -> [(&'static str, f64); 3] {
        let [a, d, r] = self.values();
        [(Self::ABS_REL, a), (Self::DELTA1, d), (Self::RMSE, r)]
    }

    /// Looks a metric up by its report name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries()
            .into_iter()
            .find_map(|(key, value)| (key == name).then_some(value))
    }
}

/// Computes [`DepthMetrics`] over the masked pixels.
///
/// When `mask` is `None`, pixels with `gt > 0` are used.
///
/// # Errors
///
/// Returns [`MetricError::ShapeMismatch`](crate::MetricError::ShapeMismatch)
/// if the inputs are not congruent.
pub fn global_metrics<B: Backend, const D: usize>(
    gt: Tensor<B, D>,
    pred: Tensor<B, D>,
    mask: Option<Tensor<B, D, Bool>>,
) -> MetricResult<DepthMetrics> {
    check_inputs(&gt, &pred, mask.as_ref())?;
    let mask = mask.unwrap_or_else(|| compute_valid_mask(gt.clone(), DEFAULT_INVALID_VALUE));

    Ok(DepthMetrics {
        abs_rel: abs_rel(gt.clone(), pred.clone(), Some(mask.clone()))?,
        delta1: threshold_accuracy(
            gt.clone(),
            pred.clone(),
            DELTA1_THRESHOLD,
            Some(mask.clone()),
        )?,
        rmse: rmse(gt, pred, Some(mask))?,
    })
}
