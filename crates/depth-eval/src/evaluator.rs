//! The evaluation pipeline: resize → mask → align → metrics.

use burn::tensor::{backend::Backend, Bool, Tensor};
use depth_eval_metric::{global_metrics, patch_metrics, DepthMetrics, PatchRecord};
use depth_eval_util::{Interpolation, DEFAULT_INVALID_VALUE};
use serde::{Deserialize, Serialize};

use crate::{
    error::EvalResult,
    strategy::{
        AlignStrategy, DepthResizer, MaskStrategy, ResizeStrategy, ScaleShiftAligner,
        ThresholdMask,
    },
};

/// Result of one [`DepthEvaluator::evaluate`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub global: DepthMetrics,
    /// Present iff a patch size was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patches: Option<Vec<PatchRecord>>,
}

/// Evaluates predicted depth against ground truth.
///
/// The resize, align and mask steps are fixed at construction. Evaluation
/// holds no state between calls, so one evaluator can score any number of
/// independent pairs.
#[derive(Debug, Clone, Default)]
pub struct DepthEvaluator<R = DepthResizer, A = ScaleShiftAligner, M = ThresholdMask> {
    resizer: R,
    aligner: A,
    masker: M,
}

impl DepthEvaluator {
    /// Bilinear resizing, least-squares scale-and-shift alignment and the
    /// `gt > 0` valid mask.
    pub const fn standard() -> Self {
        Self::new(
            DepthResizer::new(Interpolation::Linear),
            ScaleShiftAligner,
            ThresholdMask::new(DEFAULT_INVALID_VALUE),
        )
    }
}

impl<R, A, M> DepthEvaluator<R, A, M> {
    pub const fn new(resizer: R, aligner: A, masker: M) -> Self {
        Self {
            resizer,
            aligner,
            masker,
        }
    }

    pub const fn resizer(&self) -> &R {
        &self.resizer
    }

    pub const fn aligner(&self) -> &A {
        &self.aligner
    }

    pub const fn masker(&self) -> &M {
        &self.masker
    }

    /// Resizes `pred` to the ground-truth shape, builds the valid mask and
    /// aligns the resized prediction.
    ///
    /// Returns the aligned prediction and the mask.
    pub fn prepare<B: Backend>(
        &self,
        gt: Tensor<B, 2>,
        pred: Tensor<B, 2>,
    ) -> EvalResult<(Tensor<B, 2>, Tensor<B, 2, Bool>)>
    where
        R: ResizeStrategy<B>,
        A: AlignStrategy<B>,
        M: MaskStrategy<B>,
    {
        let target = gt.dims();
        tracing::debug!(from = ?pred.dims(), to = ?target, "resizing prediction");
        let resized = self.resizer.resize(pred, target)?;

        let mask = self.masker.valid_mask(gt.clone());
        let aligned = self.aligner.align(resized, gt, mask.clone())?;

        Ok((aligned, mask))
    }

    /// Scores `pred` against `gt`.
    ///
    /// Global metrics are always computed; per-patch metrics are added when
    /// `patch_size = Some([ph, pw])`.
    ///
    /// # Errors
    ///
    /// Propagates any error from the strategies and the metric functions,
    /// e.g. a shape mismatch if a custom resizer misses the target shape.
    pub fn evaluate<B: Backend>(
        &self,
        gt: Tensor<B, 2>,
        pred: Tensor<B, 2>,
        patch_size: Option<[usize; 2]>,
    ) -> EvalResult<EvaluationReport>
    where
        R: ResizeStrategy<B>,
        A: AlignStrategy<B>,
        M: MaskStrategy<B>,
    {
        let (aligned, mask) = self.prepare(gt.clone(), pred)?;

        let global = global_metrics(gt.clone(), aligned.clone(), Some(mask.clone()))?;
        tracing::debug!(
            abs_rel = global.abs_rel,
            delta1 = global.delta1,
            rmse = global.rmse,
            "global metrics"
        );

        let patches = match patch_size {
            Some(size) => {
                let records = patch_metrics(gt, aligned, size, Some(mask))?;
                tracing::debug!(patches = records.len(), ?size, "patch metrics");
                Some(records)
            }
            None => None,
        };

        Ok(EvaluationReport { global, patches })
    }
}
