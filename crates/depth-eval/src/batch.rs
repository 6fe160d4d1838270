//! Evaluation over many sample pairs.

use burn::tensor::backend::Backend;
use depth_eval_metric::{DepthMetrics, DepthMetricsAggregator};
use serde::{Deserialize, Serialize};

use crate::{
    dataset::SamplePair,
    error::EvalResult,
    evaluator::{DepthEvaluator, EvaluationReport},
    strategy::{AlignStrategy, MaskStrategy, ResizeStrategy},
};

/// Report for one dataset sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleReport {
    pub index: u64,
    #[serde(flatten)]
    pub report: EvaluationReport,
}

/// Per-sample reports plus the dataset mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub samples: Vec<SampleReport>,
    /// NaN-skipping mean of the per-sample global metrics.
    pub mean: DepthMetrics,
    pub count: usize,
}

/// Loads and evaluates every pair with the same evaluator.
///
/// Pairs are processed in order and the first failure aborts the run.
pub fn evaluate_pairs<B, R, A, M>(
    evaluator: &DepthEvaluator<R, A, M>,
    pairs: &[SamplePair],
    depth_scale: f64,
    patch_size: Option<[usize; 2]>,
    device: &B::Device,
) -> EvalResult<BatchReport>
where
    B: Backend,
    R: ResizeStrategy<B>,
    A: AlignStrategy<B>,
    M: MaskStrategy<B>,
{
    let mut aggregator = DepthMetricsAggregator::new();
    let mut samples = Vec::with_capacity(pairs.len());

    for (i, pair) in pairs.iter().enumerate() {
        let (gt, pred) = pair.load::<B>(depth_scale, device)?;
        let report = evaluator.evaluate(gt, pred, patch_size)?;

        aggregator.update(&report.global);
        tracing::info!(
            index = pair.index,
            done = i + 1,
            total = pairs.len(),
            abs_rel = report.global.abs_rel,
            delta1 = report.global.delta1,
            rmse = report.global.rmse,
            "evaluated sample"
        );

        samples.push(SampleReport {
            index: pair.index,
            report,
        });
    }

    Ok(BatchReport {
        samples,
        mean: aggregator.means(),
        count: aggregator.sample_count(),
    })
}
