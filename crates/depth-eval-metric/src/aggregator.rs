//! Dataset-level averaging of per-sample metrics.

use crate::global::DepthMetrics;

/// Accumulates [`DepthMetrics`] across samples.
///
/// NaN values (samples with no valid pixels) are left out of the mean of the
/// metric they occur in.
#[derive(Debug, Clone, Default)]
pub struct DepthMetricsAggregator {
    sums: [f64; 3],
    counts: [usize; 3],
    samples: usize,
}

impl DepthMetricsAggregator {
    pub const fn new() -> Self {
        Self {
            sums: [0.0; 3],
            counts: [0; 3],
            samples: 0,
        }
    }

    /// Adds one sample.
    pub fn update(&mut self, metrics: &DepthMetrics) {
        for (i, value) in metrics.values().into_iter().enumerate() {
            if !value.is_nan() {
                self.sums[i] += value;
                self.counts[i] += 1;
            }
        }
        self.samples += 1;
    }

    /// Number of samples added, including those with NaN metrics.
    pub const fn sample_count(&self) -> usize {
        self.samples
    }

    /// Per-metric mean; NaN for a metric that never had a finite value.
    pub fn means(&self) -> DepthMetrics {
        let mean = |i: usize| {
            if self.counts[i] == 0 {
                f64::NAN
            } else {
                self.sums[i] / self.counts[i] as f64
            }
        };
        DepthMetrics {
            abs_rel: mean(0),
            delta1: mean(1),
            rmse: mean(2),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl<'a> Extend<&'a DepthMetrics> for DepthMetricsAggregator {
    fn extend<I: IntoIterator<Item = &'a DepthMetrics>>(&mut self, iter: I) {
        for metrics in iter {
            self.update(metrics);
        }
    }
}
