//! Evaluator configuration.

use burn::prelude::*;
use depth_eval_util::Interpolation;

use crate::{
    error::{EvalError, EvalResult},
    evaluator::DepthEvaluator,
    strategy::{DepthResizer, ScaleShiftAligner, ThresholdMask},
};

/// Settings for the default [`DepthEvaluator`] and for reading datasets.
#[derive(Config, Debug)]
pub struct EvaluatorConfig {
    /// Kernel used to bring predictions onto the ground-truth grid.
    #[config(default = "Interpolation::Linear")]
    pub interpolation: Interpolation,
    /// Ground truth at or below this value is invalid.
    #[config(default = "0.0")]
    pub invalid_value: f64,
    /// Optional `[height, width]` of evaluation patches.
    #[config(default = "None")]
    pub patch_size: Option<[usize; 2]>,
    /// Divisor applied to raw ground-truth image values (millimetres to metres by default).
    /// `.npy` ground truth is already metric and is not scaled.
    #[config(default = "1000.0")]
    pub depth_scale: f64,
}

impl EvaluatorConfig {
    /// Checks the configuration for inconsistent values.
    pub fn validate(&self) -> EvalResult<()> {
        if let Some([h, w]) = self.patch_size {
            if h == 0 || w == 0 {
                return Err(EvalError::InvalidConfiguration {
                    reason: format!("patch size must be positive, got {h}x{w}"),
                });
            }
        }
        if !(self.depth_scale.is_finite() && self.depth_scale > 0.0) {
            return Err(EvalError::InvalidConfiguration {
                reason: format!("depth scale must be positive, got {}", self.depth_scale),
            });
        }
        if !self.invalid_value.is_finite() {
            return Err(EvalError::InvalidConfiguration {
                reason: "invalid value threshold must be finite".to_string(),
            });
        }
        Ok(())
    }

    /// Builds the default evaluator with the configured strategies.
    pub fn init(&self) -> EvalResult<DepthEvaluator> {
        self.validate()?;
        Ok(DepthEvaluator::new(
            DepthResizer::new(self.interpolation),
            ScaleShiftAligner,
            ThresholdMask::new(self.invalid_value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EvaluatorConfig::new();

        assert_eq!(config.interpolation, Interpolation::Linear);
        assert_eq!(config.invalid_value, 0.0);
        assert_eq!(config.patch_size, None);
        assert_eq!(config.depth_scale, 1000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn init_uses_configured_strategies() {
        let evaluator = EvaluatorConfig::new()
            .with_interpolation(Interpolation::Nearest)
            .with_invalid_value(0.5)
            .init()
            .unwrap();

        assert_eq!(evaluator.resizer().interpolation, Interpolation::Nearest);
        assert_eq!(evaluator.masker().invalid_value, 0.5);
    }

    #[test]
    fn zero_patch_dimension_is_invalid() {
        let config = EvaluatorConfig::new().with_patch_size(Some([0, 8]));

        match config.validate() {
            Err(EvalError::InvalidConfiguration { reason }) => {
                assert!(reason.contains("patch size"));
            }
            _ => panic!("Expected InvalidConfiguration error"),
        }
    }

    #[test]
    fn non_positive_depth_scale_is_invalid() {
        let config = EvaluatorConfig::new().with_depth_scale(0.0);
        assert!(config.init().is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let config = EvaluatorConfig::new()
            .with_interpolation(Interpolation::Nearest)
            .with_patch_size(Some([16, 32]));

        let json = config.to_string();
        assert!(json.contains("\"nearest\""));

        let restored = EvaluatorConfig::load_binary(json.as_bytes()).unwrap();
        assert_eq!(restored.interpolation, Interpolation::Nearest);
        assert_eq!(restored.patch_size, Some([16, 32]));
    }
}
