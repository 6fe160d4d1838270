//! Pairing ground-truth and prediction files on disk.
//!
//! A dataset is two flat directories: ground truth named `depth_<index>.<ext>`
//! (an image or a NumPy `.npy` array) and predictions named
//! `image_<index>.<ext>`. Files are matched by the numeric index; indices
//! missing on either side are skipped.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use burn::tensor::{backend::Backend, Tensor};
use depth_eval_util::{is_npy_path, load_ground_truth, load_prediction};
use image::ImageFormat;
use walkdir::WalkDir;

use crate::error::{DatasetError, DatasetResult, EvalResult};

/// File stem prefix of ground-truth depth maps.
pub const GROUND_TRUTH_PREFIX: &str = "depth_";
/// File stem prefix of predicted depth images.
pub const PREDICTION_PREFIX: &str = "image_";

/// One ground-truth file and the prediction with the same index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePair {
    pub index: u64,
    pub ground_truth: PathBuf,
    pub prediction: PathBuf,
}

impl SamplePair {
    /// Loads both files as `[H, W]` depth tensors.
    ///
    /// Image ground truth is divided by `depth_scale`, `.npy` ground truth is
    /// taken as metric depth. The prediction is converted to grayscale.
    pub fn load<B: Backend>(
        &self,
        depth_scale: f64,
        device: &B::Device,
    ) -> EvalResult<(Tensor<B, 2>, Tensor<B, 2>)> {
        let gt = load_ground_truth(&self.ground_truth, depth_scale, device)?;
        let pred = load_prediction(&self.prediction, device)?;
        Ok((gt, pred))
    }
}

/// Parses `<prefix><digits>` into the index.
fn parse_index(stem: &str, prefix: &str) -> Option<u64> {
    let digits = stem.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn is_image_file(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok()
}

fn is_ground_truth_file(path: &Path) -> bool {
    is_npy_path(path) || is_image_file(path)
}

/// Collects the files of `dir` whose stem matches `prefix` and that pass
/// `accept`, keyed by index.
fn index_directory(
    dir: &Path,
    prefix: &str,
    accept: fn(&Path) -> bool,
) -> DatasetResult<BTreeMap<u64, PathBuf>> {
    if !dir.is_dir() {
        return Err(DatasetError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = BTreeMap::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| DatasetError::DirectoryReadFailed {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || !accept(path) {
            continue;
        }

        let Some(index) = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| parse_index(stem, prefix))
        else {
            continue;
        };

        if let Some(previous) = files.insert(index, path.to_path_buf()) {
            tracing::warn!(
                index,
                kept = %path.display(),
                dropped = %previous.display(),
                "duplicate index"
            );
        }
    }
    Ok(files)
}

/// Finds every index present in both directories, sorted ascending.
///
/// # Errors
///
/// Fails when a directory is missing or unreadable, or when no index is
/// shared by both sides.
pub fn discover_pairs(
    gt_dir: impl AsRef<Path>,
    pred_dir: impl AsRef<Path>,
) -> DatasetResult<Vec<SamplePair>> {
    let gt_dir = gt_dir.as_ref();
    let pred_dir = pred_dir.as_ref();

    let ground_truth = index_directory(gt_dir, GROUND_TRUTH_PREFIX, is_ground_truth_file)?;
    let mut predictions = index_directory(pred_dir, PREDICTION_PREFIX, is_image_file)?;

    let pairs: Vec<SamplePair> = ground_truth
        .into_iter()
        .filter_map(|(index, ground_truth)| {
            predictions.remove(&index).map(|prediction| SamplePair {
                index,
                ground_truth,
                prediction,
            })
        })
        .collect();

    if pairs.is_empty() {
        return Err(DatasetError::NoValidPairs {
            gt_dir: gt_dir.to_path_buf(),
            pred_dir: pred_dir.to_path_buf(),
        });
    }

    tracing::info!(
        pairs = pairs.len(),
        unmatched_predictions = predictions.len(),
        gt_dir = %gt_dir.display(),
        pred_dir = %pred_dir.display(),
        "discovered sample pairs"
    );
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("depth_000042", GROUND_TRUTH_PREFIX, Some(42))]
    #[case("image_7", PREDICTION_PREFIX, Some(7))]
    #[case("depth_", GROUND_TRUTH_PREFIX, None)]
    #[case("depth_12a", GROUND_TRUTH_PREFIX, None)]
    #[case("image_3", GROUND_TRUTH_PREFIX, None)]
    #[case("depth_+5", GROUND_TRUTH_PREFIX, None)]
    fn parses_indices(#[case] stem: &str, #[case] prefix: &str, #[case] expected: Option<u64>) {
        assert_eq!(parse_index(stem, prefix), expected);
    }

    #[rstest]
    #[case("depth_000001.npy", true, false)]
    #[case("depth_000001.png", true, true)]
    #[case("image_000001.jpg", true, true)]
    #[case("depth_000001.txt", false, false)]
    fn file_kinds(#[case] name: &str, #[case] ground_truth: bool, #[case] image: bool) {
        assert_eq!(is_ground_truth_file(Path::new(name)), ground_truth);
        assert_eq!(is_image_file(Path::new(name)), image);
    }

    #[test]
    fn missing_directory_is_reported() {
        let result = discover_pairs("/definitely/not/here", "/nor/here");
        assert!(matches!(
            result,
            Err(DatasetError::DirectoryNotFound { .. })
        ));
    }
}
