use std::{fs, path::Path};

use approx::assert_abs_diff_eq;
use burn::backend::NdArray;
use depth_eval::{discover_pairs, evaluate_pairs, DatasetError, EvaluatorConfig};
use image::{ImageBuffer, Luma, Rgb, RgbImage};
use ndarray::Array2;
use ndarray_npy::write_npy;
use tempfile::TempDir;

type TestBackend = NdArray;

/// 16-bit depth in millimetres: 1000, 1100, ... along the raster order.
fn write_ground_truth(path: &Path) {
    let image = ImageBuffer::<Luma<u16>, Vec<u16>>::from_fn(4, 4, |x, y| {
        Luma([1000 + 100 * (y * 4 + x) as u16])
    });
    image.save(path).unwrap();
}

/// Gray RGB prediction proportional to the ground-truth ramp plus an offset.
fn write_prediction(path: &Path) {
    let image = RgbImage::from_fn(4, 4, |x, y| {
        let v = 5 + 10 * (y * 4 + x) as u8;
        Rgb([v, v, v])
    });
    image.save(path).unwrap();
}

fn dataset() -> TempDir {
    let root = TempDir::new().unwrap();
    let gt_dir = root.path().join("gt");
    let pred_dir = root.path().join("pred");
    fs::create_dir_all(&gt_dir).unwrap();
    fs::create_dir_all(&pred_dir).unwrap();

    write_ground_truth(&gt_dir.join("depth_000001.png"));
    write_ground_truth(&gt_dir.join("depth_000002.png"));
    write_ground_truth(&gt_dir.join("depth_000010.png"));
    fs::write(gt_dir.join("depth_000003.txt"), "not an image").unwrap();

    write_prediction(&pred_dir.join("image_000002.png"));
    write_prediction(&pred_dir.join("image_000010.png"));
    write_prediction(&pred_dir.join("image_000004.png"));
    write_prediction(&pred_dir.join("thumbnail.png"));

    root
}

#[test]
fn pairs_only_shared_indices_in_order() {
    let root = dataset();
    let pairs = discover_pairs(root.path().join("gt"), root.path().join("pred")).unwrap();

    let indices: Vec<u64> = pairs.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![2, 10]);
    assert!(pairs[0].ground_truth.ends_with("depth_000002.png"));
    assert!(pairs[0].prediction.ends_with("image_000002.png"));
}

#[test]
fn disjoint_directories_have_no_pairs() {
    let root = dataset();
    let empty = root.path().join("empty");
    fs::create_dir_all(&empty).unwrap();

    let result = discover_pairs(root.path().join("gt"), &empty);
    assert!(matches!(result, Err(DatasetError::NoValidPairs { .. })));
}

#[test]
fn batch_evaluation_aligns_every_sample() {
    let root = dataset();
    let pairs = discover_pairs(root.path().join("gt"), root.path().join("pred")).unwrap();
    let config = EvaluatorConfig::new().with_patch_size(Some([2, 2]));
    let evaluator = config.init().unwrap();

    let device = Default::default();
    let report = evaluate_pairs::<TestBackend, _, _, _>(
        &evaluator,
        &pairs,
        config.depth_scale,
        config.patch_size,
        &device,
    )
    .unwrap();

    assert_eq!(report.count, 2);
    assert_eq!(report.samples.len(), 2);
    for sample in &report.samples {
        assert_eq!(sample.report.patches.as_ref().map(Vec::len), Some(4));
    }
    assert_abs_diff_eq!(report.mean.abs_rel, 0.0, epsilon = 1e-4);
    assert_abs_diff_eq!(report.mean.delta1, 1.0, epsilon = 1e-9);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["samples"][0]["index"], 2);
    assert!(json["samples"][0]["global"]["AbsRel"].is_number());
    assert!(json["mean"]["δ1"].is_number());
}

/// Ground truth in metres, matching [`write_ground_truth`] after scaling.
fn write_npy_ground_truth(path: &Path) {
    let depth = Array2::from_shape_fn((4, 4), |(y, x)| 1.0 + 0.1 * (y * 4 + x) as f32);
    write_npy(path, &depth).unwrap();
}

#[test]
fn numpy_ground_truth_is_paired_and_read_unscaled() {
    let root = TempDir::new().unwrap();
    let gt_dir = root.path().join("depth_raw");
    let pred_dir = root.path().join("image");
    fs::create_dir_all(&gt_dir).unwrap();
    fs::create_dir_all(&pred_dir).unwrap();

    write_npy_ground_truth(&gt_dir.join("depth_000000.npy"));
    write_npy_ground_truth(&gt_dir.join("depth_000001.npy"));
    write_prediction(&pred_dir.join("image_000000.png"));
    write_prediction(&pred_dir.join("image_000001.png"));

    let pairs = discover_pairs(&gt_dir, &pred_dir).unwrap();
    let indices: Vec<u64> = pairs.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![0, 1]);

    let device = Default::default();
    let (gt, _) = pairs[0].load::<TestBackend>(1000.0, &device).unwrap();
    let values = gt.into_data().to_vec::<f32>().unwrap();
    assert_abs_diff_eq!(values[0], 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(values[15], 2.5, epsilon = 1e-6);

    let evaluator = EvaluatorConfig::new().init().unwrap();
    let report =
        evaluate_pairs::<TestBackend, _, _, _>(&evaluator, &pairs, 1000.0, None, &device).unwrap();
    assert_eq!(report.count, 2);
    assert_abs_diff_eq!(report.mean.abs_rel, 0.0, epsilon = 1e-4);
}
