use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use burn::config::Config;
use clap::{Parser, Subcommand};
use depth_eval::{
    backend::{create_device, get_backend_name, SelectedBackend},
    discover_pairs, evaluate_pairs, EvaluatorConfig,
};
use depth_eval_util::{load_ground_truth, load_prediction};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "depth-eval")]
#[command(about = "Evaluate monocular depth predictions against ground truth")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single ground-truth / prediction pair
    Eval {
        /// Ground-truth depth: 8 or 16-bit single-channel image, or float `.npy`
        #[arg(long)]
        gt: PathBuf,

        /// Predicted depth image (RGB or grayscale)
        #[arg(long)]
        pred: PathBuf,

        /// Patch size for local metrics
        #[arg(long, num_args = 2, value_names = ["HEIGHT", "WIDTH"])]
        patch: Option<Vec<usize>>,

        /// Evaluator configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Evaluate every `depth_<i>` / `image_<i>` pair of two directories
    Batch {
        #[arg(long)]
        gt_dir: PathBuf,

        #[arg(long)]
        pred_dir: PathBuf,

        /// Evaluator configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show backend information
    Info,
}

fn load_config(path: Option<&PathBuf>) -> Result<EvaluatorConfig> {
    let config = match path {
        Some(path) => EvaluatorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EvaluatorConfig::new(),
    };
    config.validate()?;
    Ok(config)
}

fn emit<T: Serialize>(report: &T, out: Option<&PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    match out {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let device = create_device();

    match cli.command {
        Commands::Eval {
            gt,
            pred,
            patch,
            config,
            out,
        } => {
            let config = load_config(config.as_ref())?;
            let patch_size = match patch.as_deref() {
                Some(&[h, w]) => Some([h, w]),
                Some(other) => anyhow::bail!("--patch takes two values, got {}", other.len()),
                None => config.patch_size,
            };
            let evaluator = config.init()?;

            tracing::info!(
                gt = %gt.display(),
                pred = %pred.display(),
                backend = get_backend_name(),
                "evaluating pair"
            );
            let gt = load_ground_truth::<SelectedBackend, _>(&gt, config.depth_scale, &device)?;
            let pred = load_prediction::<SelectedBackend, _>(&pred, &device)?;

            let report = evaluator.evaluate(gt, pred, patch_size)?;
            emit(&report, out.as_ref())
        }

        Commands::Batch {
            gt_dir,
            pred_dir,
            config,
            out,
        } => {
            let config = load_config(config.as_ref())?;
            let evaluator = config.init()?;
            let pairs = discover_pairs(&gt_dir, &pred_dir)?;

            tracing::info!(
                pairs = pairs.len(),
                backend = get_backend_name(),
                "evaluating dataset"
            );
            let report = evaluate_pairs::<SelectedBackend, _, _, _>(
                &evaluator,
                &pairs,
                config.depth_scale,
                config.patch_size,
                &device,
            )?;

            tracing::info!(
                count = report.count,
                abs_rel = report.mean.abs_rel,
                delta1 = report.mean.delta1,
                rmse = report.mean.rmse,
                "dataset mean"
            );
            emit(&report, out.as_ref())
        }

        Commands::Info => {
            println!("depth-eval Information:");
            println!("  Backend: {}", get_backend_name());
            println!("  Device: {device:?}");
            Ok(())
        }
    }
}
