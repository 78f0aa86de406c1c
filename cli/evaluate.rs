use crate::{
	config::{load_config, Settings},
	load::load_predictions,
};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use neuroscan_metrics::{evaluate, EvaluationInput, Report};
use neuroscan_report::{Console, Markdown, ReportDocument};
use std::path::{Path, PathBuf};

pub struct EvaluateArgs<'a> {
	pub predictions: &'a Path,
	pub config: Option<&'a Path>,
	pub threshold: Option<f64>,
	pub output_dir: Option<&'a Path>,
}

pub fn run(args: EvaluateArgs) -> Result<()> {
	let config = load_config(args.config)?;
	let settings = Settings::resolve(args.threshold, args.output_dir, config.as_ref());
	log::info!("predictions: {}", display_path(args.predictions));
	log::info!("output directory: {}", display_path(&settings.output_dir));

	let predictions = load_predictions(args.predictions)?;
	log::info!("loaded {} predictions", predictions.labels.len());

	let report = evaluate(
		EvaluationInput {
			probabilities: predictions.probabilities.view(),
			labels: predictions.labels.view(),
		},
		&settings.evaluation,
	)?;
	println!("{}", Console::new(&report));

	let timestamp = chrono::Local::now().naive_local();
	let (metrics_path, results_path) = write_artifacts(&settings.output_dir, &report, &timestamp)?;
	log::info!("saved {}", metrics_path.display());
	log::info!("saved {}", results_path.display());
	Ok(())
}

/// Write `metrics.json` and `results.md` to `output_dir`, creating it if necessary. Returns the paths written.
pub fn write_artifacts(
	output_dir: &Path,
	report: &Report,
	timestamp: &NaiveDateTime,
) -> Result<(PathBuf, PathBuf)> {
	std::fs::create_dir_all(output_dir)
		.with_context(|| format!("failed to create directory {}", output_dir.display()))?;
	let metrics_path = output_dir.join("metrics.json");
	let json = ReportDocument::new(report, timestamp).to_json()?;
	std::fs::write(&metrics_path, json)
		.with_context(|| format!("failed to write {}", metrics_path.display()))?;
	let results_path = output_dir.join("results.md");
	let markdown = Markdown::new(report, timestamp).to_string();
	std::fs::write(&results_path, markdown)
		.with_context(|| format!("failed to write {}", results_path.display()))?;
	Ok((metrics_path, results_path))
}

/// Display the absolute path when it can be resolved, which makes relative paths in logs unambiguous.
fn display_path(path: &Path) -> String {
	std::fs::canonicalize(path)
		.unwrap_or_else(|_| path.to_owned())
		.display()
		.to_string()
}

#[test]
fn test_write_artifacts() {
	let probabilities = ndarray::arr1(&[0.9, 0.1, 0.8, 0.2]);
	let labels = ndarray::arr1(&[1, 0, 1, 0]);
	let report = evaluate(
		EvaluationInput {
			probabilities: probabilities.view(),
			labels: labels.view(),
		},
		&Default::default(),
	)
	.unwrap();
	let dir = tempfile::tempdir().unwrap();
	let output_dir = dir.path().join("eval_final");
	let timestamp = chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
		.and_then(|date| date.and_hms_opt(9, 30, 0))
		.unwrap();
	let (metrics_path, results_path) = write_artifacts(&output_dir, &report, &timestamp).unwrap();
	assert_eq!(metrics_path, output_dir.join("metrics.json"));
	let metrics = std::fs::read_to_string(&metrics_path).unwrap();
	assert!(metrics.contains("\"timestamp\": \"2024-03-01T09:30:00\""));
	assert!(metrics.contains("\"threshold_locked\": 0.05"));
	let results = std::fs::read_to_string(&results_path).unwrap();
	assert!(results.starts_with("# Final Test Evaluation\n"));
	assert!(results.contains("- Test images: **4**"));
}

#[test]
fn test_run() {
	let dir = tempfile::tempdir().unwrap();
	let predictions_path = dir.path().join("predictions.csv");
	std::fs::write(
		&predictions_path,
		"probability,label\n0.9,1\n0.1,0\n0.8,1\n0.2,0\n",
	)
	.unwrap();
	let config_path = dir.path().join("config.yaml");
	std::fs::write(&config_path, "threshold: 0.5\nsweep:\n  thresholds: [0.25, 0.5]\n").unwrap();
	let output_dir = dir.path().join("out");
	run(EvaluateArgs {
		predictions: &predictions_path,
		config: Some(&config_path),
		threshold: None,
		output_dir: Some(&output_dir),
	})
	.unwrap();
	let metrics: serde_json::Value =
		serde_json::from_str(&std::fs::read_to_string(output_dir.join("metrics.json")).unwrap())
			.unwrap();
	assert_eq!(metrics["threshold_locked"], 0.5);
	assert_eq!(metrics["metrics"]["f1"], 1.0);
	assert_eq!(metrics["best_f1_sweep"]["threshold"], 0.25);
}

#[test]
fn test_run_invalid_labels() {
	let dir = tempfile::tempdir().unwrap();
	let predictions_path = dir.path().join("predictions.csv");
	std::fs::write(&predictions_path, "probability,label\n0.9,2\n").unwrap();
	let error = run(EvaluateArgs {
		predictions: &predictions_path,
		config: None,
		threshold: None,
		output_dir: Some(&dir.path().join("out")),
	})
	.unwrap_err();
	assert_eq!(
		error.to_string(),
		"invalid input: label 2 at index 0 is not 0 or 1"
	);
}

#[test]
fn test_run_probability_below_the_threshold() {
	let dir = tempfile::tempdir().unwrap();
	let predictions_path = dir.path().join("predictions.csv");
	std::fs::write(&predictions_path, "probability,label\n0.34999999,0\n0.9,1\n").unwrap();
	let output_dir = dir.path().join("out");
	run(EvaluateArgs {
		predictions: &predictions_path,
		config: None,
		threshold: Some(0.35),
		output_dir: Some(&output_dir),
	})
	.unwrap();
	let metrics: serde_json::Value =
		serde_json::from_str(&std::fs::read_to_string(output_dir.join("metrics.json")).unwrap())
			.unwrap();
	assert_eq!(metrics["confusion_matrix"]["fp"], 0);
	assert_eq!(metrics["confusion_matrix"]["tn"], 1);
}
