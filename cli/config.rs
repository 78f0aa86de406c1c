/*!
This module defines the `Config` struct, which is read from the optional yaml file passed to `neuroscan evaluate --config`. Every field is optional. Command line flags take precedence over the config file, which takes precedence over the defaults.

```yaml
threshold: 0.3
sweep:
  start: 0.05
  end: 0.95
  steps: 19
output_dir: eval_final
```
*/

use anyhow::{Context, Result};
use neuroscan_metrics::{default_sweep_grid, linspace_grid, EvaluationOptions};
use std::path::{Path, PathBuf};

/// The directory `metrics.json` and `results.md` are written to when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "eval_final";

#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
	pub threshold: Option<f64>,
	pub sweep: Option<SweepConfig>,
	pub output_dir: Option<PathBuf>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum SweepConfig {
	Thresholds { thresholds: Vec<f64> },
	Linspace { start: f64, end: f64, steps: usize },
}

impl SweepConfig {
	pub fn grid(&self) -> Vec<f64> {
		match self {
			SweepConfig::Thresholds { thresholds } => thresholds.clone(),
			SweepConfig::Linspace { start, end, steps } => linspace_grid(*start, *end, *steps),
		}
	}
}

pub fn load_config(config_path: Option<&Path>) -> Result<Option<Config>> {
	if let Some(config_path) = config_path {
		let config = std::fs::read_to_string(config_path)
			.with_context(|| format!("failed to read config file {}", config_path.display()))?;
		let config = serde_yaml::from_str(&config)
			.with_context(|| format!("failed to parse config file {}", config_path.display()))?;
		Ok(Some(config))
	} else {
		Ok(None)
	}
}

/// The settings for one evaluation after merging flags, the config file, and the defaults.
#[derive(Debug, PartialEq)]
pub struct Settings {
	pub evaluation: EvaluationOptions,
	pub output_dir: PathBuf,
}

impl Settings {
	pub fn resolve(
		threshold: Option<f64>,
		output_dir: Option<&Path>,
		config: Option<&Config>,
	) -> Settings {
		let defaults = EvaluationOptions::default();
		let locked_threshold = threshold
			.or_else(|| config.and_then(|config| config.threshold))
			.unwrap_or(defaults.locked_threshold);
		let sweep_grid = config
			.and_then(|config| config.sweep.as_ref())
			.map(|sweep| sweep.grid())
			.unwrap_or_else(default_sweep_grid);
		let output_dir = output_dir
			.map(Path::to_owned)
			.or_else(|| config.and_then(|config| config.output_dir.clone()))
			.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
		Settings {
			evaluation: EvaluationOptions {
				locked_threshold,
				sweep_grid,
			},
			output_dir,
		}
	}
}

#[test]
fn test_defaults() {
	let settings = Settings::resolve(None, None, None);
	assert_eq!(settings.evaluation, EvaluationOptions::default());
	assert_eq!(settings.output_dir, PathBuf::from("eval_final"));
}

#[test]
fn test_config_overrides_defaults() {
	let config: Config = serde_yaml::from_str(
		"threshold: 0.3\nsweep:\n  thresholds: [0.1, 0.5, 0.9]\noutput_dir: out\n",
	)
	.unwrap();
	let settings = Settings::resolve(None, None, Some(&config));
	assert_eq!(settings.evaluation.locked_threshold, 0.3);
	assert_eq!(settings.evaluation.sweep_grid, vec![0.1, 0.5, 0.9]);
	assert_eq!(settings.output_dir, PathBuf::from("out"));
}

#[test]
fn test_flags_override_config() {
	let config: Config = serde_yaml::from_str("threshold: 0.3\noutput_dir: out\n").unwrap();
	let settings = Settings::resolve(Some(0.7), Some(Path::new("flag_out")), Some(&config));
	assert_eq!(settings.evaluation.locked_threshold, 0.7);
	assert_eq!(settings.evaluation.sweep_grid, default_sweep_grid());
	assert_eq!(settings.output_dir, PathBuf::from("flag_out"));
}

#[test]
fn test_linspace_sweep() {
	let config: Config =
		serde_yaml::from_str("sweep:\n  start: 0.1\n  end: 0.9\n  steps: 5\n").unwrap();
	let settings = Settings::resolve(None, None, Some(&config));
	let grid = settings.evaluation.sweep_grid;
	assert_eq!(grid.len(), 5);
	assert_eq!(grid[0], 0.1);
	assert_eq!(grid[4], 0.9);
	for (threshold, expected) in grid.iter().zip([0.1, 0.3, 0.5, 0.7, 0.9].iter()) {
		assert!((threshold - expected).abs() < 1e-12);
	}
}

#[test]
fn test_unknown_field() {
	assert!(serde_yaml::from_str::<Config>("treshold: 0.3\n").is_err());
}
