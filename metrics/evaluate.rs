use super::{
	auc_roc, average_precision, default_sweep_grid, ConfusionMatrix, ConfusionMatrixOutput,
	EvaluationError, SweepPoint, ThresholdMetrics, ThresholdSweep,
};
use ndarray::prelude::*;
use serde::Serialize;

/// The locked threshold used when none is configured.
pub const DEFAULT_LOCKED_THRESHOLD: f64 = 0.05;

/// The input to [`evaluate`](fn.evaluate.html).
pub struct EvaluationInput<'a, 'b> {
	/// (n_examples) The predicted probability of the positive class, each in [0, 1].
	pub probabilities: ArrayView1<'a, f64>,
	/// (n_examples) Each label is 0 or 1.
	pub labels: ArrayView1<'b, usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationOptions {
	/// The threshold used for the final reported metrics.
	pub locked_threshold: f64,
	/// The thresholds searched for the best f1 score, in the order ties are broken.
	pub sweep_grid: Vec<f64>,
}

impl Default for EvaluationOptions {
	fn default() -> Self {
		Self {
			locked_threshold: DEFAULT_LOCKED_THRESHOLD,
			sweep_grid: default_sweep_grid(),
		}
	}
}

#[derive(Clone, Debug, Serialize)]
pub struct Report {
	pub locked_threshold: f64,
	pub counts: Counts,
	pub confusion_matrix: ConfusionMatrixOutput,
	pub metrics: ReportMetrics,
	pub best_f1: SweepPoint,
	pub sweep: Vec<SweepPoint>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Counts {
	pub total: u64,
	/// The number of examples labeled 1.
	pub positives: u64,
	/// The number of examples labeled 0.
	pub negatives: u64,
}

/// The metrics at the locked threshold, plus the threshold independent `auc_roc` and `pr_auc`. See [`ThresholdMetrics`](struct.ThresholdMetrics.html) for the sentinel values.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ReportMetrics {
	pub accuracy: f32,
	pub precision: f32,
	pub recall: f32,
	pub f1_score: f32,
	pub specificity: f32,
	pub negative_predictive_value: f32,
	/// NaN if the labels contain only one class.
	pub auc_roc: f32,
	/// The average precision.
	pub pr_auc: f32,
}

/**
Evaluate a binary classifier's probabilities against the true labels.

This computes the confusion matrix and derived metrics at `options.locked_threshold`, the area under the ROC and precision recall curves over all the probabilities, and a sweep over `options.sweep_grid` for the threshold with the best f1 score.

Returns `EvaluationError::InvalidInput` if the input is empty, the lengths differ, a probability is not a finite value in [0, 1], a label is not 0 or 1, or a threshold is not a finite value in [0, 1]. There are no other failure modes.
*/
pub fn evaluate(
	input: EvaluationInput,
	options: &EvaluationOptions,
) -> Result<Report, EvaluationError> {
	validate(&input, options)?;
	let EvaluationInput {
		probabilities,
		labels,
	} = input;
	log::debug!(
		"evaluating {} examples at locked threshold {}",
		labels.len(),
		options.locked_threshold
	);
	let confusion_matrix =
		ConfusionMatrix::compute(options.locked_threshold, probabilities, labels);
	let threshold_metrics =
		ThresholdMetrics::from_confusion_matrix(options.locked_threshold, &confusion_matrix);
	let metrics = ReportMetrics {
		accuracy: threshold_metrics.accuracy,
		precision: threshold_metrics.precision,
		recall: threshold_metrics.recall,
		f1_score: threshold_metrics.f1_score,
		specificity: threshold_metrics.specificity,
		negative_predictive_value: threshold_metrics.negative_predictive_value,
		auc_roc: auc_roc(probabilities, labels),
		pr_auc: average_precision(probabilities, labels),
	};
	let sweep = ThresholdSweep::compute(probabilities, labels, &options.sweep_grid);
	let best_f1 = *sweep
		.best()
		.ok_or_else(|| EvaluationError::InvalidInput("the sweep grid is empty".to_owned()))?;
	log::debug!(
		"best f1 {} at threshold {}",
		best_f1.f1_score,
		best_f1.threshold
	);
	let counts = Counts {
		total: confusion_matrix.n_examples(),
		positives: confusion_matrix.n_positives(),
		negatives: confusion_matrix.n_negatives(),
	};
	Ok(Report {
		locked_threshold: options.locked_threshold,
		counts,
		confusion_matrix,
		metrics,
		best_f1,
		sweep: sweep.points,
	})
}

fn validate(input: &EvaluationInput, options: &EvaluationOptions) -> Result<(), EvaluationError> {
	let invalid = |message: String| Err(EvaluationError::InvalidInput(message));
	if input.probabilities.is_empty() {
		return invalid("there are no probabilities".to_owned());
	}
	if input.probabilities.len() != input.labels.len() {
		return invalid(format!(
			"there are {} probabilities but {} labels",
			input.probabilities.len(),
			input.labels.len()
		));
	}
	if let Some((index, probability)) = input
		.probabilities
		.iter()
		.enumerate()
		.find(|(_, probability)| !is_unit_interval(**probability))
	{
		return invalid(format!(
			"probability {} at index {} is not in [0, 1]",
			probability, index
		));
	}
	if let Some((index, label)) = input
		.labels
		.iter()
		.enumerate()
		.find(|(_, label)| **label > 1)
	{
		return invalid(format!("label {} at index {} is not 0 or 1", label, index));
	}
	if !is_unit_interval(options.locked_threshold) {
		return invalid(format!(
			"the locked threshold {} is not in [0, 1]",
			options.locked_threshold
		));
	}
	if options.sweep_grid.is_empty() {
		return invalid("the sweep grid is empty".to_owned());
	}
	if let Some(threshold) = options
		.sweep_grid
		.iter()
		.find(|threshold| !is_unit_interval(**threshold))
	{
		return invalid(format!(
			"the sweep threshold {} is not in [0, 1]",
			threshold
		));
	}
	Ok(())
}

fn is_unit_interval(value: f64) -> bool {
	value.is_finite() && (0.0..=1.0).contains(&value)
}

#[cfg(test)]
fn evaluate_slices(
	probabilities: &[f64],
	labels: &[usize],
	options: &EvaluationOptions,
) -> Result<Report, EvaluationError> {
	evaluate(
		EvaluationInput {
			probabilities: ArrayView1::from(probabilities),
			labels: ArrayView1::from(labels),
		},
		options,
	)
}

#[cfg(test)]
fn options(locked_threshold: f64) -> EvaluationOptions {
	EvaluationOptions {
		locked_threshold,
		..Default::default()
	}
}

#[test]
fn test_perfect_separation() {
	let report = evaluate_slices(&[0.9, 0.1, 0.8, 0.2], &[1, 0, 1, 0], &options(0.5)).unwrap();
	assert_eq!(
		report.confusion_matrix,
		ConfusionMatrixOutput {
			true_negatives: 2,
			false_positives: 0,
			false_negatives: 0,
			true_positives: 2,
		}
	);
	assert_eq!(report.metrics.accuracy, 1.0);
	assert_eq!(report.metrics.precision, 1.0);
	assert_eq!(report.metrics.recall, 1.0);
	assert_eq!(report.metrics.f1_score, 1.0);
	assert_eq!(report.metrics.auc_roc, 1.0);
	assert_eq!(report.metrics.pr_auc, 1.0);
	assert_eq!(
		report.counts,
		Counts {
			total: 4,
			positives: 2,
			negatives: 2,
		}
	);
}

#[test]
fn test_all_tied_at_the_threshold() {
	let report = evaluate_slices(&[0.5, 0.5, 0.5, 0.5], &[1, 0, 1, 0], &options(0.5)).unwrap();
	assert_eq!(
		report.confusion_matrix,
		ConfusionMatrixOutput {
			true_negatives: 0,
			false_positives: 2,
			false_negatives: 0,
			true_positives: 2,
		}
	);
	assert_eq!(report.metrics.precision, 0.5);
	assert_eq!(report.metrics.recall, 1.0);
	assert_eq!(report.metrics.specificity, 0.0);
	assert!(report.metrics.negative_predictive_value.is_nan());
	assert_eq!(report.metrics.auc_roc, 0.5);
}

#[test]
fn test_single_class() {
	let report = evaluate_slices(&[0.1, 0.2, 0.3], &[0, 0, 0], &options(0.5)).unwrap();
	assert!(report.metrics.auc_roc.is_nan());
	assert_eq!(report.metrics.precision, 0.0);
	assert_eq!(report.metrics.recall, 0.0);
	assert_eq!(report.metrics.f1_score, 0.0);
	assert_eq!(report.metrics.specificity, 1.0);
	assert_eq!(report.metrics.pr_auc, 0.0);
}

#[test]
fn test_invalid_input() {
	let is_invalid = |result: Result<Report, EvaluationError>| {
		matches!(result, Err(EvaluationError::InvalidInput(_)))
	};
	assert!(is_invalid(evaluate_slices(&[], &[], &options(0.5))));
	assert!(is_invalid(evaluate_slices(&[0.5, 0.5], &[1], &options(0.5))));
	assert!(is_invalid(evaluate_slices(&[1.5], &[1], &options(0.5))));
	assert!(is_invalid(evaluate_slices(&[-0.1], &[1], &options(0.5))));
	assert!(is_invalid(evaluate_slices(&[f64::NAN], &[1], &options(0.5))));
	assert!(is_invalid(evaluate_slices(
		&[f64::INFINITY],
		&[1],
		&options(0.5)
	)));
	assert!(is_invalid(evaluate_slices(&[0.5], &[2], &options(0.5))));
	assert!(is_invalid(evaluate_slices(&[0.5], &[1], &options(1.5))));
	let empty_grid = EvaluationOptions {
		locked_threshold: 0.5,
		sweep_grid: Vec::new(),
	};
	assert!(is_invalid(evaluate_slices(&[0.5], &[1], &empty_grid)));
	let bad_grid = EvaluationOptions {
		locked_threshold: 0.5,
		sweep_grid: vec![0.5, f64::NAN],
	};
	assert!(is_invalid(evaluate_slices(&[0.5], &[1], &bad_grid)));
}

#[test]
fn test_invalid_input_message() {
	let error = evaluate_slices(&[0.5, 0.5], &[1], &options(0.5)).unwrap_err();
	assert_eq!(
		error.to_string(),
		"invalid input: there are 2 probabilities but 1 labels"
	);
}

#[test]
fn test_best_f1_tie_goes_to_the_earliest_threshold() {
	let options = EvaluationOptions {
		locked_threshold: 0.5,
		sweep_grid: vec![0.1, 0.5, 0.9],
	};
	let report = evaluate_slices(&[0.7, 0.2, 0.3, 0.4], &[1, 1, 0, 0], &options).unwrap();
	assert_eq!(report.sweep.len(), 3);
	assert_eq!(report.sweep[0].f1_score, report.sweep[1].f1_score);
	assert_eq!(report.best_f1.threshold, 0.1);
}

#[test]
fn test_best_f1_tie_between_equal_ratios() {
	// the f1 score is 4/20 at 0.1 and 2/10 at 0.5
	let mut probabilities = vec![0.7, 0.3];
	probabilities.extend(std::iter::repeat(0.6).take(7));
	probabilities.extend(std::iter::repeat(0.2).take(9));
	let mut labels = vec![1, 1];
	labels.extend(std::iter::repeat(0).take(16));
	let options = EvaluationOptions {
		locked_threshold: 0.5,
		sweep_grid: vec![0.1, 0.5, 0.9],
	};
	let report = evaluate_slices(&probabilities, &labels, &options).unwrap();
	assert_eq!(report.sweep[0].f1_score, report.sweep[1].f1_score);
	assert_eq!(report.best_f1.threshold, 0.1);
	assert_eq!(report.best_f1.true_positives, 2);
	assert_eq!(report.best_f1.false_positives, 16);
}

#[test]
fn test_probability_just_below_the_threshold() {
	let options = EvaluationOptions {
		locked_threshold: 0.35,
		sweep_grid: vec![0.35],
	};
	let report = evaluate_slices(&[0.34999999, 0.9], &[0, 1], &options).unwrap();
	assert_eq!(report.confusion_matrix.false_positives, 0);
	assert_eq!(report.confusion_matrix.true_negatives, 1);
	assert_eq!(report.sweep[0].false_positives, 0);
	assert_eq!(report.best_f1.f1_score, 1.0);
}

#[test]
fn test_default_grid_boundaries() {
	// each probability sits just below one grid point, so it is only counted at the lower thresholds
	let grid = default_sweep_grid();
	let probabilities: Vec<f64> = grid.iter().map(|threshold| threshold - 1e-9).collect();
	let labels = vec![0; probabilities.len()];
	let report = evaluate_slices(&probabilities, &labels, &options(0.35)).unwrap();
	for (index, point) in report.sweep.iter().enumerate() {
		assert_eq!(point.false_positives as usize, grid.len() - 1 - index);
	}
}

#[cfg(test)]
fn random_examples(seed: u64, n_examples: usize) -> (Vec<f64>, Vec<usize>) {
	use rand::{Rng, SeedableRng};
	let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
	let labels: Vec<usize> = (0..n_examples)
		.map(|_| if rng.gen::<bool>() { 1 } else { 0 })
		.collect();
	// shift positives upward so the scores carry some signal
	let probabilities = labels
		.iter()
		.map(|label| (rng.gen::<f64>() * 0.8 + *label as f64 * 0.2).min(1.0))
		.collect();
	(probabilities, labels)
}

#[test]
fn test_invariants() {
	for seed in 0..10 {
		let (probabilities, labels) = random_examples(seed, 200);
		let report = evaluate_slices(&probabilities, &labels, &options(0.5)).unwrap();
		let confusion_matrix = report.confusion_matrix;
		assert_eq!(confusion_matrix.n_examples(), 200);
		assert_eq!(report.counts.total, 200);
		let metrics = report.metrics;
		for value in [
			metrics.accuracy,
			metrics.precision,
			metrics.recall,
			metrics.f1_score,
			metrics.specificity,
			metrics.negative_predictive_value,
			metrics.auc_roc,
			metrics.pr_auc,
		]
		.iter()
		.filter(|value| !value.is_nan())
		{
			assert!((0.0..=1.0).contains(value));
		}
		// raising the threshold can only move examples from predicted positive to predicted negative
		for window in report.sweep.windows(2) {
			assert!(window[1].recall <= window[0].recall);
			assert!(window[1].false_positives <= window[0].false_positives);
			assert!(window[1].false_negatives >= window[0].false_negatives);
		}
	}
}

#[test]
fn test_precision_is_monotonic_when_classes_are_separable() {
	let probabilities = [0.05, 0.15, 0.25, 0.35, 0.45, 0.55, 0.65, 0.75, 0.85, 0.95];
	let labels = [0, 0, 0, 0, 0, 1, 1, 1, 1, 1];
	let report = evaluate_slices(&probabilities, &labels, &options(0.5)).unwrap();
	for window in report.sweep.windows(2) {
		assert!(window[1].precision >= window[0].precision);
		assert!(window[1].recall <= window[0].recall);
	}
}

#[test]
fn test_deterministic() {
	let (probabilities, labels) = random_examples(7, 500);
	let left = evaluate_slices(&probabilities, &labels, &options(0.3)).unwrap();
	let right = evaluate_slices(&probabilities, &labels, &options(0.3)).unwrap();
	assert_eq!(format!("{:?}", left), format!("{:?}", right));
	assert_eq!(
		left.metrics.auc_roc.to_bits(),
		right.metrics.auc_roc.to_bits()
	);
	assert_eq!(left.metrics.pr_auc.to_bits(), right.metrics.pr_auc.to_bits());
}
