use super::ConfusionMatrixOutput;
use serde::Serialize;

/**
`ThresholdMetrics` are the scalar metrics derived from the confusion matrix at a single threshold.

Rates whose denominator is zero are not errors. Precision, recall and the f1 score are reported as 0 in that case, while specificity and negative predictive value are reported as NaN. Callers should check for these sentinels before use.

| metric | formula | zero denominator |
|--------|---------|------------------|
| accuracy | (tp + tn) / n | NaN |
| precision | tp / (tp + fp) | 0 |
| recall | tp / (tp + fn) | 0 |
| f1_score | 2tp / (2tp + fp + fn) | 0 |
| specificity | tn / (tn + fp) | NaN |
| negative_predictive_value | tn / (tn + fn) | NaN |
*/
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ThresholdMetrics {
	pub threshold: f64,
	pub accuracy: f32,
	pub precision: f32,
	pub recall: f32,
	pub f1_score: f32,
	/// The true negative rate.
	pub specificity: f32,
	pub negative_predictive_value: f32,
}

impl ThresholdMetrics {
	pub fn from_confusion_matrix(threshold: f64, confusion_matrix: &ConfusionMatrixOutput) -> Self {
		let ConfusionMatrixOutput {
			true_negatives,
			false_positives,
			false_negatives,
			true_positives,
		} = *confusion_matrix;
		let accuracy = ratio_or_nan(
			true_positives + true_negatives,
			confusion_matrix.n_examples(),
		);
		let precision = ratio_or_zero(true_positives, true_positives + false_positives);
		let recall = ratio_or_zero(true_positives, true_positives + false_negatives);
		let f1_score = f1_score(true_positives, false_positives, false_negatives);
		let specificity = ratio_or_nan(true_negatives, true_negatives + false_positives);
		let negative_predictive_value =
			ratio_or_nan(true_negatives, true_negatives + false_negatives);
		Self {
			threshold,
			accuracy,
			precision,
			recall,
			f1_score,
			specificity,
			negative_predictive_value,
		}
	}
}

/// The harmonic mean of precision and recall, computed from the counts so that equal ratios produce identical values. Returns 0 if there are no true positives.
pub(crate) fn f1_score(true_positives: u64, false_positives: u64, false_negatives: u64) -> f32 {
	let denominator = 2 * true_positives + false_positives + false_negatives;
	if denominator == 0 {
		return 0.0;
	}
	((2 * true_positives) as f64 / denominator as f64) as f32
}

pub(crate) fn ratio_or_zero(numerator: u64, denominator: u64) -> f32 {
	if denominator == 0 {
		0.0
	} else {
		numerator as f32 / denominator as f32
	}
}

fn ratio_or_nan(numerator: u64, denominator: u64) -> f32 {
	if denominator == 0 {
		f32::NAN
	} else {
		numerator as f32 / denominator as f32
	}
}

#[test]
fn test_perfect_predictions() {
	let confusion_matrix = ConfusionMatrixOutput {
		true_negatives: 2,
		false_positives: 0,
		false_negatives: 0,
		true_positives: 2,
	};
	let metrics = ThresholdMetrics::from_confusion_matrix(0.5, &confusion_matrix);
	insta::assert_debug_snapshot!(metrics, @r###"
 ThresholdMetrics {
     threshold: 0.5,
     accuracy: 1.0,
     precision: 1.0,
     recall: 1.0,
     f1_score: 1.0,
     specificity: 1.0,
     negative_predictive_value: 1.0,
 }
 "###);
}

#[test]
fn test_all_predicted_positive() {
	let confusion_matrix = ConfusionMatrixOutput {
		true_negatives: 0,
		false_positives: 2,
		false_negatives: 0,
		true_positives: 2,
	};
	let metrics = ThresholdMetrics::from_confusion_matrix(0.5, &confusion_matrix);
	assert_eq!(metrics.precision, 0.5);
	assert_eq!(metrics.recall, 1.0);
	assert_eq!(metrics.specificity, 0.0);
	assert!(metrics.negative_predictive_value.is_nan());
}

#[test]
fn test_no_predicted_positives() {
	let confusion_matrix = ConfusionMatrixOutput {
		true_negatives: 3,
		false_positives: 0,
		false_negatives: 1,
		true_positives: 0,
	};
	let metrics = ThresholdMetrics::from_confusion_matrix(0.9, &confusion_matrix);
	assert_eq!(metrics.precision, 0.0);
	assert_eq!(metrics.recall, 0.0);
	assert_eq!(metrics.f1_score, 0.0);
	assert_eq!(metrics.specificity, 1.0);
	assert_eq!(metrics.negative_predictive_value, 0.75);
	assert_eq!(metrics.accuracy, 0.75);
}

#[test]
fn test_f1_score_is_exact_for_equal_ratios() {
	// 2/10 and 4/20 are the same ratio, so they must produce the same value
	assert_eq!(f1_score(1, 8, 0), f1_score(2, 16, 0));
	assert_eq!(f1_score(2, 8, 0), f1_score(1, 3, 1));
	assert_eq!(f1_score(0, 0, 0), 0.0);
	assert_eq!(f1_score(0, 3, 2), 0.0);
}
