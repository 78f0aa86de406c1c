use super::StreamingMetric;
use itertools::izip;
use ndarray::prelude::*;
use serde::Serialize;

/// `ConfusionMatrix` tallies binary predictions against labels at a single classification threshold. An example is predicted positive when its probability is greater than or equal to the threshold, and it is a positive example when its label is 1.
#[derive(Clone, Debug)]
pub struct ConfusionMatrix {
	threshold: f64,
	counts: ConfusionMatrixOutput,
}

/// The four cells of a binary confusion matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrixOutput {
	pub true_negatives: u64,
	pub false_positives: u64,
	pub false_negatives: u64,
	pub true_positives: u64,
}

impl ConfusionMatrix {
	pub fn new(threshold: f64) -> Self {
		Self {
			threshold,
			counts: ConfusionMatrixOutput::default(),
		}
	}

	/// Tally every (probability, label) pair at `threshold`.
	pub fn compute(
		threshold: f64,
		probabilities: ArrayView1<f64>,
		labels: ArrayView1<usize>,
	) -> ConfusionMatrixOutput {
		let mut confusion_matrix = Self::new(threshold);
		for (probability, label) in izip!(probabilities.iter(), labels.iter()) {
			confusion_matrix.update((*probability, *label));
		}
		confusion_matrix.finalize()
	}
}

impl StreamingMetric<'_> for ConfusionMatrix {
	/// (probability, label)
	type Input = (f64, usize);
	type Output = ConfusionMatrixOutput;

	fn update(&mut self, (probability, label): Self::Input) {
		let predicted_positive = probability >= self.threshold;
		let positive = label == 1;
		match (predicted_positive, positive) {
			(false, false) => self.counts.true_negatives += 1,
			(true, false) => self.counts.false_positives += 1,
			(false, true) => self.counts.false_negatives += 1,
			(true, true) => self.counts.true_positives += 1,
		}
	}

	fn merge(&mut self, other: Self) {
		debug_assert_eq!(self.threshold.to_bits(), other.threshold.to_bits());
		self.counts.true_negatives += other.counts.true_negatives;
		self.counts.false_positives += other.counts.false_positives;
		self.counts.false_negatives += other.counts.false_negatives;
		self.counts.true_positives += other.counts.true_positives;
	}

	fn finalize(self) -> Self::Output {
		self.counts
	}
}

impl ConfusionMatrixOutput {
	pub fn n_examples(&self) -> u64 {
		self.true_negatives + self.false_positives + self.false_negatives + self.true_positives
	}

	/// The number of examples whose label is 1.
	pub fn n_positives(&self) -> u64 {
		self.true_positives + self.false_negatives
	}

	/// The number of examples whose label is 0.
	pub fn n_negatives(&self) -> u64 {
		self.true_negatives + self.false_positives
	}
}

#[test]
fn test_confusion_matrix() {
	let probabilities = arr1(&[0.9, 0.1, 0.8, 0.2, 0.5, 0.4]);
	let labels = arr1(&[1, 0, 1, 0, 0, 1]);
	let output = ConfusionMatrix::compute(0.5, probabilities.view(), labels.view());
	insta::assert_debug_snapshot!(output, @r###"
 ConfusionMatrixOutput {
     true_negatives: 2,
     false_positives: 1,
     false_negatives: 1,
     true_positives: 2,
 }
 "###);
	assert_eq!(output.n_examples(), 6);
	assert_eq!(output.n_positives(), 3);
	assert_eq!(output.n_negatives(), 3);
}

#[test]
fn test_confusion_matrix_merge() {
	let probabilities = arr1(&[0.9, 0.1, 0.8, 0.2, 0.5, 0.4]);
	let labels = arr1(&[1, 0, 1, 0, 0, 1]);
	let mut left = ConfusionMatrix::new(0.5);
	let mut right = ConfusionMatrix::new(0.5);
	for (index, (probability, label)) in izip!(probabilities.iter(), labels.iter()).enumerate() {
		if index % 2 == 0 {
			left.update((*probability, *label));
		} else {
			right.update((*probability, *label));
		}
	}
	left.merge(right);
	assert_eq!(
		left.finalize(),
		ConfusionMatrix::compute(0.5, probabilities.view(), labels.view())
	);
}

#[test]
fn test_threshold_is_inclusive() {
	let probabilities = arr1(&[0.5, 0.5, 0.5, 0.5]);
	let labels = arr1(&[1, 0, 1, 0]);
	let output = ConfusionMatrix::compute(0.5, probabilities.view(), labels.view());
	assert_eq!(
		output,
		ConfusionMatrixOutput {
			true_negatives: 0,
			false_positives: 2,
			false_negatives: 0,
			true_positives: 2,
		}
	);
}

#[test]
fn test_threshold_boundary() {
	let probabilities = arr1(&[0.34999999, 0.35, 0.35000001]);
	let labels = arr1(&[0, 0, 1]);
	let output = ConfusionMatrix::compute(0.35, probabilities.view(), labels.view());
	assert_eq!(output.true_negatives, 1);
	assert_eq!(output.false_positives, 1);
	assert_eq!(output.true_positives, 1);
}
