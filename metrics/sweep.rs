use super::{
	binary_classification::{f1_score, ratio_or_zero},
	ConfusionMatrix,
};
use ndarray::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;

/// One row of a threshold sweep.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SweepPoint {
	pub threshold: f64,
	pub precision: f32,
	pub recall: f32,
	pub f1_score: f32,
	pub true_positives: u64,
	pub false_positives: u64,
	pub false_negatives: u64,
}

/// `ThresholdSweep` computes precision, recall and the f1 score at every threshold of a grid, in the grid's order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ThresholdSweep {
	pub points: Vec<SweepPoint>,
}

impl ThresholdSweep {
	pub fn compute(
		probabilities: ArrayView1<f64>,
		labels: ArrayView1<usize>,
		grid: &[f64],
	) -> Self {
		let points = grid
			.iter()
			.map(|&threshold| {
				let confusion_matrix = ConfusionMatrix::compute(threshold, probabilities, labels);
				let true_positives = confusion_matrix.true_positives;
				let false_positives = confusion_matrix.false_positives;
				let false_negatives = confusion_matrix.false_negatives;
				let precision = ratio_or_zero(true_positives, true_positives + false_positives);
				let recall = ratio_or_zero(true_positives, true_positives + false_negatives);
				SweepPoint {
					threshold,
					precision,
					recall,
					f1_score: f1_score(true_positives, false_positives, false_negatives),
					true_positives,
					false_positives,
					false_negatives,
				}
			})
			.collect();
		Self { points }
	}

	/// The point with the highest f1 score. Ties go to the point that comes first in the grid. Returns `None` if the grid was empty.
	pub fn best(&self) -> Option<&SweepPoint> {
		let mut best: Option<&SweepPoint> = None;
		for point in self.points.iter() {
			match best {
				Some(current) if point.compare_f1_score(current) != Ordering::Greater => {}
				_ => best = Some(point),
			}
		}
		best
	}
}

impl SweepPoint {
	/// Compare f1 scores exactly as the fractions 2tp / (2tp + fp + fn), without rounding.
	pub fn compare_f1_score(&self, other: &SweepPoint) -> Ordering {
		let (numerator, denominator) = self.f1_score_fraction();
		let (other_numerator, other_denominator) = other.f1_score_fraction();
		(numerator * other_denominator).cmp(&(other_numerator * denominator))
	}

	fn f1_score_fraction(&self) -> (u128, u128) {
		let numerator = 2 * self.true_positives as u128;
		let denominator = numerator + self.false_positives as u128 + self.false_negatives as u128;
		// an f1 score with a zero denominator is 0
		(numerator, denominator.max(1))
	}
}

/// The default sweep grid: 19 evenly spaced thresholds from 0.05 to 0.95 inclusive.
pub fn default_sweep_grid() -> Vec<f64> {
	linspace_grid(0.05, 0.95, 19)
}

/// `steps` evenly spaced thresholds from `start` to `end` inclusive. Point `i` is `start + i * step`, so interior points may differ from their decimal values in the last bit, while the final point is exactly `end`.
pub fn linspace_grid(start: f64, end: f64, steps: usize) -> Vec<f64> {
	let mut grid = Array1::linspace(start, end, steps).to_vec();
	if steps > 1 {
		if let Some(last) = grid.last_mut() {
			*last = end;
		}
	}
	grid
}

#[test]
fn test_default_sweep_grid() {
	let grid = default_sweep_grid();
	assert_eq!(grid.len(), 19);
	assert_eq!(grid[0], 0.05);
	assert!((grid[9] - 0.5).abs() < 1e-12);
	assert_eq!(grid[18], 0.95);
	assert_eq!(linspace_grid(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
	assert!(grid.windows(2).all(|window| window[0] < window[1]));
}

#[test]
fn test_sweep_ties_go_to_the_earliest_threshold() {
	// At 0.1 every example is predicted positive, so precision is 0.5 and recall is 1. At 0.5 only the first example is, so precision is 1 and recall is 0.5. Both have an f1 score of 2/3.
	let probabilities = arr1(&[0.7, 0.2, 0.3, 0.4]);
	let labels = arr1(&[1, 1, 0, 0]);
	let sweep = ThresholdSweep::compute(probabilities.view(), labels.view(), &[0.1, 0.5, 0.9]);
	assert_eq!(sweep.points[0].f1_score, sweep.points[1].f1_score);
	assert_eq!(sweep.points[2].f1_score, 0.0);
	assert_eq!(sweep.best().map(|best| best.threshold), Some(0.1));
	let sweep = ThresholdSweep::compute(probabilities.view(), labels.view(), &[0.9, 0.5, 0.1]);
	assert_eq!(sweep.best().map(|best| best.threshold), Some(0.5));
}

#[test]
fn test_sweep_empty_grid() {
	let probabilities = arr1(&[0.7, 0.2]);
	let labels = arr1(&[1, 0]);
	let sweep = ThresholdSweep::compute(probabilities.view(), labels.view(), &[]);
	assert!(sweep.points.is_empty());
	assert!(sweep.best().is_none());
}

#[test]
fn test_sweep() {
	let probabilities = arr1(&[0.95, 0.6, 0.3, 0.05]);
	let labels = arr1(&[1, 0, 1, 0]);
	let sweep = ThresholdSweep::compute(probabilities.view(), labels.view(), &[0.25, 0.5, 0.75]);
	let thresholds: Vec<f64> = sweep.points.iter().map(|point| point.threshold).collect();
	assert_eq!(thresholds, vec![0.25, 0.5, 0.75]);
	let errors: Vec<(u64, u64)> = sweep
		.points
		.iter()
		.map(|point| (point.false_positives, point.false_negatives))
		.collect();
	assert_eq!(errors, vec![(1, 0), (1, 1), (0, 1)]);
	let expected: [(f32, f32, f32); 3] = [
		(2.0 / 3.0, 1.0, 0.8),
		(0.5, 0.5, 0.5),
		(1.0, 0.5, 2.0 / 3.0),
	];
	for (point, (precision, recall, f1_score)) in sweep.points.iter().zip(expected.iter()) {
		assert!((point.precision - precision).abs() < 1e-6);
		assert!((point.recall - recall).abs() < 1e-6);
		assert!((point.f1_score - f1_score).abs() < 1e-6);
	}
	assert_eq!(sweep.best().map(|best| best.threshold), Some(0.25));
}

#[test]
fn test_sweep_ties_are_exact() {
	// At 0.1 the f1 score is 4/20 and at 0.5 it is 2/10.
	let mut probabilities = vec![0.7, 0.3];
	let mut labels = vec![1, 1];
	probabilities.extend(std::iter::repeat(0.6).take(7));
	labels.extend(std::iter::repeat(0).take(7));
	probabilities.extend(std::iter::repeat(0.2).take(9));
	labels.extend(std::iter::repeat(0).take(9));
	let probabilities = Array1::from(probabilities);
	let labels = Array1::from(labels);
	let sweep = ThresholdSweep::compute(probabilities.view(), labels.view(), &[0.1, 0.5, 0.9]);
	assert_eq!(sweep.points[0].f1_score, 0.2);
	assert_eq!(sweep.points[1].f1_score, 0.2);
	assert_eq!(
		sweep.points[0].compare_f1_score(&sweep.points[1]),
		Ordering::Equal
	);
	assert_eq!(sweep.best().map(|best| best.threshold), Some(0.1));
}

#[test]
fn test_compare_f1_score() {
	let point = |true_positives, false_positives, false_negatives| SweepPoint {
		threshold: 0.5,
		precision: 0.0,
		recall: 0.0,
		f1_score: f1_score(true_positives, false_positives, false_negatives),
		true_positives,
		false_positives,
		false_negatives,
	};
	assert_eq!(point(2, 8, 0).compare_f1_score(&point(1, 3, 1)), Ordering::Equal);
	assert_eq!(point(2, 8, 0).f1_score, point(1, 3, 1).f1_score);
	assert_eq!(point(3, 1, 0).compare_f1_score(&point(1, 3, 1)), Ordering::Greater);
	assert_eq!(point(0, 0, 0).compare_f1_score(&point(0, 4, 2)), Ordering::Equal);
	assert_eq!(point(0, 4, 2).compare_f1_score(&point(1, 9, 9)), Ordering::Less);
}
