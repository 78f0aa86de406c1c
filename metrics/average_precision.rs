use super::auc_roc::compute_cumulative_tps_fps;
use ndarray::prelude::*;

/**
This function computes the area under the precision recall curve as the average precision:

`sum over k of (recall_k - recall_k-1) * precision_k`

where `k` ranges over the distinct probabilities in descending order. This is a step function, so unlike [`auc_roc`](fn.auc_roc.html) no interpolation is done between points.

If there are no positive examples, recall is never incremented and the result is 0.
*/
pub fn average_precision(probabilities: ArrayView1<f64>, labels: ArrayView1<usize>) -> f32 {
	let curve = compute_precision_recall_curve(probabilities, labels);
	let mut previous_recall = 0.0;
	let mut total = 0.0;
	for point in curve.iter() {
		total += (point.recall - previous_recall) * point.precision;
		previous_recall = point.recall;
	}
	total
}

#[derive(Debug, PartialEq)]
pub struct PrecisionRecallCurvePoint {
	/// The classification threshold.
	pub threshold: f64,
	/// The precision for all predictions with probability >= threshold.
	pub precision: f32,
	/// The recall for all predictions with probability >= threshold, or 0 if there are no positive examples.
	pub recall: f32,
}

/// This function computes the precision recall curve, one point for each distinct probability in descending order of probability.
pub fn compute_precision_recall_curve(
	probabilities: ArrayView1<f64>,
	labels: ArrayView1<usize>,
) -> Vec<PrecisionRecallCurvePoint> {
	let count_positives = labels.iter().filter(|label| **label == 1).count();
	compute_cumulative_tps_fps(probabilities, labels)
		.iter()
		.map(|point| {
			let precision = point.true_positives as f32
				/ (point.true_positives + point.false_positives) as f32;
			let recall = if count_positives == 0 {
				0.0
			} else {
				point.true_positives as f32 / count_positives as f32
			};
			PrecisionRecallCurvePoint {
				threshold: point.threshold,
				precision,
				recall,
			}
		})
		.collect()
}

#[test]
fn test_precision_recall_curve() {
	let labels = arr1(&[1, 1, 0, 0]);
	let probabilities = arr1(&[0.9, 0.4, 0.4, 0.2]);
	let curve = compute_precision_recall_curve(probabilities.view(), labels.view());
	insta::assert_debug_snapshot!(curve, @r###"
 [
     PrecisionRecallCurvePoint {
         threshold: 0.9,
         precision: 1.0,
         recall: 0.5,
     },
     PrecisionRecallCurvePoint {
         threshold: 0.4,
         precision: 0.6666667,
         recall: 1.0,
     },
     PrecisionRecallCurvePoint {
         threshold: 0.2,
         precision: 0.5,
         recall: 1.0,
     },
 ]
 "###);
	let average_precision = average_precision(probabilities.view(), labels.view());
	assert!((average_precision - 5.0 / 6.0).abs() < 1e-6);
}

#[test]
fn test_average_precision_perfect_ranking() {
	let probabilities = arr1(&[0.9, 0.1, 0.8, 0.2]);
	let labels = arr1(&[1, 0, 1, 0]);
	assert_eq!(average_precision(probabilities.view(), labels.view()), 1.0);
}

#[test]
fn test_average_precision_no_positives() {
	let probabilities = arr1(&[0.9, 0.1, 0.8, 0.2]);
	let labels = arr1(&[0, 0, 0, 0]);
	assert_eq!(average_precision(probabilities.view(), labels.view()), 0.0);
}

#[test]
fn test_average_precision_all_tied() {
	let probabilities = arr1(&[0.5, 0.5, 0.5, 0.5]);
	let labels = arr1(&[1, 0, 1, 0]);
	assert_eq!(average_precision(probabilities.view(), labels.view()), 0.5);
}
