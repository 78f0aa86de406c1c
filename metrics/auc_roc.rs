use ndarray::prelude::*;

/**
This function computes the area under the receiver operating characteristic curve using the trapezoid method. Because examples with equal probabilities are grouped into a single point on the curve, this equals the probability that a randomly chosen positive example is scored higher than a randomly chosen negative example, with ties counting one half.

If the labels contain only one class, the curve is undefined and NaN is returned.
*/
pub fn auc_roc(probabilities: ArrayView1<f64>, labels: ArrayView1<usize>) -> f32 {
	let count_positives = labels.iter().filter(|label| **label == 1).count();
	let count_negatives = labels.len() - count_positives;
	if count_positives == 0 || count_negatives == 0 {
		return f32::NAN;
	}
	let roc_curve = compute_roc_curve(probabilities, labels);
	// compute the riemann sum of the roc curve
	roc_curve
		.windows(2)
		.map(|window| {
			let left = &window[0];
			let right = &window[1];
			let y_average = (left.true_positive_rate + right.true_positive_rate) / 2.0;
			let dx = right.false_positive_rate - left.false_positive_rate;
			y_average * dx
		})
		.sum()
}

#[derive(Debug, PartialEq)]
pub struct ROCCurvePoint {
	/// The classification threshold.
	pub threshold: f64,
	/// The true positive rate for all predictions with probability >= threshold.
	pub true_positive_rate: f32,
	/// The false positive rate for all predictions with probability >= threshold.
	pub false_positive_rate: f32,
}

/// This function computes the ROC curve. The ROC curve plots the false positive rate on the x axis and the true positive rate on the y axis for each distinct probability, in descending order of probability.
pub fn compute_roc_curve(
	probabilities: ArrayView1<f64>,
	labels: ArrayView1<usize>,
) -> Vec<ROCCurvePoint> {
	let tps_fps = compute_cumulative_tps_fps(probabilities, labels);
	let count_positives = labels.iter().filter(|label| **label == 1).count();
	let count_negatives = labels.len() - count_positives;
	// add a point at (0,0) on the roc curve with a dummy threshold above every probability
	let mut roc_curve = vec![ROCCurvePoint {
		threshold: f64::INFINITY,
		true_positive_rate: 0.0,
		false_positive_rate: 0.0,
	}];
	roc_curve.extend(tps_fps.iter().map(|point| ROCCurvePoint {
		threshold: point.threshold,
		true_positive_rate: point.true_positives as f32 / count_positives as f32,
		false_positive_rate: point.false_positives as f32 / count_negatives as f32,
	}));
	roc_curve
}

#[derive(Debug)]
pub(crate) struct TpsFpsPoint {
	/// The classification threshold.
	pub threshold: f64,
	/// The true positives for all predictions with probability >= threshold.
	pub true_positives: usize,
	/// The false positives for all predictions with probability >= threshold.
	pub false_positives: usize,
}

/**
This function computes the counts of true positives and false positives at each distinct probability, in descending order of probability. Each point contains the counts for all predictions with probability greater than or equal to the point's threshold.
*/
pub(crate) fn compute_cumulative_tps_fps(
	probabilities: ArrayView1<f64>,
	labels: ArrayView1<usize>,
) -> Vec<TpsFpsPoint> {
	let mut probabilities_labels: Vec<(f64, usize)> = probabilities
		.iter()
		.zip(labels.iter())
		.map(|(probability, label)| (*probability, *label))
		.collect();
	probabilities_labels.sort_by(|a, b| b.0.total_cmp(&a.0));
	let mut tps_fps: Vec<TpsFpsPoint> = Vec::new();
	let mut true_positives = 0;
	let mut false_positives = 0;
	for (probability, label) in probabilities_labels {
		if label == 1 {
			true_positives += 1;
		} else {
			false_positives += 1;
		}
		// if the probability is the same as the last one, add to the previous bucket
		match tps_fps.last_mut() {
			Some(last) if last.threshold == probability => {
				last.true_positives = true_positives;
				last.false_positives = false_positives;
			}
			_ => tps_fps.push(TpsFpsPoint {
				threshold: probability,
				true_positives,
				false_positives,
			}),
		}
	}
	tps_fps
}

#[test]
fn test_roc_curve() {
	let labels = arr1(&[1, 1, 0, 0]);
	let probabilities = arr1(&[0.9, 0.4, 0.4, 0.2]);
	let left = compute_roc_curve(probabilities.view(), labels.view());
	let right = vec![
		ROCCurvePoint {
			threshold: f64::INFINITY,
			true_positive_rate: 0.0,
			false_positive_rate: 0.0,
		},
		ROCCurvePoint {
			threshold: 0.9,
			true_positive_rate: 0.5,
			false_positive_rate: 0.0,
		},
		ROCCurvePoint {
			threshold: 0.4,
			true_positive_rate: 1.0,
			false_positive_rate: 0.5,
		},
		ROCCurvePoint {
			threshold: 0.2,
			true_positive_rate: 1.0,
			false_positive_rate: 1.0,
		},
	];
	assert_eq!(left, right);
	let auc = auc_roc(probabilities.view(), labels.view());
	assert!(f32::abs(auc - 0.875) < f32::EPSILON)
}

#[test]
fn test_auc_roc_single_class() {
	let probabilities = arr1(&[0.9, 0.4, 0.2]);
	assert!(auc_roc(probabilities.view(), arr1(&[0, 0, 0]).view()).is_nan());
	assert!(auc_roc(probabilities.view(), arr1(&[1, 1, 1]).view()).is_nan());
}

#[test]
fn test_auc_roc_all_tied() {
	let probabilities = arr1(&[0.5, 0.5, 0.5, 0.5]);
	let labels = arr1(&[1, 0, 1, 0]);
	assert_eq!(auc_roc(probabilities.view(), labels.view()), 0.5);
}

#[test]
fn test_auc_roc_inverted() {
	let probabilities = arr1(&[0.1, 0.9, 0.2, 0.8]);
	let labels = arr1(&[1, 0, 1, 0]);
	assert_eq!(auc_roc(probabilities.view(), labels.view()), 0.0);
}

#[test]
fn test_auc_roc_uncorrelated_noise() {
	use rand::{Rng, SeedableRng};
	let mut rng = rand::rngs::StdRng::seed_from_u64(42);
	let n_trials = 20;
	let n_examples = 2000;
	let mut total = 0.0;
	for _ in 0..n_trials {
		let probabilities: Array1<f64> = (0..n_examples).map(|_| rng.gen::<f64>()).collect();
		let labels: Array1<usize> = (0..n_examples)
			.map(|_| if rng.gen::<bool>() { 1 } else { 0 })
			.collect();
		let auc = auc_roc(probabilities.view(), labels.view());
		assert!((auc - 0.5).abs() < 0.1);
		total += auc;
	}
	let mean = total / n_trials as f32;
	assert!((mean - 0.5).abs() < 0.02);
}
