use crate::{sweep::SweepTable, table::Table};
use derive_more::Constructor;
use ndarray::prelude::*;
use neuroscan_metrics::Report;

/// `Console` is the summary printed to the terminal after an evaluation: the sweep, the best f1 score, and the metrics at the locked threshold.
#[derive(Constructor)]
pub struct Console<'a> {
	report: &'a Report,
}

impl<'a> std::fmt::Display for Console<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let report = self.report;
		let best_f1 = &report.best_f1;
		write!(f, "{}", SweepTable::new(&report.sweep))?;
		writeln!(f)?;
		writeln!(
			f,
			"Best F1: {:.3} at threshold {:.2} (precision {:.3}, recall {:.3})",
			best_f1.f1_score, best_f1.threshold, best_f1.precision, best_f1.recall
		)?;
		writeln!(f)?;
		writeln!(
			f,
			"Final metrics at locked threshold {:.2}",
			report.locked_threshold
		)?;
		let metrics = &report.metrics;
		let values = [
			("Accuracy", metrics.accuracy),
			("Precision", metrics.precision),
			("Recall", metrics.recall),
			("F1", metrics.f1_score),
			("Specificity", metrics.specificity),
			("NPV", metrics.negative_predictive_value),
			("ROC-AUC", metrics.auc_roc),
			("PR-AUC", metrics.pr_auc),
		];
		for (name, value) in values.iter() {
			writeln!(f, "{:<12}{:.4}", name, value)?;
		}
		writeln!(f)?;
		writeln!(f, "Confusion matrix (rows = true label, columns = predicted label)")?;
		let confusion_matrix = &report.confusion_matrix;
		let values = arr2(&[
			[
				"True 0".to_owned(),
				confusion_matrix.true_negatives.to_string(),
				confusion_matrix.false_positives.to_string(),
			],
			[
				"True 1".to_owned(),
				confusion_matrix.false_negatives.to_string(),
				confusion_matrix.true_positives.to_string(),
			],
		]);
		write!(f, "{}", Table::new(&["", "Pred 0", "Pred 1"], &values))?;
		Ok(())
	}
}

#[test]
fn test_console() {
	use neuroscan_metrics::{evaluate, EvaluationInput, EvaluationOptions};
	let probabilities = ndarray::arr1(&[0.5, 0.5, 0.5, 0.5]);
	let labels = ndarray::arr1(&[1, 0, 1, 0]);
	let options = EvaluationOptions {
		locked_threshold: 0.5,
		sweep_grid: vec![0.5, 0.75],
	};
	let report = evaluate(
		EvaluationInput {
			probabilities: probabilities.view(),
			labels: labels.view(),
		},
		&options,
	)
	.unwrap();
	insta::assert_snapshot!(Console::new(&report).to_string(), @r###"
 | Threshold | Precision | Recall | F1    | FP | FN |
 |-----------|-----------|--------|-------|----|----|
 | 0.50      | 0.500     | 1.000  | 0.667 | 2  | 0  |
 | 0.75      | 0.000     | 0.000  | 0.000 | 0  | 2  |

 Best F1: 0.667 at threshold 0.50 (precision 0.500, recall 1.000)

 Final metrics at locked threshold 0.50
 Accuracy    0.5000
 Precision   0.5000
 Recall      1.0000
 F1          0.6667
 Specificity 0.0000
 NPV         NaN
 ROC-AUC     0.5000
 PR-AUC      0.5000

 Confusion matrix (rows = true label, columns = predicted label)
 |        | Pred 0 | Pred 1 |
 |--------|--------|--------|
 | True 0 | 0      | 2      |
 | True 1 | 0      | 2      |
 "###);
}
