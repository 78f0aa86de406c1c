use crate::{format_timestamp, sweep::SweepTable};
use chrono::NaiveDateTime;
use derive_more::Constructor;
use neuroscan_metrics::Report;

/// `Markdown` renders a [`Report`](../neuroscan_metrics/struct.Report.html) as the human readable `results.md`.
#[derive(Constructor)]
pub struct Markdown<'a> {
	report: &'a Report,
	timestamp: &'a NaiveDateTime,
}

impl<'a> std::fmt::Display for Markdown<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let report = self.report;
		writeln!(f, "# Final Test Evaluation")?;
		writeln!(f)?;
		writeln!(f, "- **Date**: {}", format_timestamp(self.timestamp))?;
		writeln!(f, "- **Locked Threshold**: `{}`", report.locked_threshold)?;
		writeln!(f)?;
		write!(f, "{}", Summary { report })?;
		writeln!(f)?;
		write!(f, "{}", Metrics { report })?;
		writeln!(f)?;
		write!(f, "{}", ConfusionMatrix { report })?;
		writeln!(f)?;
		write!(f, "{}", Sweep { report })?;
		Ok(())
	}
}

struct Summary<'a> {
	report: &'a Report,
}

impl<'a> std::fmt::Display for Summary<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let counts = &self.report.counts;
		writeln!(f, "## Summary")?;
		writeln!(f)?;
		writeln!(f, "- Test images: **{}**", counts.total)?;
		writeln!(f, "- Tumor (1): **{}**", counts.positives)?;
		writeln!(f, "- No tumor (0): **{}**", counts.negatives)?;
		Ok(())
	}
}

struct Metrics<'a> {
	report: &'a Report,
}

impl<'a> std::fmt::Display for Metrics<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let metrics = &self.report.metrics;
		writeln!(f, "## Metrics (at locked threshold)")?;
		writeln!(f)?;
		let values = [
			("Accuracy", metrics.accuracy),
			("Precision (tumor=1)", metrics.precision),
			("Recall (tumor=1)", metrics.recall),
			("F1", metrics.f1_score),
			("Specificity (no_tumor)", metrics.specificity),
			("NPV (no_tumor)", metrics.negative_predictive_value),
			("ROC-AUC (probs)", metrics.auc_roc),
			("PR-AUC (probs)", metrics.pr_auc),
		];
		for (name, value) in values.iter() {
			writeln!(f, "- {}: **{:.4}**", name, value)?;
		}
		Ok(())
	}
}

struct ConfusionMatrix<'a> {
	report: &'a Report,
}

impl<'a> std::fmt::Display for ConfusionMatrix<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let confusion_matrix = &self.report.confusion_matrix;
		writeln!(f, "## Confusion Matrix")?;
		writeln!(f)?;
		writeln!(f, "|            | Pred 0 | Pred 1 |")?;
		writeln!(f, "|------------|-------:|-------:|")?;
		writeln!(
			f,
			"| **True 0** | {:6} | {:6} |",
			confusion_matrix.true_negatives, confusion_matrix.false_positives
		)?;
		writeln!(
			f,
			"| **True 1** | {:6} | {:6} |",
			confusion_matrix.false_negatives, confusion_matrix.true_positives
		)?;
		writeln!(f)?;
		writeln!(
			f,
			"_Format: rows = true labels [no_tumor(0), tumor(1)] ; columns = predicted labels [0,1]._"
		)?;
		Ok(())
	}
}

struct Sweep<'a> {
	report: &'a Report,
}

impl<'a> std::fmt::Display for Sweep<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let best_f1 = &self.report.best_f1;
		writeln!(f, "## Threshold Sweep (reference)")?;
		writeln!(f)?;
		writeln!(
			f,
			"- Best F1 on test: **{:.3}** at threshold **{:.2}** (precision **{:.3}**, recall **{:.3}**)",
			best_f1.f1_score, best_f1.threshold, best_f1.precision, best_f1.recall
		)?;
		writeln!(f)?;
		write!(f, "{}", SweepTable::new(&self.report.sweep))?;
		Ok(())
	}
}

#[test]
fn test_markdown() {
	use neuroscan_metrics::{evaluate, EvaluationInput, EvaluationOptions};
	let probabilities = ndarray::arr1(&[0.9, 0.1, 0.8, 0.2]);
	let labels = ndarray::arr1(&[1, 0, 1, 0]);
	let options = EvaluationOptions {
		locked_threshold: 0.5,
		sweep_grid: vec![0.25, 0.5, 0.75],
	};
	let report = evaluate(
		EvaluationInput {
			probabilities: probabilities.view(),
			labels: labels.view(),
		},
		&options,
	)
	.unwrap();
	let timestamp = chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
		.and_then(|date| date.and_hms_opt(9, 30, 0))
		.unwrap();
	insta::assert_snapshot!(Markdown::new(&report, &timestamp).to_string(), @r###"
 # Final Test Evaluation

 - **Date**: 2024-03-01T09:30:00
 - **Locked Threshold**: `0.5`

 ## Summary

 - Test images: **4**
 - Tumor (1): **2**
 - No tumor (0): **2**

 ## Metrics (at locked threshold)

 - Accuracy: **1.0000**
 - Precision (tumor=1): **1.0000**
 - Recall (tumor=1): **1.0000**
 - F1: **1.0000**
 - Specificity (no_tumor): **1.0000**
 - NPV (no_tumor): **1.0000**
 - ROC-AUC (probs): **1.0000**
 - PR-AUC (probs): **1.0000**

 ## Confusion Matrix

 |            | Pred 0 | Pred 1 |
 |------------|-------:|-------:|
 | **True 0** |      2 |      0 |
 | **True 1** |      0 |      2 |

 _Format: rows = true labels [no_tumor(0), tumor(1)] ; columns = predicted labels [0,1]._

 ## Threshold Sweep (reference)

 - Best F1 on test: **1.000** at threshold **0.25** (precision **1.000**, recall **1.000**)

 | Threshold | Precision | Recall | F1    | FP | FN |
 |-----------|-----------|--------|-------|----|----|
 | 0.25      | 1.000     | 1.000  | 1.000 | 0  | 0  |
 | 0.50      | 1.000     | 1.000  | 1.000 | 0  | 0  |
 | 0.75      | 1.000     | 1.000  | 1.000 | 0  | 0  |
 "###);
}
