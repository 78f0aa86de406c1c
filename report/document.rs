use crate::format_timestamp;
use chrono::NaiveDateTime;
use neuroscan_metrics::Report;
use serde::Serialize;

/// The layout of the confusion matrix, recorded in the document for readers.
const CONFUSION_MATRIX_FORMAT: &str = "rows=true [no_tumor(0), tumor(1)], cols=pred [0,1]";

/// `ReportDocument` is the machine readable form of a [`Report`](../neuroscan_metrics/struct.Report.html), written to `metrics.json`. Undefined metrics serialize as `null`.
#[derive(Debug, Serialize)]
pub struct ReportDocument {
	pub timestamp: String,
	pub threshold_locked: f64,
	pub counts: DocumentCounts,
	pub metrics: DocumentMetrics,
	pub confusion_matrix: DocumentConfusionMatrix,
	pub best_f1_sweep: DocumentBestF1Sweep,
}

#[derive(Debug, Serialize)]
pub struct DocumentCounts {
	pub total: u64,
	pub positives: u64,
	pub negatives: u64,
}

#[derive(Debug, Serialize)]
pub struct DocumentMetrics {
	pub accuracy: f32,
	pub precision: f32,
	pub recall: f32,
	pub f1: f32,
	pub specificity: f32,
	pub npv: f32,
	pub roc_auc: f32,
	pub pr_auc: f32,
}

#[derive(Debug, Serialize)]
pub struct DocumentConfusionMatrix {
	pub tn: u64,
	pub fp: u64,
	#[serde(rename = "fn")]
	pub fn_: u64,
	pub tp: u64,
	pub format: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DocumentBestF1Sweep {
	pub f1: f32,
	pub threshold: f64,
	pub precision: f32,
	pub recall: f32,
}

impl ReportDocument {
	pub fn new(report: &Report, timestamp: &NaiveDateTime) -> Self {
		let metrics = &report.metrics;
		let confusion_matrix = &report.confusion_matrix;
		let best_f1 = &report.best_f1;
		Self {
			timestamp: format_timestamp(timestamp),
			threshold_locked: report.locked_threshold,
			counts: DocumentCounts {
				total: report.counts.total,
				positives: report.counts.positives,
				negatives: report.counts.negatives,
			},
			metrics: DocumentMetrics {
				accuracy: metrics.accuracy,
				precision: metrics.precision,
				recall: metrics.recall,
				f1: metrics.f1_score,
				specificity: metrics.specificity,
				npv: metrics.negative_predictive_value,
				roc_auc: metrics.auc_roc,
				pr_auc: metrics.pr_auc,
			},
			confusion_matrix: DocumentConfusionMatrix {
				tn: confusion_matrix.true_negatives,
				fp: confusion_matrix.false_positives,
				fn_: confusion_matrix.false_negatives,
				tp: confusion_matrix.true_positives,
				format: CONFUSION_MATRIX_FORMAT,
			},
			best_f1_sweep: DocumentBestF1Sweep {
				f1: best_f1.f1_score,
				threshold: best_f1.threshold,
				precision: best_f1.precision,
				recall: best_f1.recall,
			},
		}
	}

	/// Serialize the document as pretty printed json.
	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string_pretty(self)
	}
}

#[cfg(test)]
fn timestamp() -> NaiveDateTime {
	chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
		.and_then(|date| date.and_hms_opt(9, 30, 0))
		.unwrap()
}

#[test]
fn test_document_fields() {
	use neuroscan_metrics::{evaluate, EvaluationInput, EvaluationOptions};
	let probabilities = ndarray::arr1(&[0.5, 0.5, 0.5, 0.5]);
	let labels = ndarray::arr1(&[1, 0, 1, 0]);
	let options = EvaluationOptions {
		locked_threshold: 0.5,
		sweep_grid: vec![0.1, 0.5, 0.9],
	};
	let report = evaluate(
		EvaluationInput {
			probabilities: probabilities.view(),
			labels: labels.view(),
		},
		&options,
	)
	.unwrap();
	let document = ReportDocument::new(&report, &timestamp());
	let value: serde_json::Value = serde_json::from_str(&document.to_json().unwrap()).unwrap();
	assert_eq!(value["timestamp"], "2024-03-01T09:30:00");
	assert_eq!(value["threshold_locked"], 0.5);
	assert_eq!(value["counts"]["total"], 4);
	assert_eq!(value["counts"]["positives"], 2);
	assert_eq!(value["counts"]["negatives"], 2);
	assert_eq!(value["metrics"]["precision"], 0.5);
	assert_eq!(value["metrics"]["recall"], 1.0);
	assert_eq!(value["metrics"]["specificity"], 0.0);
	assert!(value["metrics"]["npv"].is_null());
	assert_eq!(value["metrics"]["roc_auc"], 0.5);
	assert_eq!(value["confusion_matrix"]["tn"], 0);
	assert_eq!(value["confusion_matrix"]["fp"], 2);
	assert_eq!(value["confusion_matrix"]["fn"], 0);
	assert_eq!(value["confusion_matrix"]["tp"], 2);
	assert_eq!(value["best_f1_sweep"]["threshold"], 0.1);
	let keys: Vec<&str> = value
		.as_object()
		.unwrap()
		.keys()
		.map(|key| key.as_str())
		.collect();
	assert_eq!(
		keys,
		vec![
			"best_f1_sweep",
			"confusion_matrix",
			"counts",
			"metrics",
			"threshold_locked",
			"timestamp",
		]
	);
}
