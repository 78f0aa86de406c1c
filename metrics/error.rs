use thiserror::Error;

/// The error returned by [`evaluate`](fn.evaluate.html). Degenerate results, such as a precision with no predicted positives, are not errors. They are reported with the sentinel values documented on [`ThresholdMetrics`](struct.ThresholdMetrics.html).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EvaluationError {
	#[error("invalid input: {0}")]
	InvalidInput(String),
}
