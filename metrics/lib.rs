/*!
This crate computes the metrics used to judge a binary classifier that outputs the probability of the positive class, such as a tumor / no_tumor MRI classifier. The entrypoint is [`evaluate`](fn.evaluate.html), which produces a [`Report`](struct.Report.html) for a fixed "locked" threshold along with a sweep over candidate thresholds. The pieces it is built from, such as the [`ConfusionMatrix`](struct.ConfusionMatrix.html) and [`auc_roc`](fn.auc_roc.html), are exported as well.
*/

#![allow(clippy::tabs_in_doc_comments)]

mod auc_roc;
mod average_precision;
mod binary_classification;
mod confusion_matrix;
mod error;
mod evaluate;
mod sweep;

pub use self::auc_roc::{auc_roc, compute_roc_curve, ROCCurvePoint};
pub use self::average_precision::{
	average_precision, compute_precision_recall_curve, PrecisionRecallCurvePoint,
};
pub use self::binary_classification::ThresholdMetrics;
pub use self::confusion_matrix::{ConfusionMatrix, ConfusionMatrixOutput};
pub use self::error::EvaluationError;
pub use self::evaluate::{
	evaluate, Counts, EvaluationInput, EvaluationOptions, Report, ReportMetrics,
	DEFAULT_LOCKED_THRESHOLD,
};
pub use self::sweep::{default_sweep_grid, linspace_grid, SweepPoint, ThresholdSweep};

/**
The `StreamingMetric` trait defines a common interface to metrics that can be computed in a streaming manner, where the input is available in chunks.

After being initialized, a value of type `T` implementing the `StreamingMetric` trait can have `update()` called on it with values of the associated type `Input`. Multiple values of `T` can be merged together by calling `merge()`, which is useful when chunks of the input are tallied independently. When finished aggregating, call `finalize()` on the metric to produce the associated type `Output`.

# Examples

Here is a basic example implementation of a `Max` metric, which takes `f32`s as input and produces an `f32` as output that is the maximum of all the inputs.

```
use neuroscan_metrics::StreamingMetric;

struct Max(f32);

impl StreamingMetric<'_> for Max {
	type Input = f32;
	type Output = f32;
	fn update(&mut self, input: Self::Input) {
		self.0 = self.0.max(input)
	}
	fn merge(&mut self, other: Self) { self.0 = self.0.max(other.0) }
	fn finalize(self) -> Self::Output { self.0 }
}
```

The seemingly unused generic lifetime `'a` exists to allow `Input`s and `Output`s to borrow from their enclosing scope.
*/
pub trait StreamingMetric<'a> {
	/// `Input` is the type to aggregate in calls to `update()`.
	type Input;
	/// `Output` is the return type of `finalize()`.
	type Output;
	/// Update this streaming metric with the `Input` `input`.
	fn update(&mut self, input: Self::Input);
	/// Merge multiple independently computed streaming metrics.
	fn merge(&mut self, other: Self);
	/// When you are done aggregating `Input`s, call `finalize()` to produce an `Output`.
	fn finalize(self) -> Self::Output;
}
