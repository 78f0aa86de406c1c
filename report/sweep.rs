use crate::table::Table;
use derive_more::Constructor;
use ndarray::prelude::*;
use neuroscan_metrics::SweepPoint;

/// One row per swept threshold, in sweep order.
#[derive(Constructor)]
pub struct SweepTable<'a> {
	points: &'a [SweepPoint],
}

impl<'a> std::fmt::Display for SweepTable<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let header = ["Threshold", "Precision", "Recall", "F1", "FP", "FN"];
		let mut values = Array2::from_elem((self.points.len(), header.len()), String::new());
		for (mut row, point) in values.genrows_mut().into_iter().zip(self.points) {
			row[0] = format!("{:.2}", point.threshold);
			row[1] = format!("{:.3}", point.precision);
			row[2] = format!("{:.3}", point.recall);
			row[3] = format!("{:.3}", point.f1_score);
			row[4] = point.false_positives.to_string();
			row[5] = point.false_negatives.to_string();
		}
		write!(f, "{}", Table::new(&header, &values))
	}
}

#[test]
fn test_sweep_table() {
	let points = [
		SweepPoint {
			threshold: 0.25,
			precision: 0.5,
			recall: 1.0,
			f1_score: 2.0 / 3.0,
			true_positives: 2,
			false_positives: 2,
			false_negatives: 0,
		},
		SweepPoint {
			threshold: 0.75,
			precision: 1.0,
			recall: 0.5,
			f1_score: 2.0 / 3.0,
			true_positives: 1,
			false_positives: 0,
			false_negatives: 1,
		},
	];
	insta::assert_snapshot!(SweepTable::new(&points).to_string(), @r###"
 | Threshold | Precision | Recall | F1    | FP | FN |
 |-----------|-----------|--------|-------|----|----|
 | 0.25      | 0.500     | 1.000  | 0.667 | 2  | 0  |
 | 0.75      | 1.000     | 0.500  | 0.667 | 0  | 1  |
 "###);
}
