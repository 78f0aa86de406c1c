use anyhow::{Context, Result};
use ndarray::prelude::*;
use std::path::Path;

/// The probabilities and labels read from a predictions csv file.
pub struct Predictions {
	pub probabilities: Array1<f64>,
	pub labels: Array1<usize>,
}

#[derive(serde::Deserialize)]
struct Row {
	probability: f64,
	label: usize,
}

/// Read a csv file with a header containing the columns `probability` and `label`. Other columns are ignored.
pub fn load_predictions(path: &Path) -> Result<Predictions> {
	let mut reader = csv::Reader::from_path(path)
		.with_context(|| format!("failed to open predictions file {}", path.display()))?;
	read_predictions(&mut reader)
		.with_context(|| format!("failed to read predictions file {}", path.display()))
}

pub fn read_predictions<R>(reader: &mut csv::Reader<R>) -> Result<Predictions>
where
	R: std::io::Read,
{
	let mut probabilities = Vec::new();
	let mut labels = Vec::new();
	for (index, row) in reader.deserialize::<Row>().enumerate() {
		let row = row.with_context(|| format!("failed to parse row {}", index + 1))?;
		probabilities.push(row.probability);
		labels.push(row.label);
	}
	Ok(Predictions {
		probabilities: Array1::from(probabilities),
		labels: Array1::from(labels),
	})
}

#[test]
fn test_read_predictions() {
	let csv = "path,probability,label\na.jpg,0.9,1\nb.jpg,0.1,0\n";
	let mut reader = csv::Reader::from_reader(csv.as_bytes());
	let predictions = read_predictions(&mut reader).unwrap();
	assert_eq!(predictions.probabilities, arr1(&[0.9, 0.1]));
	assert_eq!(predictions.labels, arr1(&[1, 0]));
}

#[test]
fn test_read_predictions_invalid_row() {
	let csv = "probability,label\n0.9,1\nhigh,0\n";
	let mut reader = csv::Reader::from_reader(csv.as_bytes());
	let error = read_predictions(&mut reader).err().unwrap();
	assert_eq!(error.to_string(), "failed to parse row 2");
}

#[test]
fn test_read_predictions_keeps_double_precision() {
	let csv = "probability,label\n0.34999999,0\n";
	let mut reader = csv::Reader::from_reader(csv.as_bytes());
	let predictions = read_predictions(&mut reader).unwrap();
	assert!(predictions.probabilities[0] < 0.35);
}

#[test]
fn test_read_predictions_missing_column() {
	let csv = "probability\n0.9\n";
	let mut reader = csv::Reader::from_reader(csv.as_bytes());
	assert!(read_predictions(&mut reader).is_err());
}
