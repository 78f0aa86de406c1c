use itertools::izip;
use ndarray::prelude::*;

/// `Table` writes a header and rows of text as a pipe delimited table with aligned columns. The output is also a valid markdown table.
pub struct Table<'a> {
	padding: usize,
	header: &'a [&'a str],
	values: &'a Array2<String>,
}

impl<'a> Table<'a> {
	pub fn new(header: &'a [&'a str], values: &'a Array2<String>) -> Self {
		Self {
			padding: 1,
			header,
			values,
		}
	}
}

impl<'a> std::fmt::Display for Table<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		// update column widths with header
		let mut column_widths: Vec<usize> = self.header.iter().map(|header| header.len()).collect();
		// update column widths with values
		for (column_width, column) in izip!(&mut column_widths, self.values.axis_iter(Axis(1))) {
			for value in column.iter() {
				*column_width = usize::max(*column_width, value.len());
			}
		}
		// write header
		let row = Row {
			column_widths: &column_widths,
			padding: self.padding,
			values: self.header,
		};
		writeln!(f, "{}", row)?;
		let line = Line {
			column_widths: &column_widths,
			padding: self.padding,
		};
		writeln!(f, "{}", line)?;
		// write values
		for values in self.values.genrows() {
			let values: Vec<&str> = values.iter().map(|value| value.as_str()).collect();
			let row = Row {
				column_widths: &column_widths,
				padding: self.padding,
				values: &values,
			};
			writeln!(f, "{}", row)?;
		}
		Ok(())
	}
}

struct Line<'a> {
	column_widths: &'a [usize],
	padding: usize,
}

impl<'a> std::fmt::Display for Line<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "|")?;
		for column_width in self.column_widths.iter() {
			write!(f, "{}|", "-".repeat(column_width + 2 * self.padding))?;
		}
		Ok(())
	}
}

struct Row<'a> {
	column_widths: &'a [usize],
	padding: usize,
	values: &'a [&'a str],
}

impl<'a> std::fmt::Display for Row<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "|")?;
		let padding = " ".repeat(self.padding);
		for (column_width, value) in self.column_widths.iter().zip(self.values) {
			write!(
				f,
				"{}{:width$}{}|",
				padding,
				value,
				padding,
				width = column_width
			)?;
		}
		Ok(())
	}
}

#[test]
fn test_table() {
	let values = arr2(&[
		["0.25".to_owned(), "12".to_owned()],
		["0.5".to_owned(), "3".to_owned()],
	]);
	let table = Table::new(&["Threshold", "FP"], &values);
	insta::assert_snapshot!(table.to_string(), @r###"
 | Threshold | FP |
 |-----------|----|
 | 0.25      | 12 |
 | 0.5       | 3  |
 "###);
}
