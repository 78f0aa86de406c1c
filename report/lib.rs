/*!
This crate renders a [`Report`](../neuroscan_metrics/struct.Report.html) for people and for programs. [`ReportDocument`](struct.ReportDocument.html) is the json document written to `metrics.json`, [`Markdown`](struct.Markdown.html) is the summary written to `results.md`, and [`Console`](struct.Console.html) is the summary printed to the terminal.
*/

use chrono::NaiveDateTime;

mod console;
mod document;
mod markdown;
mod sweep;
mod table;

pub use self::console::Console;
pub use self::document::{
	DocumentBestF1Sweep, DocumentConfusionMatrix, DocumentCounts, DocumentMetrics, ReportDocument,
};
pub use self::markdown::Markdown;
pub use self::sweep::SweepTable;
pub use self::table::Table;

/// Format a timestamp in ISO 8601 with seconds precision, such as `2024-03-01T09:30:00`.
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
	timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
}
