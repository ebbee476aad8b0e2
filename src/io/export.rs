//! CSV export for report output.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::runner::ReportOutput;

/// Column header for CSV report export.
const HEADER: &str = "day,metric,minutes";

/// Exports a report to a CSV file at the given path.
///
/// Writes a header row followed by one row per measured window. Single-period
/// reports leave the `day` column empty.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(output: &ReportOutput, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(output, buf)
}

/// Writes a report as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(output: &ReportOutput, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for row in output.rows() {
        wtr.write_record(&[
            row.day.map(|d| d.to_string()).unwrap_or_default(),
            row.metric.to_string(),
            row.minutes.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
