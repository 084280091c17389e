//! CSV export of result tables and history records

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::calculator::CalculationRecord;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write rows (amortization schedule, chit fund table, ...) as CSV with a
/// header taken from the field names. Nothing is written for an empty slice.
pub fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write rows to a CSV file, creating or truncating it
pub fn write_rows_to_path<P: AsRef<Path>, T: Serialize>(path: P, rows: &[T]) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_rows(file, rows)
}

/// Write a history record as a single CSV row: the scalar input fields
/// followed by the scalar output fields. Nested tables are left out; export
/// them with [`write_rows`].
pub fn write_record<W: Write>(writer: W, record: &CalculationRecord) -> Result<(), ExportError> {
    let mut headers = Vec::new();
    let mut values = Vec::new();

    for section in [&record.input, &record.output] {
        if let Some(fields) = section.as_object() {
            for (key, value) in fields {
                // The calculator tag appears in both sections
                if headers.contains(&key.as_str()) {
                    continue;
                }
                let cell = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    _ => continue,
                };
                headers.push(key.as_str());
                values.push(cell);
            }
        }
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&headers)?;
    csv_writer.write_record(&values)?;
    csv_writer.flush()?;
    Ok(())
}
