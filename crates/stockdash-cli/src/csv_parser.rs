//! CSV parsing module for reading daily price exports.
//!
//! The parser is deliberately thin: it finds the timestamp column and hands
//! every other column over as raw text cells. Coercion, column aliasing
//! (`Adj Close`, mixed case) and row cleanup all happen in
//! [`stockdash::normalize`], so a CSV and an in-memory table go through the
//! same rules.
//!
//! # Column Detection
//!
//! The first header named `date`, `time`, `datetime`, `timestamp` or `dt`
//! (case-insensitive) becomes the table index. All other columns are kept
//! under their original names.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use stockdash::raw::{Cell, RawTable};

use crate::error::{CliError, Result};

/// Normalize a column header name for matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Check if a header represents a date column.
fn is_date_column(header: &str) -> bool {
    let normalized = normalize_header(header);
    matches!(
        normalized.as_str(),
        "date" | "time" | "datetime" | "timestamp" | "dt"
    )
}

fn to_cell(value: &str) -> Cell {
    if value.trim().is_empty() {
        Cell::Missing
    } else {
        Cell::from(value)
    }
}

/// Parse a CSV file into a [`RawTable`].
///
/// # Errors
///
/// Returns `CliError::IoError` if the file cannot be read, or
/// `CliError::CsvParseError` if the CSV is malformed or has no date column.
pub fn parse_csv<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CliError::IoError {
        source: e,
        path: Some(path.display().to_string()),
    })?;
    parse_csv_from_reader(BufReader::new(file))
}

/// Parse CSV data from a reader.
///
/// Records shorter than the header are padded with missing cells.
///
/// # Errors
///
/// Returns `CliError::CsvParseError` if the header or a record cannot be read,
/// or if no date column is present.
pub fn parse_csv_from_reader<R: Read>(reader: R) -> Result<RawTable> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(CliError::CsvParseError {
            message: "CSV file has no headers".to_string(),
            line: Some(1),
        });
    }

    let date_idx = headers
        .iter()
        .position(|h| is_date_column(h))
        .ok_or_else(|| CliError::CsvParseError {
            message: format!("no date column found in headers [{}]", headers.join(", ")),
            line: Some(1),
        })?;

    let value_columns: Vec<usize> = (0..headers.len()).filter(|&i| i != date_idx).collect();
    let mut index = Vec::new();
    let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); value_columns.len()];

    for result in csv_reader.records() {
        let record = result?;

        index.push(record.get(date_idx).unwrap_or("").to_string());
        for (cells, &col_idx) in columns.iter_mut().zip(&value_columns) {
            cells.push(record.get(col_idx).map_or(Cell::Missing, to_cell));
        }
    }

    tracing::debug!(
        rows = index.len(),
        columns = value_columns.len(),
        date_column = headers[date_idx].as_str(),
        "parsed CSV"
    );

    value_columns
        .iter()
        .zip(columns)
        .try_fold(RawTable::new(index), |table, (&col_idx, cells)| {
            table.with_column(headers[col_idx].clone(), cells)
        })
        .map_err(CliError::from)
}
