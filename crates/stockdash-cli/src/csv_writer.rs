//! CSV output module for writing chart bundles and single indicators.
//!
//! Every bar gets a row, warm-up rows included, so the output lines up with
//! the input one-to-one. Absent indicator values are written as empty cells.
//!
//! # Output Format
//!
//! A bundle is written as `date,open,high,low,close,volume` followed by one
//! column per overlay and one per panel line, in drawing order. A single
//! indicator is written as `date,close,<name>`.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use chrono::NaiveDateTime;
use stockdash::bar::BarSeries;
use stockdash::indicator_set::IndicatorSeries;
use stockdash::plot::PlotBundle;

use crate::error::{CliError, Result};

/// Output destination: either stdout or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDest {
    /// Write to stdout.
    Stdout,
    /// Write to a file at the given path.
    File(String),
}

impl OutputDest {
    /// Picks a file destination when a path was given, stdout otherwise.
    #[must_use]
    pub fn from_path(path: Option<&str>) -> Self {
        path.map_or(Self::Stdout, |p| Self::File(p.to_string()))
    }

    /// Create a writer for this output destination.
    ///
    /// # Errors
    ///
    /// Returns `CliError::IoError` if the file cannot be created.
    pub fn writer(&self) -> Result<Box<dyn Write>> {
        match self {
            Self::Stdout => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
            Self::File(path) => {
                let file = File::create(path).map_err(|e| CliError::IoError {
                    source: e,
                    path: Some(path.clone()),
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }
}

/// Dates at midnight are written without a time part.
fn format_timestamp(ts: NaiveDateTime) -> String {
    if ts.time() == chrono::NaiveTime::MIN {
        ts.format("%Y-%m-%d").to_string()
    } else {
        ts.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

fn write_value(writer: &mut dyn Write, value: f64) -> io::Result<()> {
    if value.is_nan() {
        Ok(())
    } else {
        write!(writer, "{value}")
    }
}

/// Write a chart bundle as one CSV row per bar.
///
/// # Errors
///
/// Returns `CliError::IoError` if the destination cannot be written.
pub fn write_bundle(bundle: &PlotBundle, dest: &OutputDest) -> Result<()> {
    let mut writer = dest.writer()?;

    write!(writer, "date,open,high,low,close,volume")?;
    for line in bundle.lines() {
        write!(writer, ",{}", line.name())?;
    }
    writeln!(writer)?;

    for (i, bar) in bundle.bars().iter().enumerate() {
        write!(
            writer,
            "{},{},{},{},{},{}",
            format_timestamp(bar.timestamp),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        )?;
        for line in bundle.lines() {
            write!(writer, ",")?;
            write_value(&mut writer, line.values()[i])?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write one indicator next to the closes it was computed from.
///
/// # Errors
///
/// Returns `CliError::IoError` if the destination cannot be written.
pub fn write_indicator(bars: &BarSeries, series: &IndicatorSeries, dest: &OutputDest) -> Result<()> {
    let mut writer = dest.writer()?;

    writeln!(writer, "date,close,{}", series.name())?;
    for (bar, &value) in bars.iter().zip(series.values()) {
        write!(writer, "{},{},", format_timestamp(bar.timestamp), bar.close)?;
        write_value(&mut writer, value)?;
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}
