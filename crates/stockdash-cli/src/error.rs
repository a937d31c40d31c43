//! CLI error types for file I/O, CSV parsing, pipeline and output errors.
//!
//! [`CliError`] wraps everything that can go wrong in a CLI run. Messages are
//! meant to be actionable: what went wrong and, where possible, how to fix it.

use std::fmt;
use std::io;

/// CLI error type encompassing all possible error conditions.
#[derive(Debug)]
pub enum CliError {
    /// An I/O error occurred while reading or writing files.
    IoError {
        /// The underlying I/O error.
        source: io::Error,
        /// Path that caused the error, if known.
        path: Option<String>,
    },
    /// The input CSV could not be read.
    CsvParseError {
        /// Description of the parse error.
        message: String,
        /// Line number where the error occurred, if known.
        line: Option<usize>,
    },
    /// Normalization or indicator computation failed.
    PipelineError {
        /// The underlying stockdash error.
        source: stockdash::Error,
    },
    /// An invalid argument was provided.
    InvalidArgument {
        /// Name of the invalid argument.
        argument: String,
        /// Description of why it's invalid.
        reason: String,
        /// Suggestion for valid values.
        suggestion: Option<String>,
    },
    /// Results could not be serialized.
    OutputError {
        /// Description of the serialization failure.
        message: String,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError { source, path } => {
                if let Some(p) = path {
                    write!(f, "I/O error with file '{p}': {source}. ")?;
                    write!(f, "Check that the path exists and is accessible.")
                } else {
                    write!(f, "I/O error: {source}")
                }
            }
            Self::CsvParseError { message, line } => {
                if let Some(l) = line {
                    write!(f, "CSV parse error on line {l}: {message}. ")?;
                } else {
                    write!(f, "CSV parse error: {message}. ")?;
                }
                write!(
                    f,
                    "Expected a header row with a date column and Open, High, Low, Close columns."
                )
            }
            Self::PipelineError { source } => match source {
                stockdash::Error::MissingColumn { column } => write!(
                    f,
                    "{source}. Add a '{column}' column to the input CSV."
                ),
                stockdash::Error::EmptyInput => write!(
                    f,
                    "{source}. Check that the CSV has data rows with valid dates and positive prices."
                ),
                _ => write!(f, "{source}"),
            },
            Self::InvalidArgument {
                argument,
                reason,
                suggestion,
            } => {
                write!(f, "Invalid argument '{argument}': {reason}")?;
                if let Some(s) = suggestion {
                    write!(f, ". {s}")?;
                }
                Ok(())
            }
            Self::OutputError { message } => write!(f, "Failed to write output: {message}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError { source, .. } => Some(source),
            Self::PipelineError { source } => Some(source),
            Self::CsvParseError { .. } | Self::InvalidArgument { .. } | Self::OutputError { .. } => {
                None
            }
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::IoError {
            source: err,
            path: None,
        }
    }
}

impl From<stockdash::Error> for CliError {
    fn from(err: stockdash::Error) -> Self {
        Self::PipelineError { source: err }
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        let line = err
            .position()
            .and_then(|p| usize::try_from(p.line()).ok());
        Self::CsvParseError {
            message: err.to_string(),
            line,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::OutputError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
