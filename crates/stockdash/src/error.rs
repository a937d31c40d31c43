//! Error types for stockdash.
//!
//! Every stage of the pipeline reports failures through the single [`Error`]
//! enum. Only some variants are fatal: [`Error::InsufficientHistory`] is
//! carried as a status on indicator output and never aborts a pipeline run.

use thiserror::Error;

/// The main error type for stockdash operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The raw table had no rows, or no usable rows survived cleaning.
    ///
    /// Fatal for the request: there is nothing to chart.
    #[error("empty input: no data available")]
    EmptyInput,

    /// A required price column is absent from the raw table.
    ///
    /// Indicates a malformed response from the data provider.
    #[error("missing required column '{column}'")]
    MissingColumn {
        /// Canonical name of the missing column (`open`, `high`, `low` or `close`).
        column: &'static str,
    },

    /// Not enough bars to compute an indicator for the requested window.
    ///
    /// This is a recoverable condition. The engine still produces an
    /// all-absent sequence of the correct length and attaches this error as
    /// a status so the caller can tell the user.
    #[error("insufficient history for {indicator}: required {required} bars, got {actual}")]
    InsufficientHistory {
        /// Name of the indicator that could not be computed (e.g. `RSI14`).
        indicator: String,
        /// Number of bars the window needs.
        required: usize,
        /// Number of bars available.
        actual: usize,
    },

    /// The window parameter is invalid.
    #[error("invalid period {period}: {reason}")]
    InvalidPeriod {
        /// The invalid period value that was provided.
        period: usize,
        /// Description of why the period is invalid.
        reason: &'static str,
    },

    /// Bars handed to [`BarSeries::try_from_bars`](crate::bar::BarSeries::try_from_bars)
    /// are not strictly ascending by timestamp.
    #[error("timestamps not strictly ascending at position {index}")]
    UnorderedTimestamps {
        /// Position of the first bar that is not later than its predecessor.
        index: usize,
    },

    /// An indicator series does not line up with the bar series.
    #[error("series '{name}' has {actual} values, expected {expected}")]
    MisalignedSeries {
        /// Name of the offending series.
        name: String,
        /// Number of bars in the series it should align with.
        expected: usize,
        /// Number of values it actually holds.
        actual: usize,
    },

    /// A history window string could not be parsed.
    #[error("invalid history window '{value}': expected one of 5d, 1mo, 3mo, 6mo, 1y, 5y")]
    InvalidHistoryWindow {
        /// The rejected input.
        value: String,
    },

    /// Failed to convert a numeric value to the target type.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },
}

impl Error {
    /// Returns `true` for errors that must abort the pipeline run.
    ///
    /// Insufficient history is the only recoverable condition.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::InsufficientHistory { .. })
    }
}

/// Convenience type alias for Results using the stockdash Error type.
pub type Result<T> = std::result::Result<T, Error>;
