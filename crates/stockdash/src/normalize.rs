//! Bar normalization: raw provider table to canonical [`BarSeries`].
//!
//! # Rules
//!
//! 1. `open`, `high`, `low` and `close` columns are required (matched
//!    case-insensitively; `adj close` and `adjusted close` stand in for
//!    `close`). `volume` is optional.
//! 2. Price cells are coerced to `f64`. A row is dropped when any price fails
//!    coercion or is `NaN`, not positive, or above [`MAX_PRICE`].
//! 3. Timestamps are coerced to timezone-naive values. An offset, if present,
//!    is dropped and the wall-clock value kept; no timezone arithmetic happens
//!    downstream. Rows with unparseable timestamps are dropped.
//! 4. Missing or unusable volume becomes 0. Volume never drops a row.
//! 5. Rows sharing a timestamp are collapsed to the first occurrence, and the
//!    result is sorted ascending.
//!
//! Normalization is idempotent: feeding a normalized series back through
//! [`RawTable::from`] and [`normalize`] yields the same series.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use num_traits::ToPrimitive;

use crate::bar::{Bar, BarSeries};
use crate::error::{Error, Result};
use crate::raw::{Cell, RawTable};

/// Largest price accepted as a usable quote.
///
/// Anything above this is a provider glitch rather than a price, and keeping
/// it would let window sums in the indicator kernels overflow.
pub const MAX_PRICE: f64 = 1e15;

/// Accepted spellings of the close column, in priority order.
pub const CLOSE_ALIASES: [&str; 3] = ["close", "adj close", "adjusted close"];

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%z",
];

const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Counters describing what normalization did to a raw table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizeReport {
    /// Rows in the raw table.
    pub rows_in: usize,
    /// Rows dropped because a price failed coercion or was not positive finite.
    pub dropped_prices: usize,
    /// Rows dropped because the timestamp could not be parsed.
    pub dropped_timestamps: usize,
    /// Rows removed as later duplicates of an earlier timestamp.
    pub duplicates: usize,
    /// Kept bars that violate the OHLC soundness check.
    pub inconsistent: usize,
    /// Bars in the normalized series.
    pub rows_out: usize,
}

/// Turns raw provider tables into canonical bar series.
///
/// The normalizer holds no state; one instance can serve any number of
/// requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarNormalizer;

impl BarNormalizer {
    /// Creates a normalizer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Normalizes a raw table.
    ///
    /// # Errors
    ///
    /// - `Error::EmptyInput` if the table has no rows or none survive cleaning
    /// - `Error::MissingColumn` if `open`, `high`, `low` or `close` is absent
    pub fn normalize(&self, raw: &RawTable) -> Result<BarSeries> {
        self.normalize_with_report(raw).map(|(series, _)| series)
    }

    /// Normalizes a raw table and reports what was dropped.
    ///
    /// # Errors
    ///
    /// Same as [`normalize`](Self::normalize).
    pub fn normalize_with_report(&self, raw: &RawTable) -> Result<(BarSeries, NormalizeReport)> {
        if raw.row_count() == 0 {
            return Err(Error::EmptyInput);
        }

        let open_col = required_column(raw, &["open"], "open")?;
        let high_col = required_column(raw, &["high"], "high")?;
        let low_col = required_column(raw, &["low"], "low")?;
        let close_col = required_column(raw, &CLOSE_ALIASES, "close")?;
        let volume_col = raw.column("volume");

        let mut report = NormalizeReport {
            rows_in: raw.row_count(),
            ..NormalizeReport::default()
        };

        let mut bars = Vec::with_capacity(raw.row_count());
        for (row, stamp) in raw.index().iter().enumerate() {
            let prices = (
                coerce_price(&open_col[row]),
                coerce_price(&high_col[row]),
                coerce_price(&low_col[row]),
                coerce_price(&close_col[row]),
            );
            let (Some(open), Some(high), Some(low), Some(close)) = prices else {
                report.dropped_prices += 1;
                continue;
            };
            let Some(timestamp) = parse_timestamp(stamp) else {
                report.dropped_timestamps += 1;
                continue;
            };
            bars.push(Bar {
                timestamp,
                open,
                high,
                low,
                close,
                volume: coerce_volume(volume_col.map(|cells| &cells[row])),
            });
        }

        // Stable sort keeps input order among equal timestamps, so dedup keeps the first.
        bars.sort_by_key(|b| b.timestamp);
        let before = bars.len();
        bars.dedup_by_key(|b| b.timestamp);
        report.duplicates = before - bars.len();

        if bars.is_empty() {
            tracing::debug!(rows_in = report.rows_in, "no usable rows after cleaning");
            return Err(Error::EmptyInput);
        }

        let series = BarSeries::from_sorted(bars);
        report.inconsistent = series.inconsistent_count();
        report.rows_out = series.len();

        tracing::debug!(
            rows_in = report.rows_in,
            rows_out = report.rows_out,
            dropped_prices = report.dropped_prices,
            dropped_timestamps = report.dropped_timestamps,
            duplicates = report.duplicates,
            inconsistent = report.inconsistent,
            "normalized raw bar table"
        );

        Ok((series, report))
    }
}

/// Normalizes a raw table with a default [`BarNormalizer`].
///
/// # Errors
///
/// See [`BarNormalizer::normalize`].
///
/// # Example
///
/// ```
/// use stockdash::normalize::normalize;
/// use stockdash::raw::RawTable;
///
/// let raw = RawTable::new(vec!["2024-01-03".into(), "2024-01-02".into(), "2024-01-02".into()])
///     .with_column("Open", vec![10.0, 9.0, 1.0]).unwrap()
///     .with_column("High", vec![11.0, 10.0, 1.0]).unwrap()
///     .with_column("Low", vec![9.5, 8.5, 1.0]).unwrap()
///     .with_column("Close", vec![10.5, 9.5, 1.0]).unwrap();
///
/// let series = normalize(&raw).unwrap();
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.closes(), vec![9.5, 10.5]);
/// ```
pub fn normalize(raw: &RawTable) -> Result<BarSeries> {
    BarNormalizer::new().normalize(raw)
}

/// Parses a timestamp into a timezone-naive value.
///
/// Offsets are dropped and the wall-clock value kept, so
/// `2024-01-02 09:30:00-05:00` becomes `2024-01-02 09:30:00`. Bare dates map
/// to midnight.
///
/// # Example
///
/// ```
/// use stockdash::normalize::parse_timestamp;
///
/// let with_offset = parse_timestamp("2024-01-02T09:30:00-05:00").unwrap();
/// let naive = parse_timestamp("2024-01-02 09:30:00").unwrap();
/// assert_eq!(with_offset, naive);
///
/// assert!(parse_timestamp("not a date").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.naive_local());
    }
    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt);
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn required_column<'a>(
    raw: &'a RawTable,
    names: &[&str],
    canonical: &'static str,
) -> Result<&'a [Cell]> {
    raw.column_any(names)
        .ok_or(Error::MissingColumn { column: canonical })
}

fn coerce_price(cell: &Cell) -> Option<f64> {
    cell.to_f64().filter(|v| v.is_finite() && *v > 0.0 && *v <= MAX_PRICE)
}

fn coerce_volume(cell: Option<&Cell>) -> u64 {
    cell.and_then(Cell::to_f64)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .and_then(|v| v.round().to_u64())
        .unwrap_or(0)
}
