//! Simple Moving Average (SMA) indicator.
//!
//! The SMA at position `i` is the arithmetic mean of the `period` values
//! ending at `i`. Positions with fewer than `period` values behind them are
//! absent (`NaN`).
//!
//! # Algorithm
//!
//! O(n) rolling sum: add the newest value, subtract the one leaving the
//! window. Values are summed relative to the first element of the series,
//! which keeps accumulated rounding small and makes a flat window average to
//! exactly its value.
//!
//! # Example
//!
//! ```
//! use stockdash::indicators::sma::sma;
//!
//! let data: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! let result = sma(&data, 3).unwrap();
//!
//! assert!(result[0].is_nan());
//! assert!(result[1].is_nan());
//! assert!((result[2] - 2.0).abs() < 1e-10);
//! assert!((result[4] - 4.0).abs() < 1e-10);
//! ```

use crate::error::Result;
use crate::traits::{validate_period, SeriesElement};

/// Returns the number of absent values at the start of SMA output.
///
/// ```
/// use stockdash::indicators::sma::sma_lookback;
///
/// assert_eq!(sma_lookback(20), 19);
/// assert_eq!(sma_lookback(1), 0);
/// ```
#[inline]
#[must_use]
pub const fn sma_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Returns the minimum input length that yields at least one SMA value.
#[inline]
#[must_use]
pub const fn sma_min_len(period: usize) -> usize {
    if period == 0 {
        1
    } else {
        period
    }
}

/// Computes the Simple Moving Average of a data series.
///
/// The output always has the same length as the input. When the input is
/// shorter than `period` every value is absent; callers that care report that
/// as insufficient history.
///
/// Inputs are assumed to be prices no larger than
/// [`MAX_PRICE`](crate::normalize::MAX_PRICE), which the normalizer enforces.
/// Window sums over values near `f64::MAX` overflow.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
pub fn sma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    validate_period(period)?;

    let mut result = vec![T::nan(); data.len()];
    if data.len() < period {
        return Ok(result);
    }

    let period_t = T::from_usize(period)?;
    let shift = data[0];

    let mut sum = data[..period]
        .iter()
        .fold(T::zero(), |acc, &x| acc + (x - shift));
    result[period - 1] = shift + sum / period_t;

    for i in period..data.len() {
        sum = sum + (data[i] - shift) - (data[i - period] - shift);
        result[i] = shift + sum / period_t;
    }

    Ok(result)
}
