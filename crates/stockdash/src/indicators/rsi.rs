//! Relative Strength Index (RSI) with Wilder smoothing.
//!
//! RSI is a momentum oscillator bounded to `[0, 100]`. Readings above 70 are
//! conventionally overbought, below 30 oversold.
//!
//! # Formula
//!
//! ```text
//! Change[i] = Price[i] - Price[i-1]            (i >= 1)
//! Gain[i]   = max(Change[i], 0)
//! Loss[i]   = max(-Change[i], 0)
//!
//! AvgGain[period] = mean(Gain[1..=period])      seed
//! AvgLoss[period] = mean(Loss[1..=period])
//!
//! AvgGain[i] = (AvgGain[i-1] * (period-1) + Gain[i]) / period   (i > period)
//! AvgLoss[i] = (AvgLoss[i-1] * (period-1) + Loss[i]) / period
//!
//! RSI[i] = 100 - 100 / (1 + AvgGain[i] / AvgLoss[i])
//! ```
//!
//! The recursion is exponential smoothing with `alpha = 1/period` and no bias
//! adjustment. It is carried as explicit [`WilderAverages`] state so it can
//! be tested apart from the RSI formula.
//!
//! # Boundary Conditions
//!
//! Checked before dividing:
//!
//! - `AvgLoss == 0`, `AvgGain > 0`: RSI = 100
//! - `AvgGain == 0`, `AvgLoss > 0`: RSI = 0
//! - both zero (flat prices): absent, there is no direction to report
//!
//! # Example
//!
//! ```
//! use stockdash::indicators::rsi::rsi;
//!
//! let data: Vec<f64> = vec![44.0, 44.25, 44.5, 43.75, 44.5, 44.25, 44.0, 43.5, 43.25, 43.0];
//! let result = rsi(&data, 5).unwrap();
//!
//! // the first `period` values have no smoothed averages yet
//! assert!(result[..5].iter().all(|v| v.is_nan()));
//! assert!(result[5] >= 0.0 && result[5] <= 100.0);
//! ```

use std::iter;

use crate::error::Result;
use crate::traits::{validate_period, SeriesElement};

/// Returns the number of absent values at the start of RSI output.
///
/// The first change needs two prices, and the seed needs `period` changes,
/// so the first value sits at index `period`.
#[inline]
#[must_use]
pub const fn rsi_lookback(period: usize) -> usize {
    period
}

/// Returns the minimum input length that yields at least one RSI value.
///
/// ```
/// use stockdash::indicators::rsi::rsi_min_len;
///
/// assert_eq!(rsi_min_len(14), 15);
/// ```
#[inline]
#[must_use]
pub const fn rsi_min_len(period: usize) -> usize {
    period + 1
}

/// Smoothed average gain and loss at one position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WilderAverages<T> {
    /// Smoothed average of gains.
    pub avg_gain: T,
    /// Smoothed average of losses (stored as a positive magnitude).
    pub avg_loss: T,
}

impl<T: SeriesElement> WilderAverages<T> {
    /// RSI for this state, `NaN` when both averages are zero.
    #[must_use]
    pub fn rsi(&self) -> T {
        rsi_value(self.avg_gain, self.avg_loss)
    }
}

/// Wilder's recursive smoother for a fixed period.
#[derive(Debug, Clone, Copy)]
pub struct WilderSmoother<T> {
    period: T,
    carry: T,
}

impl<T: SeriesElement> WilderSmoother<T> {
    /// Creates a smoother for `period`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPeriod` if `period` is zero.
    pub fn new(period: usize) -> Result<Self> {
        validate_period(period)?;
        Ok(Self {
            period: T::from_usize(period)?,
            carry: T::from_usize(period - 1)?,
        })
    }

    /// Seeds the averages with the simple mean of the given changes.
    ///
    /// `changes` should hold exactly `period` price changes.
    #[must_use]
    pub fn seed(&self, changes: &[T]) -> WilderAverages<T> {
        let (gains, losses) = changes
            .iter()
            .map(|&c| split_change(c))
            .fold((T::zero(), T::zero()), |(g, l), (gain, loss)| (g + gain, l + loss));
        WilderAverages {
            avg_gain: gains / self.period,
            avg_loss: losses / self.period,
        }
    }

    /// Advances the averages by one price change.
    #[must_use]
    pub fn step(&self, prev: WilderAverages<T>, change: T) -> WilderAverages<T> {
        let (gain, loss) = split_change(change);
        WilderAverages {
            avg_gain: (prev.avg_gain * self.carry + gain) / self.period,
            avg_loss: (prev.avg_loss * self.carry + loss) / self.period,
        }
    }
}

/// Computes the smoothed averages for every position of `data`.
///
/// Positions before `period` are `None`, as is every position when `data`
/// holds fewer than `period + 1` values.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
///
/// # Example
///
/// ```
/// use stockdash::indicators::rsi::wilder_averages;
///
/// let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
/// let averages = wilder_averages(&data, 2).unwrap();
///
/// assert!(averages[1].is_none());
/// let first = averages[2].unwrap();
/// assert_eq!(first.avg_gain, 1.0);
/// assert_eq!(first.avg_loss, 0.0);
/// ```
pub fn wilder_averages<T: SeriesElement>(
    data: &[T],
    period: usize,
) -> Result<Vec<Option<WilderAverages<T>>>> {
    let smoother = WilderSmoother::new(period)?;

    let mut out = vec![None; data.len()];
    if data.len() < rsi_min_len(period) {
        return Ok(out);
    }

    // changes[k] is the change into data[k + 1]
    let changes: Vec<T> = data.windows(2).map(|w| w[1] - w[0]).collect();
    let seed = smoother.seed(&changes[..period]);

    let smoothed = iter::once(seed).chain(changes[period..].iter().scan(seed, |state, &change| {
        *state = smoother.step(*state, change);
        Some(*state)
    }));

    for (slot, averages) in out[period..].iter_mut().zip(smoothed) {
        *slot = Some(averages);
    }

    Ok(out)
}

/// Computes the Relative Strength Index using Wilder's smoothing.
///
/// The output has the same length as the input. The first `period` values
/// are absent, and everything is absent when the input holds fewer than
/// `period + 1` values.
///
/// Inputs are assumed to be prices no larger than
/// [`MAX_PRICE`](crate::normalize::MAX_PRICE), which the normalizer enforces.
/// Window sums over values near `f64::MAX` overflow.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
///
/// # Example
///
/// ```
/// use stockdash::indicators::rsi::rsi;
///
/// let rising: Vec<f64> = (0..20).map(|i| 100.0 + f64::from(i)).collect();
/// let result = rsi(&rising, 14).unwrap();
/// assert!(result[13].is_nan());
/// assert_eq!(result[14], 100.0);
/// ```
pub fn rsi<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    Ok(wilder_averages(data, period)?
        .into_iter()
        .map(|averages| averages.map_or_else(T::nan, |a| a.rsi()))
        .collect())
}

/// Computes an RSI value from average gain and average loss.
///
/// The three degenerate cases are resolved before any division so no
/// unexplained `NaN` can escape.
#[inline]
#[must_use]
pub fn rsi_value<T: SeriesElement>(avg_gain: T, avg_loss: T) -> T {
    let zero = T::zero();
    let hundred = T::hundred();

    if avg_loss == zero && avg_gain > zero {
        hundred
    } else if avg_gain == zero && avg_loss > zero {
        zero
    } else if avg_gain == zero && avg_loss == zero {
        T::nan()
    } else {
        let rs = avg_gain / avg_loss;
        hundred - hundred / (T::one() + rs)
    }
}

/// Splits a price change into `(gain, loss)`, both non-negative.
#[inline]
pub(crate) fn split_change<T: SeriesElement>(change: T) -> (T, T) {
    let zero = T::zero();
    if change > zero {
        (change, zero)
    } else if change < zero {
        (zero, -change)
    } else {
        (zero, zero)
    }
}
