//! Indicator computation over normalized bars.
//!
//! The engine reads closes from a [`BarSeries`], runs the matching kernel from
//! [`indicators`](crate::indicators) and wraps the output as a named
//! [`IndicatorSeries`]. When the series is too short for the window the output
//! is all absent and carries an [`Error::InsufficientHistory`] status instead
//! of failing.

use crate::bar::BarSeries;
use crate::error::{Error, Result};
use crate::indicator_set::{IndicatorKind, IndicatorSeries, IndicatorSet};
use crate::indicators::{rsi, rsi_sma, sma};

/// Computes indicators from bar series.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use stockdash::bar::{Bar, BarSeries};
/// use stockdash::engine::IndicatorEngine;
/// use stockdash::indicator_set::IndicatorKind;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let bars: Vec<Bar> = (0..30_i64)
///     .map(|i| {
///         let close = 100.0 + i as f64;
///         Bar {
///             timestamp: start + chrono::Duration::days(i),
///             open: close,
///             high: close + 1.0,
///             low: close - 1.0,
///             close,
///             volume: 1_000,
///         }
///     })
///     .collect();
/// let series = BarSeries::try_from_bars(bars).unwrap();
///
/// let set = IndicatorEngine::new()
///     .compute(&series, &[IndicatorKind::MovingAverage(20), IndicatorKind::Rsi(14)])
///     .unwrap();
///
/// assert_eq!(set.names().collect::<Vec<_>>(), vec!["MA20", "RSI14"]);
/// assert_eq!(set.get("RSI14").unwrap().values()[29], 100.0);
/// assert_eq!(set.shortfalls().count(), 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorEngine;

impl IndicatorEngine {
    /// Creates an engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Simple moving average of closes over `window` bars.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPeriod` if `window` is zero.
    pub fn moving_average(&self, series: &BarSeries, window: usize) -> Result<IndicatorSeries> {
        self.compute_one(series, IndicatorKind::MovingAverage(window))
    }

    /// Wilder RSI of closes over `window` bars.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPeriod` if `window` is zero.
    pub fn rsi(&self, series: &BarSeries, window: usize) -> Result<IndicatorSeries> {
        self.compute_one(series, IndicatorKind::Rsi(window))
    }

    /// RSI from simple rolling means of gains and losses.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPeriod` if `window` is zero.
    pub fn rsi_sma(&self, series: &BarSeries, window: usize) -> Result<IndicatorSeries> {
        self.compute_one(series, IndicatorKind::RsiSma(window))
    }

    /// Computes a single indicator.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPeriod` if the kind's window is zero.
    pub fn compute_one(&self, series: &BarSeries, kind: IndicatorKind) -> Result<IndicatorSeries> {
        let closes = series.closes();
        let values = match kind {
            IndicatorKind::MovingAverage(w) => sma(&closes, w)?,
            IndicatorKind::Rsi(w) => rsi(&closes, w)?,
            IndicatorKind::RsiSma(w) => rsi_sma(&closes, w)?,
        };

        let computed = IndicatorSeries::new(kind.name(), values);
        if series.len() >= kind.min_len() {
            return Ok(computed);
        }

        tracing::debug!(
            indicator = %kind,
            required = kind.min_len(),
            actual = series.len(),
            "insufficient history"
        );
        Ok(computed.with_shortfall(Error::InsufficientHistory {
            indicator: kind.name(),
            required: kind.min_len(),
            actual: series.len(),
        }))
    }

    /// Computes every requested indicator into one set, in request order.
    ///
    /// Repeated kinds are computed once.
    ///
    /// # Errors
    ///
    /// Returns the first `Error::InvalidPeriod` encountered.
    pub fn compute(&self, series: &BarSeries, kinds: &[IndicatorKind]) -> Result<IndicatorSet> {
        let mut set = IndicatorSet::new(series.len());
        for &kind in kinds {
            if set.get_kind(kind).is_some() {
                continue;
            }
            set.insert(self.compute_one(series, kind)?)?;
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::Bar;
    use crate::utils::{approx_eq, EPSILON};
    use chrono::{Duration, NaiveDate};

    fn series_from_closes(closes: &[f64]) -> BarSeries {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let bars = closes
            .iter()
            .zip(0_i64..)
            .map(|(&close, day)| Bar {
                timestamp: start + Duration::days(day),
                open: close,
                high: close,
                low: close,
                close,
                volume: 0,
            })
            .collect();
        BarSeries::try_from_bars(bars).unwrap()
    }

    const GOLDEN_CLOSES: [f64; 15] = [
        44.0, 44.25, 44.5, 43.75, 44.5, 44.0, 44.25, 45.0, 47.5, 47.0, 44.5, 46.0, 45.5, 45.0,
        44.75,
    ];

    // ==================== Moving Average Tests ====================

    #[test]
    fn test_moving_average_values() {
        let series = series_from_closes(&[10.0, 11.0, 12.0, 13.0]);
        let ma = IndicatorEngine::new().moving_average(&series, 2).unwrap();
        assert_eq!(ma.name(), "MA2");
        assert!(ma.values()[0].is_nan());
        assert!(approx_eq(ma.values()[1], 10.5, EPSILON));
        assert!(approx_eq(ma.values()[3], 12.5, EPSILON));
        assert!(ma.shortfall().is_none());
    }

    #[test]
    fn test_moving_average_shortfall() {
        let series = series_from_closes(&[10.0, 11.0, 12.0]);
        let ma = IndicatorEngine::new().moving_average(&series, 50).unwrap();
        assert_eq!(ma.len(), 3);
        assert!(ma.values().iter().all(|v| v.is_nan()));
        assert_eq!(
            ma.shortfall(),
            Some(&Error::InsufficientHistory {
                indicator: "MA50".to_string(),
                required: 50,
                actual: 3,
            })
        );
    }

    #[test]
    fn test_zero_window_is_fatal() {
        let series = series_from_closes(&[10.0, 11.0]);
        let err = IndicatorEngine::new().moving_average(&series, 0).unwrap_err();
        assert!(err.is_fatal());
        assert!(IndicatorEngine::new().rsi(&series, 0).is_err());
    }

    // ==================== RSI Tests ====================

    #[test]
    fn test_rsi_golden_value() {
        let series = series_from_closes(&GOLDEN_CLOSES);
        let rsi = IndicatorEngine::new().rsi(&series, 14).unwrap();
        assert_eq!(rsi.warmup_len(), 14);
        assert!(approx_eq(rsi.values()[14], 53.191_489_361_702_125, 1e-9));
    }

    #[test]
    fn test_rsi_exact_window_is_shortfall() {
        let series = series_from_closes(&GOLDEN_CLOSES[..14]);
        let rsi = IndicatorEngine::new().rsi(&series, 14).unwrap();
        assert!(rsi.values().iter().all(|v| v.is_nan()));
        assert!(matches!(
            rsi.shortfall(),
            Some(Error::InsufficientHistory { required: 15, actual: 14, .. })
        ));
    }

    #[test]
    fn test_rsi_sma_named_separately() {
        let series = series_from_closes(&GOLDEN_CLOSES);
        let naive = IndicatorEngine::new().rsi_sma(&series, 14).unwrap();
        assert_eq!(naive.name(), "RSI_SMA14");
    }

    // ==================== Set Tests ====================

    #[test]
    fn test_compute_preserves_request_order_and_dedups() {
        let series = series_from_closes(&GOLDEN_CLOSES);
        let set = IndicatorEngine::new()
            .compute(
                &series,
                &[
                    IndicatorKind::Rsi(14),
                    IndicatorKind::MovingAverage(5),
                    IndicatorKind::Rsi(14),
                    IndicatorKind::MovingAverage(50),
                ],
            )
            .unwrap();

        assert_eq!(set.names().collect::<Vec<_>>(), vec!["RSI14", "MA5", "MA50"]);
        assert_eq!(set.bar_count(), 15);
        assert_eq!(set.shortfalls().count(), 1);
    }

    #[test]
    fn test_compute_fails_on_zero_window() {
        let series = series_from_closes(&GOLDEN_CLOSES);
        let result = IndicatorEngine::new().compute(
            &series,
            &[IndicatorKind::MovingAverage(5), IndicatorKind::Rsi(0)],
        );
        assert!(matches!(result, Err(Error::InvalidPeriod { period: 0, .. })));
    }
}
