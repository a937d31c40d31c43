//! Canonical in-memory representation of daily price bars.
//!
//! A [`BarSeries`] is what the normalizer produces and what every downstream
//! stage consumes. It is immutable: stages that need a different set of bars
//! (for example a trimmed history window) build a new series.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{Error, Result};

/// A single OHLCV observation for one trading period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bar {
    /// Timezone-naive timestamp of the period (wall-clock value).
    pub timestamp: NaiveDateTime,
    /// Opening price.
    pub open: f64,
    /// Highest price during the period.
    pub high: f64,
    /// Lowest price during the period.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Volume traded; zero when the provider did not report it.
    pub volume: u64,
}

impl Bar {
    /// Checks `low <= min(open, close) <= max(open, close) <= high`.
    ///
    /// Providers occasionally violate this; the pipeline tolerates it and
    /// only reports the count.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let body_low = self.open.min(self.close);
        let body_high = self.open.max(self.close);
        self.low <= body_low && body_high <= self.high
    }
}

/// An ordered, non-empty sequence of bars with strictly ascending timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Builds a series from bars that are already in order.
    ///
    /// # Errors
    ///
    /// - `Error::EmptyInput` if `bars` is empty
    /// - `Error::UnorderedTimestamps` if any timestamp is not later than the previous one
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use stockdash::bar::{Bar, BarSeries};
    ///
    /// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let bar = |d, close| Bar { timestamp: day(d), open: close, high: close, low: close, close, volume: 0 };
    ///
    /// let series = BarSeries::try_from_bars(vec![bar(2, 10.0), bar(3, 11.0)]).unwrap();
    /// assert_eq!(series.closes(), vec![10.0, 11.0]);
    ///
    /// assert!(BarSeries::try_from_bars(vec![bar(3, 10.0), bar(2, 11.0)]).is_err());
    /// ```
    pub fn try_from_bars(bars: Vec<Bar>) -> Result<Self> {
        if bars.is_empty() {
            return Err(Error::EmptyInput);
        }
        if let Some(pos) = bars.windows(2).position(|w| w[1].timestamp <= w[0].timestamp) {
            return Err(Error::UnorderedTimestamps { index: pos + 1 });
        }
        Ok(Self { bars })
    }

    /// Wraps bars the caller has already sorted and de-duplicated.
    pub(crate) fn from_sorted(bars: Vec<Bar>) -> Self {
        debug_assert!(!bars.is_empty());
        debug_assert!(bars.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        Self { bars }
    }

    /// Number of bars in the series (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always `false`; a `BarSeries` cannot be empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The bars as a slice.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Iterator over the bars in timestamp order.
    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }

    /// The first (oldest) bar.
    #[must_use]
    pub fn first(&self) -> &Bar {
        &self.bars[0]
    }

    /// The last (most recent) bar.
    #[must_use]
    pub fn last(&self) -> &Bar {
        &self.bars[self.bars.len() - 1]
    }

    /// Closing prices, the input to every indicator.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Timestamps in order.
    #[must_use]
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    /// Volumes in order.
    #[must_use]
    pub fn volumes(&self) -> Vec<u64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Number of bars failing the OHLC soundness check.
    #[must_use]
    pub fn inconsistent_count(&self) -> usize {
        self.bars.iter().filter(|b| !b.is_consistent()).count()
    }

    /// Returns a new series holding the bars from `start` onward.
    ///
    /// `start` is clamped so the result keeps at least the last bar.
    #[must_use]
    pub fn tail_from(&self, start: usize) -> Self {
        let start = start.min(self.bars.len() - 1);
        Self {
            bars: self.bars[start..].to_vec(),
        }
    }
}

impl<'a> IntoIterator for &'a BarSeries {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            timestamp: ts(day),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 100,
        }
    }

    #[test]
    fn test_try_from_bars_ordered() {
        let series = BarSeries::try_from_bars(vec![bar(1, 10.0), bar(4, 11.0), bar(5, 12.0)]).unwrap();
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
        assert_eq!(series.closes(), vec![10.0, 11.0, 12.0]);
        assert_eq!(series.first().timestamp, ts(1));
        assert_eq!(series.last().timestamp, ts(5));
    }

    #[test]
    fn test_try_from_bars_empty() {
        assert_eq!(BarSeries::try_from_bars(Vec::new()), Err(Error::EmptyInput));
    }

    #[test]
    fn test_try_from_bars_duplicate_timestamp() {
        let result = BarSeries::try_from_bars(vec![bar(1, 10.0), bar(2, 11.0), bar(2, 12.0)]);
        assert_eq!(result, Err(Error::UnorderedTimestamps { index: 2 }));
    }

    #[test]
    fn test_try_from_bars_descending() {
        let result = BarSeries::try_from_bars(vec![bar(2, 10.0), bar(1, 11.0)]);
        assert_eq!(result, Err(Error::UnorderedTimestamps { index: 1 }));
    }

    #[test]
    fn test_consistency_check() {
        let good = bar(1, 10.0);
        assert!(good.is_consistent());

        let bad = Bar {
            high: 9.0,
            ..good
        };
        assert!(!bad.is_consistent());

        let series = BarSeries::try_from_bars(vec![good, Bar { timestamp: ts(2), ..bad }]).unwrap();
        assert_eq!(series.inconsistent_count(), 1);
    }

    #[test]
    fn test_tail_from_clamps() {
        let series = BarSeries::try_from_bars(vec![bar(1, 10.0), bar(2, 11.0), bar(3, 12.0)]).unwrap();
        assert_eq!(series.tail_from(1).closes(), vec![11.0, 12.0]);
        assert_eq!(series.tail_from(10).closes(), vec![12.0]);
        // original untouched
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_volumes_and_timestamps() {
        let series = BarSeries::try_from_bars(vec![bar(1, 10.0), bar(2, 11.0)]).unwrap();
        assert_eq!(series.volumes(), vec![100, 100]);
        assert_eq!(series.timestamps(), vec![ts(1), ts(2)]);
        assert_eq!(series.iter().count(), 2);
        assert_eq!((&series).into_iter().count(), 2);
    }
}
