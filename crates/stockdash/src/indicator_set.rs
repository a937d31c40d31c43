//! Named indicator series aligned with a bar series.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::indicators::{rsi_lookback, rsi_min_len, sma_lookback, sma_min_len};
use crate::utils::{count_nan_prefix, serialize_absent_as_none};

/// The indicators the engine knows how to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    /// Simple moving average of closes over the window.
    MovingAverage(usize),
    /// Wilder RSI over the window.
    Rsi(usize),
    /// RSI from simple rolling means over the window.
    RsiSma(usize),
}

impl IndicatorKind {
    /// The window length.
    #[must_use]
    pub const fn window(self) -> usize {
        match self {
            Self::MovingAverage(w) | Self::Rsi(w) | Self::RsiSma(w) => w,
        }
    }

    /// Number of bars needed for at least one value.
    #[must_use]
    pub const fn min_len(self) -> usize {
        match self {
            Self::MovingAverage(w) => sma_min_len(w),
            Self::Rsi(w) | Self::RsiSma(w) => rsi_min_len(w),
        }
    }

    /// Length of the warm-up prefix when enough bars exist.
    #[must_use]
    pub const fn lookback(self) -> usize {
        match self {
            Self::MovingAverage(w) => sma_lookback(w),
            Self::Rsi(w) | Self::RsiSma(w) => rsi_lookback(w),
        }
    }

    /// Series name, e.g. `MA50`, `RSI14`, `RSI_SMA14`.
    #[must_use]
    pub fn name(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MovingAverage(w) => write!(f, "MA{w}"),
            Self::Rsi(w) => write!(f, "RSI{w}"),
            Self::RsiSma(w) => write!(f, "RSI_SMA{w}"),
        }
    }
}

/// One computed indicator: its values plus any shortfall status.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorSeries {
    name: String,
    #[serde(serialize_with = "serialize_absent_as_none")]
    values: Vec<f64>,
    #[serde(skip)]
    shortfall: Option<Error>,
}

impl IndicatorSeries {
    /// Wraps computed values.
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
            shortfall: None,
        }
    }

    /// Marks the series as computed from too little history.
    #[must_use]
    pub fn with_shortfall(mut self, shortfall: Error) -> Self {
        self.shortfall = Some(shortfall);
        self
    }

    /// Series name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values aligned with the bars; `NaN` means absent.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The insufficient-history status, if any.
    #[must_use]
    pub const fn shortfall(&self) -> Option<&Error> {
        self.shortfall.as_ref()
    }

    /// Length of the leading absent region.
    #[must_use]
    pub fn warmup_len(&self) -> usize {
        count_nan_prefix(&self.values)
    }

    /// Consumes the series and returns its values.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// Indicator series keyed by name, all aligned with the same bar count.
///
/// Iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    bar_count: usize,
    series: IndexMap<String, IndicatorSeries>,
}

impl IndicatorSet {
    /// Creates an empty set for series of `bar_count` values.
    #[must_use]
    pub fn new(bar_count: usize) -> Self {
        Self {
            bar_count,
            series: IndexMap::new(),
        }
    }

    /// Adds a series, replacing any series of the same name.
    ///
    /// # Errors
    ///
    /// Returns `Error::MisalignedSeries` if the series length differs from the bar count.
    pub fn insert(&mut self, series: IndicatorSeries) -> Result<()> {
        if series.len() != self.bar_count {
            return Err(Error::MisalignedSeries {
                name: series.name,
                expected: self.bar_count,
                actual: series.values.len(),
            });
        }
        self.series.insert(series.name.clone(), series);
        Ok(())
    }

    /// Looks up a series by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&IndicatorSeries> {
        self.series.get(name)
    }

    /// Looks up a series by kind.
    #[must_use]
    pub fn get_kind(&self, kind: IndicatorKind) -> Option<&IndicatorSeries> {
        self.get(&kind.name())
    }

    /// Number of bars every series is aligned with.
    #[must_use]
    pub const fn bar_count(&self) -> usize {
        self.bar_count
    }

    /// Number of series in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// `true` when the set holds no series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Series names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Series in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &IndicatorSeries> {
        self.series.values()
    }

    /// Insufficient-history statuses across all series.
    pub fn shortfalls(&self) -> impl Iterator<Item = &Error> {
        self.series.values().filter_map(IndicatorSeries::shortfall)
    }
}
