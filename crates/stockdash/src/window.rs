//! Trailing look-back windows over a bar series.
//!
//! Mirrors the period selector of a charting front end: the user asks for
//! "the last three months" and the series is trimmed before indicators are
//! computed. The day window counts trading bars; month and year windows use
//! calendar arithmetic anchored at the most recent bar.

use std::fmt;
use std::str::FromStr;

use chrono::Months;
use serde::{Deserialize, Serialize};

use crate::bar::BarSeries;
use crate::error::Error;

/// A trailing history window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HistoryWindow {
    /// The last five bars (`5d`).
    FiveDays,
    /// One calendar month (`1mo`).
    OneMonth,
    /// Three calendar months (`3mo`).
    ThreeMonths,
    /// Six calendar months (`6mo`).
    SixMonths,
    /// One calendar year (`1y`).
    OneYear,
    /// Five calendar years (`5y`).
    FiveYears,
}

impl HistoryWindow {
    /// Every window, shortest first.
    pub const ALL: [Self; 6] = [
        Self::FiveDays,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
        Self::FiveYears,
    ];

    /// The short label, e.g. `3mo`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::FiveYears => "5y",
        }
    }

    const fn months(self) -> Option<u32> {
        match self {
            Self::FiveDays => None,
            Self::OneMonth => Some(1),
            Self::ThreeMonths => Some(3),
            Self::SixMonths => Some(6),
            Self::OneYear => Some(12),
            Self::FiveYears => Some(60),
        }
    }

    /// Keeps the bars that fall inside the window ending at the last bar.
    ///
    /// Month and year windows keep bars on or after the last timestamp minus
    /// the window. The result always holds at least the last bar.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{Duration, NaiveDate};
    /// use stockdash::bar::{Bar, BarSeries};
    /// use stockdash::window::HistoryWindow;
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let bars = (0..120_i64)
    ///     .map(|i| Bar { timestamp: start + Duration::days(i), open: 1.0, high: 1.0, low: 1.0, close: 1.0, volume: 0 })
    ///     .collect();
    /// let series = BarSeries::try_from_bars(bars).unwrap();
    ///
    /// let trimmed = HistoryWindow::OneMonth.trim(&series);
    /// // 2024-03-29 through 2024-04-29
    /// assert_eq!(trimmed.len(), 32);
    /// assert_eq!(HistoryWindow::FiveDays.trim(&series).len(), 5);
    /// ```
    #[must_use]
    pub fn trim(self, series: &BarSeries) -> BarSeries {
        let Some(months) = self.months() else {
            return series.tail_from(series.len().saturating_sub(5));
        };

        let last = series.last().timestamp;
        match last.checked_sub_months(Months::new(months)) {
            Some(cutoff) => {
                let start = series.bars().partition_point(|b| b.timestamp < cutoff);
                series.tail_from(start)
            }
            None => series.clone(),
        }
    }
}

impl fmt::Display for HistoryWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|w| w.as_str() == wanted)
            .ok_or_else(|| Error::InvalidHistoryWindow {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for HistoryWindow {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HistoryWindow> for String {
    fn from(window: HistoryWindow) -> Self {
        window.as_str().to_string()
    }
}
