//! Render-ready series for a charting layer.
//!
//! A [`PlotBundle`] carries everything a candlestick chart with moving-average
//! overlays and an RSI sub-panel needs: the bars, one line per overlay, the
//! RSI line with its two guide lines, and any insufficient-history notices to
//! show the user. No rendering happens here.

use serde::{Serialize, Serializer};

use crate::bar::BarSeries;
use crate::engine::IndicatorEngine;
use crate::error::{Error, Result};
use crate::indicator_set::{IndicatorKind, IndicatorSeries, IndicatorSet};
use crate::utils::serialize_absent_as_none;

/// Lower RSI guide line.
pub const RSI_OVERSOLD: f64 = 30.0;

/// Upper RSI guide line.
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// Name of the upper guide line in the panel.
pub const GUIDE_OVERBOUGHT: &str = "GUIDE70";

/// Name of the lower guide line in the panel.
pub const GUIDE_OVERSOLD: &str = "GUIDE30";

const OVERLAY_COLORS: [&str; 4] = ["orange", "blue", "teal", "gray"];
const RSI_COLOR: &str = "purple";
const RSI_SMA_COLOR: &str = "orchid";

/// How a line should be stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// Continuous stroke.
    Solid,
    /// Dashed stroke, used for guide lines.
    Dashed,
}

/// One named line aligned with the bars.
#[derive(Debug, Clone, Serialize)]
pub struct PlotLine {
    name: String,
    color: &'static str,
    style: LineStyle,
    #[serde(serialize_with = "serialize_absent_as_none")]
    values: Vec<f64>,
}

impl PlotLine {
    fn solid(series: IndicatorSeries, color: &'static str) -> Self {
        let name = series.name().to_string();
        Self {
            name,
            color,
            style: LineStyle::Solid,
            values: series.into_values(),
        }
    }

    fn guide(name: &str, level: f64, color: &'static str, len: usize) -> Self {
        Self {
            name: name.to_string(),
            color,
            style: LineStyle::Dashed,
            values: vec![level; len],
        }
    }

    /// Line name, e.g. `MA20` or `GUIDE70`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Suggested colour.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        self.color
    }

    /// Suggested stroke.
    #[must_use]
    pub const fn style(&self) -> LineStyle {
        self.style
    }

    /// Values aligned with the bars; `NaN` means absent.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Bars plus every derived line, ready for a charting layer.
#[derive(Debug, Clone, Serialize)]
pub struct PlotBundle {
    bars: BarSeries,
    overlays: Vec<PlotLine>,
    panels: Vec<PlotLine>,
    #[serde(serialize_with = "serialize_notices")]
    notices: Vec<Error>,
}

impl PlotBundle {
    /// The bars the lines are aligned with.
    #[must_use]
    pub const fn bars(&self) -> &BarSeries {
        &self.bars
    }

    /// Lines drawn on the price axis.
    #[must_use]
    pub fn overlays(&self) -> &[PlotLine] {
        &self.overlays
    }

    /// Lines drawn in the RSI sub-panel, guide lines last.
    #[must_use]
    pub fn panels(&self) -> &[PlotLine] {
        &self.panels
    }

    /// Insufficient-history statuses to show the user.
    #[must_use]
    pub fn notices(&self) -> &[Error] {
        &self.notices
    }

    /// Looks up an overlay by name.
    #[must_use]
    pub fn overlay(&self, name: &str) -> Option<&PlotLine> {
        self.overlays.iter().find(|l| l.name == name)
    }

    /// Looks up a panel line by name.
    #[must_use]
    pub fn panel(&self, name: &str) -> Option<&PlotLine> {
        self.panels.iter().find(|l| l.name == name)
    }

    /// Overlay lines followed by panel lines.
    pub fn lines(&self) -> impl Iterator<Item = &PlotLine> {
        self.overlays.iter().chain(&self.panels)
    }
}

fn serialize_notices<S: Serializer>(notices: &[Error], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(notices.iter().map(ToString::to_string))
}

/// Assembles a [`PlotBundle`] from bars and computed indicators.
///
/// Indicators missing from the supplied set, or computed for a different bar
/// count, are computed here so the builder only ever fails with upstream
/// errors.
///
/// # Example
///
/// ```
/// use stockdash::bar::{Bar, BarSeries};
/// use stockdash::indicator_set::IndicatorSet;
/// use stockdash::plot::PlotSeriesBuilder;
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let bars: Vec<Bar> = (1..=3)
///     .map(|d| Bar { timestamp: day(d), open: 10.0, high: 11.0, low: 9.0, close: 10.0, volume: 5 })
///     .collect();
/// let bars = BarSeries::try_from_bars(bars).unwrap();
///
/// let bundle = PlotSeriesBuilder::new()
///     .build(bars, &IndicatorSet::default(), &[2], 14)
///     .unwrap();
///
/// assert_eq!(bundle.overlay("MA2").unwrap().values()[2], 10.0);
/// assert_eq!(bundle.panel("GUIDE70").unwrap().values(), &[70.0; 3]);
/// assert_eq!(bundle.notices().len(), 1); // RSI14 needs 15 bars
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlotSeriesBuilder {
    engine: IndicatorEngine,
    rsi_sma: bool,
}

impl PlotSeriesBuilder {
    /// Creates a builder with the Wilder RSI panel only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the simple-average RSI line to the panel.
    ///
    /// Default: false
    #[must_use]
    pub const fn rsi_sma(mut self, enabled: bool) -> Self {
        self.rsi_sma = enabled;
        self
    }

    /// Builds the bundle.
    ///
    /// Overlay windows are drawn in the order given; repeats are dropped.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPeriod` if any window is zero.
    pub fn build(
        &self,
        bars: BarSeries,
        indicators: &IndicatorSet,
        overlay_windows: &[usize],
        rsi_window: usize,
    ) -> Result<PlotBundle> {
        let mut notices = Vec::new();
        let mut take = |kind: IndicatorKind| -> Result<IndicatorSeries> {
            let series = self.resolve(&bars, indicators, kind)?;
            if let Some(shortfall) = series.shortfall() {
                notices.push(shortfall.clone());
            }
            Ok(series)
        };

        let mut overlays: Vec<PlotLine> = Vec::with_capacity(overlay_windows.len());
        for &window in overlay_windows {
            let kind = IndicatorKind::MovingAverage(window);
            if overlays.iter().any(|l| l.name == kind.name()) {
                continue;
            }
            let color = OVERLAY_COLORS[overlays.len() % OVERLAY_COLORS.len()];
            overlays.push(PlotLine::solid(take(kind)?, color));
        }

        let mut panels = vec![PlotLine::solid(take(IndicatorKind::Rsi(rsi_window))?, RSI_COLOR)];
        if self.rsi_sma {
            panels.push(PlotLine::solid(take(IndicatorKind::RsiSma(rsi_window))?, RSI_SMA_COLOR));
        }
        panels.push(PlotLine::guide(GUIDE_OVERBOUGHT, RSI_OVERBOUGHT, "red", bars.len()));
        panels.push(PlotLine::guide(GUIDE_OVERSOLD, RSI_OVERSOLD, "green", bars.len()));

        Ok(PlotBundle {
            bars,
            overlays,
            panels,
            notices,
        })
    }

    fn resolve(&self, bars: &BarSeries, indicators: &IndicatorSet, kind: IndicatorKind) -> Result<IndicatorSeries> {
        match indicators.get_kind(kind) {
            Some(series) if series.len() == bars.len() => Ok(series.clone()),
            _ => self.engine.compute_one(bars, kind),
        }
    }
}
