//! One-call orchestration: raw table in, plot bundle out.
//!
//! ```text
//! RawTable -> BarNormalizer -> [HistoryWindow] -> IndicatorEngine -> PlotSeriesBuilder -> PlotBundle
//! ```
//!
//! Normalization and configuration errors abort the run. Indicator shortfalls
//! do not: they are logged at `warn` and carried on the bundle as notices.

use serde::{Deserialize, Serialize};

use crate::engine::IndicatorEngine;
use crate::error::Result;
use crate::indicator_set::IndicatorKind;
use crate::normalize::BarNormalizer;
use crate::plot::{PlotBundle, PlotSeriesBuilder};
use crate::raw::RawTable;
use crate::traits::validate_period;
use crate::window::HistoryWindow;

/// Which indicators to draw and over how much history.
///
/// Deserializes from JSON with every field optional:
///
/// ```
/// use stockdash::pipeline::PipelineConfig;
/// use stockdash::window::HistoryWindow;
///
/// let config: PipelineConfig =
///     serde_json::from_str(r#"{ "overlay_windows": [50, 200], "history_window": "1y" }"#).unwrap();
///
/// assert_eq!(config.get_overlay_windows(), &[50, 200]);
/// assert_eq!(config.get_rsi_window(), 14);
/// assert_eq!(config.get_history_window(), Some(HistoryWindow::OneYear));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    overlay_windows: Vec<usize>,
    rsi_window: usize,
    history_window: Option<HistoryWindow>,
    naive_rsi: bool,
}

impl Default for PipelineConfig {
    /// Overlays 20 and 50, RSI 14, full history, Wilder RSI only.
    fn default() -> Self {
        Self {
            overlay_windows: vec![20, 50],
            rsi_window: 14,
            history_window: None,
            naive_rsi: false,
        }
    }
}

impl PipelineConfig {
    /// Creates a configuration with the default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the moving-average overlay windows.
    ///
    /// Default: `[20, 50]`
    #[must_use]
    pub fn overlay_windows(mut self, windows: impl Into<Vec<usize>>) -> Self {
        self.overlay_windows = windows.into();
        self
    }

    /// Sets the RSI window.
    ///
    /// Default: 14
    #[must_use]
    pub const fn rsi_window(mut self, window: usize) -> Self {
        self.rsi_window = window;
        self
    }

    /// Restricts the run to a trailing history window.
    ///
    /// Default: `None` (all bars)
    #[must_use]
    pub const fn history_window(mut self, window: Option<HistoryWindow>) -> Self {
        self.history_window = window;
        self
    }

    /// Adds the simple-average RSI line next to the Wilder RSI.
    ///
    /// Default: false
    #[must_use]
    pub const fn naive_rsi(mut self, enabled: bool) -> Self {
        self.naive_rsi = enabled;
        self
    }

    /// Returns the overlay windows.
    #[must_use]
    pub fn get_overlay_windows(&self) -> &[usize] {
        &self.overlay_windows
    }

    /// Returns the RSI window.
    #[must_use]
    pub const fn get_rsi_window(&self) -> usize {
        self.rsi_window
    }

    /// Returns the history window.
    #[must_use]
    pub const fn get_history_window(&self) -> Option<HistoryWindow> {
        self.history_window
    }

    /// Returns whether the simple-average RSI is drawn.
    #[must_use]
    pub const fn get_naive_rsi(&self) -> bool {
        self.naive_rsi
    }

    /// The indicators a run computes, in drawing order.
    #[must_use]
    pub fn indicator_kinds(&self) -> Vec<IndicatorKind> {
        let mut kinds: Vec<IndicatorKind> = self
            .overlay_windows
            .iter()
            .map(|&w| IndicatorKind::MovingAverage(w))
            .collect();
        kinds.push(IndicatorKind::Rsi(self.rsi_window));
        if self.naive_rsi {
            kinds.push(IndicatorKind::RsiSma(self.rsi_window));
        }
        kinds
    }

    /// Checks every window before any work is done.
    ///
    /// An empty overlay list is valid.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPeriod` if any window is zero.
    pub fn validate(&self) -> Result<()> {
        for &window in &self.overlay_windows {
            validate_period(window)?;
        }
        validate_period(self.rsi_window)
    }
}

/// Runs normalization, indicator computation and bundle assembly.
///
/// # Example
///
/// ```
/// use stockdash::pipeline::{Pipeline, PipelineConfig};
/// use stockdash::raw::RawTable;
///
/// let index = vec!["2024-01-02".to_string(), "2024-01-03".to_string(), "2024-01-04".to_string()];
/// let raw = RawTable::new(index)
///     .with_column("Open", vec![10.0, 10.5, 11.0]).unwrap()
///     .with_column("High", vec![10.8, 11.2, 11.6]).unwrap()
///     .with_column("Low", vec![9.8, 10.2, 10.9]).unwrap()
///     .with_column("Close", vec![10.5, 11.0, 11.5]).unwrap();
///
/// let bundle = Pipeline::new(PipelineConfig::new().overlay_windows(vec![2])).run(&raw).unwrap();
///
/// assert_eq!(bundle.bars().len(), 3);
/// assert_eq!(bundle.overlay("MA2").unwrap().values()[2], 11.25);
/// assert_eq!(bundle.notices().len(), 1); // not enough bars for RSI14
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
    normalizer: BarNormalizer,
    engine: IndicatorEngine,
}

impl Pipeline {
    /// Creates a pipeline for the given configuration.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            normalizer: BarNormalizer::new(),
            engine: IndicatorEngine::new(),
        }
    }

    /// The configuration this pipeline runs with.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs every stage on a raw table.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidPeriod` if the configuration has a zero window
    /// - `Error::EmptyInput` if no usable rows survive normalization
    /// - `Error::MissingColumn` if a required price column is absent
    pub fn run(&self, raw: &RawTable) -> Result<PlotBundle> {
        let span = tracing::info_span!("pipeline", rows = raw.row_count());
        let _enter = span.enter();

        self.config.validate()?;

        let mut bars = self.normalizer.normalize(raw)?;
        if let Some(window) = self.config.history_window {
            bars = window.trim(&bars);
            tracing::debug!(window = %window, bars = bars.len(), "applied history window");
        }

        let indicators = self.engine.compute(&bars, &self.config.indicator_kinds())?;
        let bundle = PlotSeriesBuilder::new()
            .rsi_sma(self.config.naive_rsi)
            .build(bars, &indicators, &self.config.overlay_windows, self.config.rsi_window)?;

        for notice in bundle.notices() {
            tracing::warn!("{notice}");
        }
        tracing::info!(
            bars = bundle.bars().len(),
            lines = bundle.lines().count(),
            "pipeline finished"
        );
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn raw_table(days: u32) -> RawTable {
        let index = (1..=days).map(|d| format!("2024-01-{d:02}")).collect();
        let close: Vec<f64> = (1..=days).map(|d| 100.0 + f64::from(d)).collect();
        RawTable::new(index)
            .with_column("Open", close.clone())
            .unwrap()
            .with_column("High", close.iter().map(|c| c + 1.0).collect::<Vec<_>>())
            .unwrap()
            .with_column("Low", close.iter().map(|c| c - 1.0).collect::<Vec<_>>())
            .unwrap()
            .with_column("Close", close)
            .unwrap()
    }

    // ==================== Config Tests ====================

    #[test]
    fn test_config_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.get_overlay_windows(), &[20, 50]);
        assert_eq!(config.get_rsi_window(), 14);
        assert_eq!(config.get_history_window(), None);
        assert!(!config.get_naive_rsi());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_fluent() {
        let config = PipelineConfig::new()
            .overlay_windows(vec![5])
            .rsi_window(9)
            .history_window(Some(HistoryWindow::SixMonths))
            .naive_rsi(true);
        assert_eq!(
            config.indicator_kinds(),
            vec![
                IndicatorKind::MovingAverage(5),
                IndicatorKind::Rsi(9),
                IndicatorKind::RsiSma(9),
            ]
        );
    }

    #[test]
    fn test_config_validate() {
        assert!(PipelineConfig::new().overlay_windows(Vec::new()).validate().is_ok());
        assert!(matches!(
            PipelineConfig::new().overlay_windows(vec![20, 0]).validate(),
            Err(Error::InvalidPeriod { period: 0, .. })
        ));
        assert!(PipelineConfig::new().rsi_window(0).validate().is_err());
    }

    #[test]
    fn test_config_json() {
        let config: PipelineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());

        let config: PipelineConfig =
            serde_json::from_str(r#"{"rsi_window": 7, "naive_rsi": true, "history_window": "3mo"}"#)
                .unwrap();
        assert_eq!(config.get_rsi_window(), 7);
        assert!(config.get_naive_rsi());
        assert_eq!(config.get_history_window(), Some(HistoryWindow::ThreeMonths));

        assert!(serde_json::from_str::<PipelineConfig>(r#"{"rsi": 7}"#).is_err());
        assert!(serde_json::from_str::<PipelineConfig>(r#"{"history_window": "2w"}"#).is_err());
    }

    // ==================== Run Tests ====================

    #[test]
    fn test_run_default_config() {
        let bundle = Pipeline::default().run(&raw_table(31)).unwrap();
        assert_eq!(bundle.bars().len(), 31);
        assert_eq!(bundle.overlays().len(), 2);
        // MA50 cannot be computed from 31 bars
        assert_eq!(bundle.notices().len(), 1);
        assert_eq!(bundle.panel("RSI14").unwrap().values()[30], 100.0);
    }

    #[test]
    fn test_run_applies_history_window() {
        let pipeline = Pipeline::new(
            PipelineConfig::new()
                .overlay_windows(vec![3])
                .history_window(Some(HistoryWindow::FiveDays)),
        );
        let bundle = pipeline.run(&raw_table(20)).unwrap();
        assert_eq!(bundle.bars().len(), 5);
        assert_eq!(bundle.bars().first().close, 116.0);
        // indicators start over inside the window
        assert_eq!(bundle.overlay("MA3").unwrap().values()[2], 117.0);
        assert!(bundle.overlay("MA3").unwrap().values()[1].is_nan());
    }

    #[test]
    fn test_run_rejects_bad_config_first() {
        let pipeline = Pipeline::new(PipelineConfig::new().rsi_window(0));
        assert!(matches!(
            pipeline.run(&RawTable::default()),
            Err(Error::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_run_propagates_normalization_errors() {
        assert_eq!(Pipeline::default().run(&RawTable::default()).unwrap_err(), Error::EmptyInput);

        let raw = RawTable::new(vec!["2024-01-01".to_string()])
            .with_column("Close", vec![1.0])
            .unwrap();
        assert!(matches!(
            Pipeline::default().run(&raw),
            Err(Error::MissingColumn { column: "open" })
        ));
    }
}
