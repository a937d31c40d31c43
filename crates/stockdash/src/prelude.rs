//! Commonly used types for convenient importing.
//!
//! ```
//! use stockdash::prelude::*;
//!
//! let config = PipelineConfig::new().rsi_window(9);
//! assert_eq!(config.indicator_kinds().last(), Some(&IndicatorKind::Rsi(9)));
//! ```

// Error types
pub use crate::error::{Error, Result};

// Traits
pub use crate::traits::SeriesElement;

// Data model
pub use crate::bar::{Bar, BarSeries};
pub use crate::indicator_set::{IndicatorKind, IndicatorSeries, IndicatorSet};
pub use crate::raw::{Cell, RawTable};

// Stages
pub use crate::engine::IndicatorEngine;
pub use crate::normalize::{BarNormalizer, NormalizeReport};
pub use crate::pipeline::{Pipeline, PipelineConfig};
pub use crate::plot::{LineStyle, PlotBundle, PlotLine, PlotSeriesBuilder};
pub use crate::window::HistoryWindow;

// Indicator functions
pub use crate::indicators::{rsi, rsi_sma, sma};
