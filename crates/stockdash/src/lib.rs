//! stockdash: market-data normalization and chart-ready technical indicators
//!
//! This crate turns a raw table of daily price bars, as retrieved from a
//! market-data provider, into the series a stock chart needs: cleaned OHLCV
//! bars, moving-average overlays and a Relative Strength Index panel with its
//! 30/70 guide lines.
//!
//! # Pipeline
//!
//! ```text
//! RawTable -> BarNormalizer -> BarSeries -> IndicatorEngine -> IndicatorSet -> PlotSeriesBuilder -> PlotBundle
//! ```
//!
//! - [`normalize`]: column matching, numeric coercion, timestamp parsing,
//!   de-duplication and ordering
//! - [`engine`]: moving averages, Wilder RSI and the simple-average RSI variant
//! - [`plot`]: overlay lines, panel lines and insufficient-history notices
//! - [`pipeline`]: all of the above behind one configurable call
//!
//! # Quick Start
//!
//! ```
//! use stockdash::prelude::*;
//!
//! let index: Vec<String> = (1..=30).map(|d| format!("2024-04-{d:02}")).collect();
//! let closes: Vec<f64> = (1..=30).map(|d| 100.0 + f64::from(d % 7)).collect();
//!
//! let raw = RawTable::new(index)
//!     .with_column("Open", closes.clone()).unwrap()
//!     .with_column("High", closes.iter().map(|c| c + 1.0).collect::<Vec<_>>()).unwrap()
//!     .with_column("Low", closes.iter().map(|c| c - 1.0).collect::<Vec<_>>()).unwrap()
//!     .with_column("Close", closes).unwrap();
//!
//! let bundle = Pipeline::new(PipelineConfig::new().overlay_windows(vec![5, 20])).run(&raw).unwrap();
//!
//! let rsi = bundle.panel("RSI14").unwrap();
//! assert!(rsi.values()[..14].iter().all(|v| v.is_nan()));
//! assert!(rsi.values()[14..].iter().all(|&v| (0.0..=100.0).contains(&v)));
//! ```
//!
//! # Absent values
//!
//! Indicator series always have one value per bar. Positions inside an
//! indicator's warm-up region hold `NaN`; serialized output turns them into
//! `null`. A series too short for a window is all absent and carries
//! [`Error::InsufficientHistory`] as a status rather than failing.

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]

pub mod bar;
pub mod engine;
pub mod error;
pub mod indicator_set;
pub mod indicators;
pub mod normalize;
pub mod pipeline;
pub mod plot;
pub mod prelude;
pub mod raw;
pub mod traits;
pub mod utils;
pub mod window;

pub use error::{Error, Result};
