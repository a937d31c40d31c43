//! Indicator kernels over plain price slices.
//!
//! All kernels share the same shape:
//!
//! - generic over `f32` and `f64` via [`SeriesElement`](crate::traits::SeriesElement)
//! - O(n), output length equal to input length
//! - absent values are `NaN`, and only ever form a warm-up prefix
//! - a zero period is `Error::InvalidPeriod`; input that is too short is *not*
//!   an error at this level, it simply yields an all-absent output
//!
//! The [`IndicatorEngine`](crate::engine::IndicatorEngine) wraps these kernels
//! for [`BarSeries`](crate::bar::BarSeries) input and attaches the
//! insufficient-history status.
//!
//! # Indicators
//!
//! - [`sma`] - Simple Moving Average
//! - [`rsi`] - Relative Strength Index with Wilder smoothing
//! - [`rsi_sma`] - RSI from simple rolling means (the naive variant)

pub mod rsi;
pub mod rsi_sma;
pub mod sma;

pub use rsi::{rsi, rsi_lookback, rsi_min_len, rsi_value, wilder_averages, WilderAverages, WilderSmoother};
pub use rsi_sma::rsi_sma;
pub use sma::{sma, sma_lookback, sma_min_len};
