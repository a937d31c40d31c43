//! Shared test utilities for stockdash tests.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use stockdash::bar::{Bar, BarSeries};
use stockdash::raw::RawTable;

/// Standard epsilon for high-precision comparisons.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-10;

/// The 15-close RSI reference series; RSI14 at the last position is 53.1914...
#[allow(dead_code)]
pub const GOLDEN_CLOSES: [f64; 15] = [
    44.0, 44.25, 44.5, 43.75, 44.5, 44.0, 44.25, 45.0, 47.5, 47.0, 44.5, 46.0, 45.5, 45.0, 44.75,
];

/// Expected RSI14 at index 14 of [`GOLDEN_CLOSES`].
#[allow(dead_code)]
pub const GOLDEN_RSI14: f64 = 53.191_489_361_702_125;

/// Approximate equality check; two NaN values compare equal.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < eps
}

/// Midnight on the given day.
#[allow(dead_code)]
pub fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Daily bars from 2024-01-01 with the given closes and a 1.0 high/low spread.
#[allow(dead_code)]
pub fn series_from_closes(closes: &[f64]) -> BarSeries {
    let start = day(2024, 1, 1);
    let bars = closes
        .iter()
        .zip(0_i64..)
        .map(|(&close, offset)| Bar {
            timestamp: start + Duration::days(offset),
            open: close,
            high: close + 1.0,
            low: (close - 1.0).max(close / 2.0),
            close,
            volume: 1_000,
        })
        .collect();
    BarSeries::try_from_bars(bars).unwrap()
}

/// A raw table with one `YYYY-MM-DD` row per close, starting 2024-01-01.
#[allow(dead_code)]
pub fn raw_from_closes(closes: &[f64]) -> RawTable {
    let start = day(2024, 1, 1);
    let index = (0..closes.len() as i64)
        .map(|offset| (start + Duration::days(offset)).format("%Y-%m-%d").to_string())
        .collect();
    RawTable::new(index)
        .with_column("Open", closes.to_vec())
        .unwrap()
        .with_column("High", closes.iter().map(|c| c + 1.0).collect::<Vec<_>>())
        .unwrap()
        .with_column("Low", closes.iter().map(|c| c * 0.99).collect::<Vec<_>>())
        .unwrap()
        .with_column("Close", closes.to_vec())
        .unwrap()
        .with_column("Volume", vec![1_000.0; closes.len()])
        .unwrap()
}
