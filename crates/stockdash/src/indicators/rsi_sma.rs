//! Simple-average RSI (`RSI_SMA`).
//!
//! Some charting tools compute RSI from a plain rolling mean of the last
//! `period` gains and losses instead of Wilder's recursive smoothing. The two
//! agree on the first value and diverge afterwards, so this variant is kept
//! under its own name and never substituted for [`rsi`](super::rsi::rsi).
//!
//! Anchor, warm-up length and the zero-gain/zero-loss cases are identical to
//! the Wilder RSI.

use crate::error::Result;
use crate::indicators::rsi::{rsi_min_len, rsi_value, split_change};
use crate::traits::{validate_period, SeriesElement};

/// Computes RSI from rolling simple means of gains and losses.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
///
/// # Example
///
/// ```
/// use stockdash::indicators::{rsi::rsi, rsi_sma::rsi_sma};
///
/// let data: Vec<f64> = vec![44.0, 44.25, 44.5, 43.75, 44.5, 44.0, 44.25, 45.0];
/// let naive = rsi_sma(&data, 3).unwrap();
/// let wilder = rsi(&data, 3).unwrap();
///
/// // identical seed, different smoothing afterwards
/// assert!((naive[3] - wilder[3]).abs() < 1e-10);
/// assert!((naive[7] - wilder[7]).abs() > 1e-6);
/// ```
pub fn rsi_sma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    validate_period(period)?;

    let mut result = vec![T::nan(); data.len()];
    if data.len() < rsi_min_len(period) {
        return Ok(result);
    }

    let period_t = T::from_usize(period)?;
    let moves: Vec<(T, T)> = data
        .windows(2)
        .map(|w| split_change(w[1] - w[0]))
        .collect();

    // Each window is summed from scratch: gains and losses are non-negative,
    // so a sum is zero exactly when every term is zero.
    for i in period..data.len() {
        let (gain_sum, loss_sum) = moves[i - period..i]
            .iter()
            .fold((T::zero(), T::zero()), |(g, l), &(gain, loss)| (g + gain, l + loss));
        result[i] = rsi_value(gain_sum / period_t, loss_sum / period_t);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::indicators::rsi::rsi;
    use crate::utils::{approx_eq, count_nan_prefix, EPSILON};

    #[test]
    fn test_rsi_sma_direct_window_mean() {
        let data = vec![10.0_f64, 11.0, 10.5, 11.5, 11.0, 12.0];
        let result = rsi_sma(&data, 3).unwrap();

        // index 4 covers changes -0.5, +1.0, -0.5
        let gain = 1.0 / 3.0;
        let loss = 1.0 / 3.0;
        assert!(approx_eq(result[4], 100.0 - 100.0 / (1.0 + gain / loss), EPSILON));

        // index 5 covers changes +1.0, -0.5, +1.0
        let expected = 100.0 - 100.0 / (1.0 + 2.0 / 0.5);
        assert!(approx_eq(result[5], expected, EPSILON));
    }

    #[test]
    fn test_rsi_sma_seed_matches_wilder() {
        let data = vec![44.0_f64, 44.25, 44.5, 43.75, 44.5, 44.0, 44.25, 45.0, 47.5];
        let naive = rsi_sma(&data, 4).unwrap();
        let wilder = rsi(&data, 4).unwrap();
        assert!(approx_eq(naive[4], wilder[4], EPSILON));
    }

    #[test]
    fn test_rsi_sma_losses_roll_out_exactly() {
        // losses leave the window; the rolling sum must read as zero, not a residue
        let data = vec![10.0_f64, 9.9, 9.7, 9.8, 10.1, 10.4, 10.8];
        let result = rsi_sma(&data, 3).unwrap();
        assert_eq!(result[6], 100.0);
    }

    #[test]
    fn test_rsi_sma_mixed_scale_closes_stay_bounded() {
        let data = vec![
            1.9_f64, 1.96e12, 1.35e6, 1.27e6, 1.78e12, 1.96e12, 1.25e-6, 2.0e-6, 1.58e-6, 1.0e6,
        ];
        for period in 1..=4 {
            let result = rsi_sma(&data, period).unwrap();
            for (i, &v) in result.iter().enumerate().skip(period) {
                assert!((0.0..=100.0).contains(&v), "period {period} index {i}: {v}");
            }
        }

        // a one-change window is all gain or all loss
        let single = rsi_sma(&data, 1).unwrap();
        assert_eq!(single[3], 0.0);
        assert_eq!(single[4], 100.0);
        assert_eq!(single[8], 0.0);
    }

    #[test]
    fn test_rsi_sma_flat_is_absent() {
        let result = rsi_sma(&[5.0_f64; 10], 3).unwrap();
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_rsi_sma_warmup_and_shortfall() {
        let data: Vec<f64> = (0..20).map(|i| 100.0 - f64::from(i)).collect();
        let result = rsi_sma(&data, 14).unwrap();
        assert_eq!(count_nan_prefix(&result), 14);
        assert!(result[14..].iter().all(|&v| v == 0.0));

        let short = rsi_sma(&data[..14], 14).unwrap();
        assert!(short.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_rsi_sma_zero_period() {
        assert!(matches!(
            rsi_sma(&[1.0_f64, 2.0], 0),
            Err(Error::InvalidPeriod { period: 0, .. })
        ));
    }
}
