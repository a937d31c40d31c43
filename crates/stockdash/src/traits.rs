//! Numeric traits shared by the indicator kernels.
//!
//! The kernels in [`indicators`](crate::indicators) are generic over
//! [`SeriesElement`] so they can be exercised with `f32` in isolation; the
//! pipeline itself always runs them with `f64`.

use num_traits::{Float, NumCast};

use crate::error::{Error, Result};

/// A trait for types that can be used as elements in a price series.
///
/// Blanket-implemented for every `Float + NumCast` type, i.e. `f32` and `f64`.
///
/// # Example
///
/// ```
/// use stockdash::traits::SeriesElement;
///
/// fn mean<T: SeriesElement>(data: &[T]) -> stockdash::Result<T> {
///     let n = T::from_usize(data.len())?;
///     Ok(data.iter().fold(T::zero(), |acc, &x| acc + x) / n)
/// }
///
/// assert!((mean(&[1.0_f64, 2.0, 3.0]).unwrap() - 2.0).abs() < 1e-12);
/// ```
pub trait SeriesElement: Float + NumCast + Copy + Default + Send + Sync + 'static {
    /// Creates a series element from a `usize` value.
    ///
    /// Used to turn window lengths into divisors.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_usize(value: usize) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "usize to series element",
        })
    }

    /// Returns the constant 100 as this type.
    #[inline]
    #[must_use]
    fn hundred() -> Self {
        // 100 is exactly representable in every Float type
        <Self as NumCast>::from(100).unwrap_or_else(Self::nan)
    }
}

impl<T: Float + NumCast + Copy + Default + Send + Sync + 'static> SeriesElement for T {}

/// Validates that a window length is usable.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if the period is zero.
#[inline]
pub const fn validate_period(period: usize) -> Result<()> {
    if period == 0 {
        Err(Error::InvalidPeriod {
            period,
            reason: "period must be at least 1",
        })
    } else {
        Ok(())
    }
}
