//! Utility functions for working with `NaN`-marked series.
//!
//! Indicator output uses `NaN` as the "absent" marker. These helpers measure
//! warm-up regions and convert absent values at the serialization boundary.

use crate::traits::SeriesElement;

/// Standard epsilon for high-precision floating-point comparisons.
pub const EPSILON: f64 = 1e-10;

/// Looser epsilon for results built from many accumulated operations.
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Approximate equality check for floating-point values.
///
/// Returns `true` if `a` and `b` are within `tolerance` of each other,
/// or if both are NaN (both absent).
///
/// # Example
///
/// ```
/// use stockdash::utils::{approx_eq, EPSILON};
///
/// assert!(approx_eq(1.0, 1.0 + 1e-11, EPSILON));
/// assert!(approx_eq(f64::NAN, f64::NAN, EPSILON));
/// assert!(!approx_eq(f64::NAN, 1.0, EPSILON));
/// ```
#[inline]
#[must_use]
pub fn approx_eq<T: SeriesElement>(a: T, b: T, tolerance: T) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < tolerance
}

/// Count the number of NaN values at the beginning of a slice.
///
/// This is the length of an indicator's warm-up region.
///
/// # Example
///
/// ```
/// use stockdash::utils::count_nan_prefix;
///
/// let data = vec![f64::NAN, f64::NAN, 1.0, 2.0, f64::NAN];
/// assert_eq!(count_nan_prefix(&data), 2);
/// ```
#[inline]
#[must_use]
pub fn count_nan_prefix<T: SeriesElement>(data: &[T]) -> usize {
    data.iter().take_while(|x| x.is_nan()).count()
}

/// Maps the absent marker to `None`.
#[inline]
#[must_use]
pub fn present(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

/// Serializes a `NaN`-marked slice as a sequence of optional numbers.
///
/// Used with `#[serde(serialize_with = ...)]` so absent values reach JSON as
/// `null` rather than depending on the serializer's float policy.
pub(crate) fn serialize_absent_as_none<S>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(values.iter().copied().map(present))
}
