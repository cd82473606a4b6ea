//! Numeric helpers for moving values between UI and engine domains.
//!
//! Sliders report `0..=100`; the settings model stores `0..=1`. These helpers
//! do the mapping and nothing else.

use crate::error::{EngineError, Result};

/// Returns `value` if it lies within `[min, max]`, otherwise the nearest bound.
///
/// NaN input maps to `min`.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    debug_assert!(min <= max);
    if value.is_nan() || value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Affine map of `value` from `[src_min, src_max]` to `[dst_min, dst_max]`.
///
/// Values outside the source interval extrapolate; combine with [`clamp`] when
/// the result must stay inside the destination interval.
///
/// Fails with [`EngineError::DivisionByZero`] when the source interval has zero
/// width instead of producing an infinite or NaN value.
pub fn rescale(value: f64, src_min: f64, src_max: f64, dst_min: f64, dst_max: f64) -> Result<f64> {
    let span = src_max - src_min;
    if span == 0.0 || !span.is_finite() {
        return Err(EngineError::DivisionByZero { min: src_min, max: src_max });
    }

    let t = (value - src_min) / span;
    Ok(dst_min + (dst_max - dst_min) * t)
}
