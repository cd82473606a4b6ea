//! Hand angles.
//!
//! Angles are in degrees, measured clockwise from 12 o'clock, and always in
//! `[0, 360)`. All three are derived from the same elapsed-seconds value so
//! the hands can never drift relative to each other.

use crate::settings::{HourFormat, MotionMode};
use crate::time::Sample;

pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Reduces `degrees` into `[0, 360)`.
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let a = degrees.rem_euclid(360.0);
    // rem_euclid may round up to the modulus for tiny negative inputs.
    if a >= 360.0 { 0.0 } else { a }
}

#[inline]
pub fn seconds_angle(elapsed_seconds: f64) -> f64 {
    normalize_degrees(elapsed_seconds.rem_euclid(60.0) * 6.0)
}

#[inline]
pub fn minutes_angle(elapsed_seconds: f64) -> f64 {
    normalize_degrees((elapsed_seconds / SECONDS_PER_MINUTE).rem_euclid(60.0) * 6.0)
}

#[inline]
pub fn hours_angle(elapsed_seconds: f64, hours_per_day: u32) -> f64 {
    let n = f64::from(hours_per_day.max(1));
    normalize_degrees((elapsed_seconds / SECONDS_PER_HOUR).rem_euclid(n) * 360.0 / n)
}

/// The three hand angles at one instant.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ClockState {
    pub seconds: f64,
    pub minutes: f64,
    pub hours: f64,
}

impl ClockState {
    /// Computes hand angles from continuous elapsed seconds.
    ///
    /// In steppy mode only the seconds hand is floored to a whole second;
    /// minutes and hours keep sweeping.
    pub fn from_elapsed(elapsed_seconds: f64, mode: MotionMode, format: HourFormat) -> Self {
        let seconds_input = if mode.is_continuous() {
            elapsed_seconds
        } else {
            elapsed_seconds.trunc()
        };

        Self {
            seconds: seconds_angle(seconds_input),
            minutes: minutes_angle(elapsed_seconds),
            hours: hours_angle(elapsed_seconds, format.hours_per_day()),
        }
    }

    /// Computes hand angles for a sampled instant.
    pub fn compute(sample: &Sample, mode: MotionMode, format: HourFormat) -> Self {
        Self::from_elapsed(sample.elapsed_seconds(true), mode, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

    // ── ranges / periodicity ──────────────────────────────────────────────

    #[test]
    fn seconds_angle_is_periodic_and_in_range() {
        let samples = [0.0, 0.25, 1.0, 29.999, 59.999, 61.5, 3599.9, 86_399.99];
        for s in samples {
            let a = seconds_angle(s);
            assert!((0.0..360.0).contains(&a), "{s} -> {a}");
            for k in [1.0, 7.0, 1440.0] {
                // Large offsets cost a few ulps of the fraction.
                assert!((a - seconds_angle(s + 60.0 * k)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn negative_input_never_yields_negative_angle() {
        assert!(close(seconds_angle(-1.0), 354.0));
        assert!(minutes_angle(-30.0) >= 0.0);
        assert!(hours_angle(-1.0, 12) >= 0.0);
        assert!(normalize_degrees(-1e-18) < 360.0);
    }

    // ── hour format ───────────────────────────────────────────────────────

    #[test]
    fn one_hour_in_each_format() {
        assert!(close(hours_angle(3600.0, 12), 30.0));
        assert!(close(hours_angle(3600.0, 24), 15.0));
    }

    #[test]
    fn hour_hand_wraps_at_end_of_cycle() {
        let just_before = hours_angle(43_199.999, 12);
        assert!(just_before > 359.9 && just_before < 360.0);
        assert_eq!(hours_angle(43_200.0, 12), 0.0);

        let day_end = hours_angle(86_399.999, 24);
        assert!(day_end > 359.9 && day_end < 360.0);
        assert_eq!(hours_angle(86_400.0, 24), 0.0);
    }

    // ── motion modes ──────────────────────────────────────────────────────

    #[test]
    fn modes_differ_only_in_seconds() {
        for s in [0.4, 12.75, 3661.5, 45_000.123] {
            let c = ClockState::from_elapsed(s, MotionMode::Continuous, HourFormat::H12);
            let st = ClockState::from_elapsed(s, MotionMode::Steppy, HourFormat::H12);
            assert_eq!(c.minutes, st.minutes);
            assert_eq!(c.hours, st.hours);
            assert!(close(st.seconds, seconds_angle(s.floor())));
            assert!(st.seconds <= c.seconds);
        }
    }

    #[test]
    fn end_to_end_twelve_hour_continuous() {
        let st = ClockState::from_elapsed(3661.5, MotionMode::Continuous, HourFormat::H12);
        assert!(close(st.seconds, 9.0));
        // 61.025 min -> 1.025 min past the hour
        assert!(close(st.minutes, 6.15));
        // 1.017083 h * 30 deg
        assert!(close(st.hours, 30.5125));
    }
}
