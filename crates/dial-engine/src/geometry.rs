//! Hand geometry in logical pixels.
//!
//! Settings hold hand size and thickness as fractions. They become pixels
//! here, relative to the face size of the current [`Viewport`]:
//! - length = `face_size * 0.5 * size`
//! - width  = `face_size * 0.01 * thickness`
//!
//! Negative, NaN and infinite fractions are treated as `0`; there is no upper
//! bound, a hand longer than the face radius is drawn as such.

use crate::angles::ClockState;
use crate::coords::{Vec2, Viewport};
use crate::settings::{ClockSettings, Hand};

/// Hand length unit as a share of the face size (the face radius).
pub const HAND_LENGTH_UNIT: f32 = 0.5;
/// Hand width unit as a share of the face size.
pub const HAND_WIDTH_UNIT: f32 = 0.01;
/// Pivot cap diameter as a share of the face size.
pub const PIVOT_FRACTION: f32 = 0.05;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandGeometry {
    pub hand: Hand,
    pub length: f32,
    pub width: f32,
    pub visible: bool,
}

impl HandGeometry {
    /// Position of the hand tip when rotated to `angle` degrees around `center`.
    #[inline]
    pub fn tip(&self, center: Vec2, angle: f64) -> Vec2 {
        center + Vec2::from_clock_angle(angle) * self.length
    }
}

/// Geometry of all hands for one viewport and settings snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandsLayout {
    pub face_size: f32,
    pub center: Vec2,
    pub pivot_diameter: f32,
    pub hours: HandGeometry,
    pub minutes: HandGeometry,
    pub seconds: HandGeometry,
}

impl HandsLayout {
    pub fn compute(settings: &ClockSettings, viewport: Viewport) -> Self {
        let face_size = viewport.face_size();
        let geometry = |hand: Hand| {
            let cfg = settings.hand(hand);
            HandGeometry {
                hand,
                length: face_size * HAND_LENGTH_UNIT * fraction(cfg.size),
                width: face_size * HAND_WIDTH_UNIT * fraction(cfg.thickness),
                visible: settings.is_hand_shown(hand),
            }
        };

        Self {
            face_size,
            center: viewport.center(),
            pivot_diameter: face_size * PIVOT_FRACTION,
            hours: geometry(Hand::Hours),
            minutes: geometry(Hand::Minutes),
            seconds: geometry(Hand::Seconds),
        }
    }

    pub fn hand(&self, hand: Hand) -> &HandGeometry {
        match hand {
            Hand::Hours => &self.hours,
            Hand::Minutes => &self.minutes,
            Hand::Seconds => &self.seconds,
        }
    }

    /// Tip position of `hand` for the given angles.
    pub fn tip(&self, hand: Hand, state: &ClockState) -> Vec2 {
        let angle = match hand {
            Hand::Hours => state.hours,
            Hand::Minutes => state.minutes,
            Hand::Seconds => state.seconds,
        };
        self.hand(hand).tip(self.center, angle)
    }
}

#[inline]
fn fraction(v: f64) -> f32 {
    if v.is_finite() && v > 0.0 { v as f32 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool { (a - b).abs() < 1e-3 }

    fn square(side: f32) -> Viewport { Viewport::new(side, side) }

    #[test]
    fn lengths_and_widths_scale_with_face() {
        let mut s = ClockSettings::default();
        s.set_hand_size(Hand::Minutes, 0.5);
        s.set_hand_thickness(Hand::Minutes, 2.0);

        // face = 200 * 0.85 = 170
        let l = HandsLayout::compute(&s, square(200.0));
        assert!(approx(l.face_size, 170.0));
        assert!(approx(l.minutes.length, 170.0 * 0.5 * 0.5));
        assert!(approx(l.minutes.width, 170.0 * 0.01 * 2.0));
        assert!(approx(l.pivot_diameter, 8.5));
    }

    #[test]
    fn invalid_fractions_collapse_to_zero() {
        let mut s = ClockSettings::default();
        s.set_hand_size(Hand::Hours, -0.5);
        s.set_hand_thickness(Hand::Hours, f64::NAN);
        s.set_hand_size(Hand::Seconds, f64::INFINITY);

        let l = HandsLayout::compute(&s, square(400.0));
        assert_eq!(l.hours.length, 0.0);
        assert_eq!(l.hours.width, 0.0);
        assert_eq!(l.seconds.length, 0.0);
    }

    #[test]
    fn oversized_hand_is_not_capped() {
        let mut s = ClockSettings::default();
        s.set_hand_size(Hand::Hours, 3.0);
        let l = HandsLayout::compute(&s, square(100.0));
        assert!(l.hours.length > l.face_size);
    }

    #[test]
    fn hidden_seconds_follow_toggle() {
        let mut s = ClockSettings::default();
        s.set_show_seconds(false);
        let l = HandsLayout::compute(&s, square(100.0));
        assert!(!l.seconds.visible);
        assert!(l.minutes.visible);
    }

    #[test]
    fn tip_points_along_angle() {
        let mut s = ClockSettings::default();
        s.set_hand_size(Hand::Minutes, 1.0);
        let l = HandsLayout::compute(&s, Viewport::new(200.0, 200.0));
        let state = ClockState { seconds: 0.0, minutes: 90.0, hours: 0.0 };

        let tip = l.tip(Hand::Minutes, &state);
        assert!(approx(tip.x, 100.0 + 85.0));
        assert!(approx(tip.y, 100.0));
    }

    #[test]
    fn zero_viewport_gives_zero_geometry() {
        let l = HandsLayout::compute(&ClockSettings::default(), Viewport::default());
        assert_eq!(l.face_size, 0.0);
        assert_eq!(l.hours.length, 0.0);
    }
}
