use std::time::{Duration, Instant};

use crate::units::{clamp, rescale};

use super::model::{ClockSettings, Hand, MotionMode};

/// Range reported by the settings sliders.
pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 100.0;

/// Minimum spacing between two writes produced by dragging a slider.
pub const SLIDER_THROTTLE: Duration = Duration::from_millis(100);

/// Hand property a slider is bound to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HandProperty {
    Size,
    Thickness,
}

/// Binds a `0..=100` slider to one hand property.
///
/// Drag updates are throttled: the first value of a burst is written
/// immediately, later values inside the window are held back and the most
/// recent one is written by [`flush`](Self::flush) once the window has passed.
/// Releasing the slider always commits.
#[derive(Debug, Clone)]
pub struct SliderBinding {
    hand: Hand,
    property: HandProperty,
    window: Duration,
    last_write: Option<Instant>,
    pending: Option<f64>,
}

impl SliderBinding {
    pub fn new(hand: Hand, property: HandProperty) -> Self {
        Self::with_window(hand, property, SLIDER_THROTTLE)
    }

    pub fn with_window(hand: Hand, property: HandProperty, window: Duration) -> Self {
        Self {
            hand,
            property,
            window,
            last_write: None,
            pending: None,
        }
    }

    /// Slider position that corresponds to the current setting.
    pub fn position(&self, settings: &ClockSettings) -> f64 {
        let cfg = settings.hand(self.hand);
        let value = match self.property {
            HandProperty::Size => cfg.size,
            HandProperty::Thickness => cfg.thickness,
        };
        // Source interval is the constant [0, 1].
        clamp(value * (SLIDER_MAX - SLIDER_MIN) + SLIDER_MIN, SLIDER_MIN, SLIDER_MAX)
    }

    /// Handles a drag update. Returns `true` if the settings were written.
    pub fn on_slide(&mut self, settings: &mut ClockSettings, value: f64, now: Instant) -> bool {
        if self.window_open(now) {
            self.pending = Some(value);
            return false;
        }

        self.pending = None;
        self.write(settings, value, now);
        true
    }

    /// Writes a held-back drag value once the throttle window has elapsed.
    pub fn flush(&mut self, settings: &mut ClockSettings, now: Instant) -> bool {
        if self.window_open(now) {
            return false;
        }
        match self.pending.take() {
            Some(value) => {
                self.write(settings, value, now);
                true
            }
            None => false,
        }
    }

    /// Commits the final value when the slider is released.
    pub fn on_release(&mut self, settings: &mut ClockSettings, value: f64, now: Instant) {
        self.pending = None;
        self.write(settings, value, now);
    }

    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn window_open(&self, now: Instant) -> bool {
        self.last_write
            .is_some_and(|at| now.saturating_duration_since(at) < self.window)
    }

    fn write(&mut self, settings: &mut ClockSettings, value: f64, now: Instant) {
        let fraction = slider_to_fraction(value);
        match self.property {
            HandProperty::Size => settings.set_hand_size(self.hand, fraction),
            HandProperty::Thickness => settings.set_hand_thickness(self.hand, fraction),
        }
        self.last_write = Some(now);
        log::trace!("{:?} {:?} <- {fraction:.3}", self.hand, self.property);
    }
}

/// Maps a raw slider value to a `[0, 1]` fraction.
pub fn slider_to_fraction(value: f64) -> f64 {
    let v = clamp(value, SLIDER_MIN, SLIDER_MAX);
    // The slider interval is a non-empty constant, so this cannot fail.
    rescale(v, SLIDER_MIN, SLIDER_MAX, 0.0, 1.0).unwrap_or(0.0)
}

/// "Continuous move" toggle: on selects continuous motion, off selects steppy.
pub fn set_continuous(settings: &mut ClockSettings, on: bool) {
    settings.set_mode(if on { MotionMode::Continuous } else { MotionMode::Steppy });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration { Duration::from_millis(n) }

    #[test]
    fn slider_value_is_clamped_then_rescaled() {
        assert_eq!(slider_to_fraction(50.0), 0.5);
        assert_eq!(slider_to_fraction(-20.0), 0.0);
        assert_eq!(slider_to_fraction(250.0), 1.0);
    }

    #[test]
    fn first_drag_writes_immediately() {
        let mut s = ClockSettings::default();
        let mut b = SliderBinding::new(Hand::Hours, HandProperty::Size);
        let t0 = Instant::now();

        assert!(b.on_slide(&mut s, 30.0, t0));
        assert_eq!(s.hand(Hand::Hours).size, 0.3);
    }

    #[test]
    fn drags_inside_window_are_held_back() {
        let mut s = ClockSettings::default();
        let mut b = SliderBinding::new(Hand::Minutes, HandProperty::Thickness);
        let t0 = Instant::now();

        b.on_slide(&mut s, 10.0, t0);
        assert!(!b.on_slide(&mut s, 20.0, t0 + ms(30)));
        assert!(!b.on_slide(&mut s, 40.0, t0 + ms(60)));
        assert_eq!(s.hand(Hand::Minutes).thickness, 0.1);
        assert!(b.has_pending());

        // Too early.
        assert!(!b.flush(&mut s, t0 + ms(90)));
        // Trailing edge writes the latest value.
        assert!(b.flush(&mut s, t0 + ms(100)));
        assert_eq!(s.hand(Hand::Minutes).thickness, 0.4);
        assert!(!b.has_pending());
    }

    #[test]
    fn release_commits_and_clears_pending() {
        let mut s = ClockSettings::default();
        let mut b = SliderBinding::new(Hand::Seconds, HandProperty::Size);
        let t0 = Instant::now();

        b.on_slide(&mut s, 10.0, t0);
        b.on_slide(&mut s, 20.0, t0 + ms(10));
        b.on_release(&mut s, 75.0, t0 + ms(20));

        assert_eq!(s.hand(Hand::Seconds).size, 0.75);
        assert!(!b.flush(&mut s, t0 + ms(500)));
    }

    #[test]
    fn position_reflects_setting() {
        let mut s = ClockSettings::default();
        s.set_hand_size(Hand::Hours, 0.25);
        let b = SliderBinding::new(Hand::Hours, HandProperty::Size);
        assert_eq!(b.position(&s), 25.0);
    }

    #[test]
    fn continuous_toggle() {
        let mut s = ClockSettings::default();
        set_continuous(&mut s, false);
        assert_eq!(s.mode(), MotionMode::Steppy);
        set_continuous(&mut s, true);
        assert_eq!(s.mode(), MotionMode::Continuous);
    }
}
