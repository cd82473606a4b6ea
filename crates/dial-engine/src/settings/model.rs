use std::time::Duration;

use crate::error::{EngineError, Result};

/// Normalized geometry and visibility of one clock hand.
///
/// `size` and `thickness` are fractions of a base unit derived from the
/// display size at render time. The model stores whatever it is given; see
/// [`crate::geometry`] for how out-of-domain values are treated.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandConfig {
    pub size: f64,
    pub thickness: f64,
    pub visible: bool,
}

impl HandConfig {
    #[inline]
    pub const fn new(size: f64, thickness: f64, visible: bool) -> Self {
        Self { size, thickness, visible }
    }
}

/// Identifies one of the three hands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Hand {
    Hours,
    Minutes,
    Seconds,
}

impl Hand {
    pub const ALL: [Hand; 3] = [Hand::Hours, Hand::Minutes, Hand::Seconds];
}

/// How the seconds hand moves.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum MotionMode {
    /// Every hand sweeps with sub-second precision.
    #[default]
    Continuous,
    /// The seconds hand jumps once per whole second.
    Steppy,
}

impl MotionMode {
    #[inline]
    pub fn is_continuous(self) -> bool {
        matches!(self, MotionMode::Continuous)
    }

    /// Transition a renderer should apply between two published angles.
    ///
    /// Steppy jumps are eased over 200 ms; continuous updates are applied as-is.
    pub fn transition(self) -> Option<Duration> {
        match self {
            MotionMode::Continuous => None,
            MotionMode::Steppy => Some(Duration::from_millis(200)),
        }
    }
}

/// Number of hours the hour hand takes for one revolution.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum HourFormat {
    #[default]
    H12,
    H24,
}

impl HourFormat {
    #[inline]
    pub const fn hours_per_day(self) -> u32 {
        match self {
            HourFormat::H12 => 12,
            HourFormat::H24 => 24,
        }
    }

    /// Converts an hours-per-day count; anything but 12 or 24 is rejected.
    pub fn from_hours_per_day(hours: u32) -> Result<Self> {
        match hours {
            12 => Ok(HourFormat::H12),
            24 => Ok(HourFormat::H24),
            other => Err(EngineError::InvalidConfiguration(format!(
                "hours per day must be 12 or 24, got {other}"
            ))),
        }
    }
}

/// Face and hand visibility switches.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DisplayToggles {
    pub show_seconds: bool,
    pub show_hour_numbers: bool,
    pub show_second_ticks: bool,
    pub show_digital: bool,
}

impl Default for DisplayToggles {
    fn default() -> Self {
        Self {
            show_seconds: true,
            show_hour_numbers: true,
            show_second_ticks: true,
            show_digital: false,
        }
    }
}

/// Fields whose change requires the scheduler to restart its timeline.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ScheduleKey {
    pub mode: MotionMode,
    pub format: HourFormat,
}

/// Fields the face layout is built from, besides the hour format.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FaceKey {
    pub show_hour_numbers: bool,
    pub show_second_ticks: bool,
}

/// Clock configuration owned by the host.
///
/// Every setter replaces exactly one field. Nothing is buffered, so the next
/// computation that borrows the settings sees the new value.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockSettings {
    mode: MotionMode,
    format: HourFormat,
    hours_hand: HandConfig,
    minutes_hand: HandConfig,
    seconds_hand: HandConfig,
    toggles: DisplayToggles,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            mode: MotionMode::Continuous,
            format: HourFormat::H12,
            hours_hand: HandConfig::new(0.75, 1.0, true),
            minutes_hand: HandConfig::new(0.4, 1.8, true),
            seconds_hand: HandConfig::new(0.9, 0.2, true),
            toggles: DisplayToggles::default(),
        }
    }
}

impl ClockSettings {
    pub fn new() -> Self {
        Self::default()
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    #[inline]
    pub fn hour_format(&self) -> HourFormat {
        self.format
    }

    #[inline]
    pub fn toggles(&self) -> DisplayToggles {
        self.toggles
    }

    #[inline]
    pub fn hand(&self, hand: Hand) -> HandConfig {
        *self.hand_slot(hand)
    }

    pub fn schedule_key(&self) -> ScheduleKey {
        ScheduleKey { mode: self.mode, format: self.format }
    }

    pub fn face_key(&self) -> FaceKey {
        FaceKey {
            show_hour_numbers: self.toggles.show_hour_numbers,
            show_second_ticks: self.toggles.show_second_ticks,
        }
    }

    /// Effective visibility: the seconds hand also honours `show_seconds`.
    pub fn is_hand_shown(&self, hand: Hand) -> bool {
        let cfg = self.hand_slot(hand);
        match hand {
            Hand::Seconds => cfg.visible && self.toggles.show_seconds,
            _ => cfg.visible,
        }
    }

    // ── setters ───────────────────────────────────────────────────────────

    pub fn set_mode(&mut self, mode: MotionMode) {
        self.mode = mode;
    }

    pub fn set_hour_format(&mut self, format: HourFormat) {
        self.format = format;
    }

    pub fn set_hand(&mut self, hand: Hand, config: HandConfig) {
        *self.hand_slot_mut(hand) = config;
    }

    pub fn set_hand_size(&mut self, hand: Hand, size: f64) {
        self.hand_slot_mut(hand).size = size;
    }

    pub fn set_hand_thickness(&mut self, hand: Hand, thickness: f64) {
        self.hand_slot_mut(hand).thickness = thickness;
    }

    pub fn set_hand_visible(&mut self, hand: Hand, visible: bool) {
        self.hand_slot_mut(hand).visible = visible;
    }

    pub fn set_show_seconds(&mut self, on: bool) {
        self.toggles.show_seconds = on;
    }

    pub fn set_show_hour_numbers(&mut self, on: bool) {
        self.toggles.show_hour_numbers = on;
    }

    pub fn set_show_second_ticks(&mut self, on: bool) {
        self.toggles.show_second_ticks = on;
    }

    pub fn set_show_digital(&mut self, on: bool) {
        self.toggles.show_digital = on;
    }

    fn hand_slot(&self, hand: Hand) -> &HandConfig {
        match hand {
            Hand::Hours => &self.hours_hand,
            Hand::Minutes => &self.minutes_hand,
            Hand::Seconds => &self.seconds_hand,
        }
    }

    fn hand_slot_mut(&mut self, hand: Hand) -> &mut HandConfig {
        match hand {
            Hand::Hours => &mut self.hours_hand,
            Hand::Minutes => &mut self.minutes_hand,
            Hand::Seconds => &mut self.seconds_hand,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_factory_settings() {
        let s = ClockSettings::default();
        assert_eq!(s.mode(), MotionMode::Continuous);
        assert_eq!(s.hour_format(), HourFormat::H12);
        assert_eq!(s.hand(Hand::Hours), HandConfig::new(0.75, 1.0, true));
        assert_eq!(s.hand(Hand::Minutes), HandConfig::new(0.4, 1.8, true));
        assert_eq!(s.hand(Hand::Seconds), HandConfig::new(0.9, 0.2, true));
        assert!(!s.toggles().show_digital);
    }

    #[test]
    fn setter_touches_only_its_field() {
        let mut s = ClockSettings::default();
        let before = s.clone();

        s.set_hand_size(Hand::Minutes, 0.6);

        assert_eq!(s.hand(Hand::Minutes).size, 0.6);
        assert_eq!(s.hand(Hand::Minutes).thickness, before.hand(Hand::Minutes).thickness);
        assert_eq!(s.hand(Hand::Hours), before.hand(Hand::Hours));
        assert_eq!(s.hand(Hand::Seconds), before.hand(Hand::Seconds));
        assert_eq!(s.mode(), before.mode());
        assert_eq!(s.toggles(), before.toggles());
    }

    #[test]
    fn out_of_domain_values_are_stored_as_given() {
        let mut s = ClockSettings::default();
        s.set_hand_thickness(Hand::Hours, -3.0);
        assert_eq!(s.hand(Hand::Hours).thickness, -3.0);
    }

    #[test]
    fn schedule_key_tracks_mode_and_format() {
        let mut s = ClockSettings::default();
        let k0 = s.schedule_key();

        s.set_hand_size(Hand::Hours, 0.1);
        assert_eq!(s.schedule_key(), k0);

        s.set_mode(MotionMode::Steppy);
        assert_ne!(s.schedule_key(), k0);
    }

    #[test]
    fn face_key_ignores_hand_toggles() {
        let mut s = ClockSettings::default();
        let k0 = s.face_key();

        s.set_show_seconds(false);
        s.set_show_digital(true);
        assert_eq!(s.face_key(), k0);

        s.set_show_second_ticks(false);
        assert_ne!(s.face_key(), k0);
    }

    #[test]
    fn seconds_visibility_honours_toggle() {
        let mut s = ClockSettings::default();
        assert!(s.is_hand_shown(Hand::Seconds));
        s.set_show_seconds(false);
        assert!(!s.is_hand_shown(Hand::Seconds));
        assert!(s.is_hand_shown(Hand::Minutes));
    }

    #[test]
    fn hour_format_conversion() {
        assert_eq!(HourFormat::from_hours_per_day(12).unwrap(), HourFormat::H12);
        assert_eq!(HourFormat::from_hours_per_day(24).unwrap().hours_per_day(), 24);
        assert!(matches!(
            HourFormat::from_hours_per_day(10),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn steppy_has_easing_hint() {
        assert_eq!(MotionMode::Continuous.transition(), None);
        assert_eq!(MotionMode::Steppy.transition(), Some(Duration::from_millis(200)));
    }
}
