//! Clock face layout: hour numbers and second ticks.
//!
//! A ring of `N` marks places mark `i` (1-based) at `i * 360 / N` degrees,
//! so the last mark of every ring lands on 12 o'clock (reported as `0`).
//! Where an hour number and a second tick share an angle, the hour number
//! wins and the tick is reported as [`TickKind::SuppressedSecond`].

use crate::angles::normalize_degrees;
use crate::coords::Viewport;
use crate::settings::ClockSettings;

pub const SECOND_MARKS: u32 = 60;

/// Marks sit at this share of the face radius.
pub const MARK_RADIUS_FRACTION: f32 = 0.95;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TickKind {
    /// Hour number `label` (`1..=hours_per_day`).
    Hour { label: u32 },
    Second,
    /// Second tick hidden under an hour number.
    SuppressedSecond,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TickMark {
    /// 1-based position in its ring.
    pub index: u32,
    pub angle: f64,
    pub kind: TickKind,
}

impl TickMark {
    #[inline]
    pub fn is_drawn(&self) -> bool {
        !matches!(self.kind, TickKind::SuppressedSecond)
    }

    /// Rotation that keeps an hour label upright once the mark is rotated
    /// into place.
    #[inline]
    pub fn label_rotation(&self) -> f64 {
        -self.angle
    }
}

/// Every mark on the face, hour numbers first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaceLayout {
    /// Distance of the marks from the face center, in logical pixels.
    pub mark_radius: f32,
    pub marks: Vec<TickMark>,
}

impl FaceLayout {
    pub fn compute(settings: &ClockSettings, viewport: Viewport) -> Self {
        let hours = settings.hour_format().hours_per_day();
        let toggles = settings.toggles();
        let mut marks = Vec::new();

        if toggles.show_hour_numbers {
            marks.extend(ring(hours).map(|(index, angle)| TickMark {
                index,
                angle,
                kind: TickKind::Hour { label: index },
            }));
        }

        if toggles.show_second_ticks {
            marks.extend(ring(SECOND_MARKS).map(|(index, angle)| {
                let covered = toggles.show_hour_numbers && coincides_with_hour(index, hours);
                TickMark {
                    index,
                    angle,
                    kind: if covered { TickKind::SuppressedSecond } else { TickKind::Second },
                }
            }));
        }

        Self {
            mark_radius: viewport.face_size() * 0.5 * MARK_RADIUS_FRACTION,
            marks,
        }
    }

    pub fn hour_numbers(&self) -> impl Iterator<Item = &TickMark> {
        self.marks
            .iter()
            .filter(|m| matches!(m.kind, TickKind::Hour { .. }))
    }

    pub fn drawn_second_ticks(&self) -> impl Iterator<Item = &TickMark> {
        self.marks
            .iter()
            .filter(|m| matches!(m.kind, TickKind::Second))
    }
}

/// `(index, angle)` for a ring of `n` evenly spaced marks.
pub fn ring(n: u32) -> impl Iterator<Item = (u32, f64)> {
    let step = 360.0 / f64::from(n.max(1));
    (1..=n).map(move |i| (i, normalize_degrees(f64::from(i) * step)))
}

/// Second `index` sits on an hour mark when `index * hours / 60` is whole.
#[inline]
fn coincides_with_hour(second_index: u32, hours_per_day: u32) -> bool {
    (second_index * hours_per_day) % SECOND_MARKS == 0
}
