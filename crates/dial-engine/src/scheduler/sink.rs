use std::time::Duration;

use chrono::{DateTime, FixedOffset};

use crate::angles::ClockState;
use crate::face::FaceLayout;
use crate::geometry::HandsLayout;
use crate::settings::HourFormat;
use crate::time::UpdateTime;

/// One published update.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockUpdate {
    pub state: ClockState,
    pub hands: HandsLayout,
    /// Easing the renderer should apply when moving to the new angles.
    pub transition: Option<Duration>,
    /// Digital readout, when enabled in the settings.
    pub digital: Option<String>,
    pub time: UpdateTime,
    /// Wall-clock instant the angles were computed for.
    pub instant: DateTime<FixedOffset>,
}

/// Receiver of engine output; implemented by the rendering layer.
///
/// Calls never overlap: the scheduler invokes the sink synchronously from
/// whichever call delivered the update.
pub trait ClockSink {
    fn on_update(&mut self, update: &ClockUpdate);

    /// Called on every (re)start, before the first update of the run.
    fn on_face(&mut self, face: &FaceLayout) {
        let _ = face;
    }
}

impl<F> ClockSink for F
where
    F: FnMut(&ClockUpdate),
{
    fn on_update(&mut self, update: &ClockUpdate) {
        self(update)
    }
}

/// Keeps everything it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub updates: Vec<ClockUpdate>,
    pub faces: Vec<FaceLayout>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn last(&self) -> Option<&ClockUpdate> {
        self.updates.last()
    }
}

impl ClockSink for RecordingSink {
    fn on_update(&mut self, update: &ClockUpdate) {
        self.updates.push(update.clone());
    }

    fn on_face(&mut self, face: &FaceLayout) {
        self.faces.push(face.clone());
    }
}

/// `HH:MM:SS`, or `hh:mm:ss AM` in 12-hour format.
pub fn digital_readout(instant: DateTime<FixedOffset>, format: HourFormat) -> String {
    match format {
        HourFormat::H24 => instant.format("%H:%M:%S").to_string(),
        HourFormat::H12 => instant.format("%I:%M:%S %p").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn readout_formats() {
        let t = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 1, 1, 15, 4, 5).unwrap();
        assert_eq!(digital_readout(t, HourFormat::H24), "15:04:05");
        assert_eq!(digital_readout(t, HourFormat::H12), "03:04:05 PM");
    }
}
