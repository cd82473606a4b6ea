use std::time::Duration;

use chrono::{DateTime, FixedOffset};

/// Timing of one published update.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UpdateTime {
    /// Time since the previous update of the same run, in seconds.
    ///
    /// Zero for the first update after a (re)start.
    pub dt: f32,

    /// Monotonic update counter; keeps counting across restarts.
    pub index: u64,
}

/// Update clock producing `UpdateTime` snapshots.
///
/// One per scheduler. Delta time is clamped so a renderer that animates
/// between updates is not handed a multi-minute step after the host was
/// suspended or the wall clock jumped.
#[derive(Debug, Clone)]
pub struct UpdateClock {
    last: Option<DateTime<FixedOffset>>,
    index: u64,
    dt_max: Duration,
}

impl UpdateClock {
    /// Creates a clock with the default clamp of 250 ms.
    pub fn new() -> Self {
        Self::with_clamp(Duration::from_millis(250))
    }

    pub fn with_clamp(dt_max: Duration) -> Self {
        Self { last: None, index: 0, dt_max }
    }

    /// Forgets the previous update so the next `tick` reports `dt == 0`.
    ///
    /// Called on every start so a pause does not show up as a long frame.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Advances the clock to `now` and returns a new `UpdateTime`.
    pub fn tick(&mut self, now: DateTime<FixedOffset>) -> UpdateTime {
        let dt = match self.last {
            Some(last) => {
                // Wall time can step backwards; treat that as no time passing.
                let raw = now.signed_duration_since(last).to_std().unwrap_or_default();
                if raw > self.dt_max {
                    log::debug!("update gap of {raw:?} clamped to {:?}", self.dt_max);
                    self.dt_max
                } else {
                    raw
                }
            }
            None => Duration::ZERO,
        };

        self.last = Some(now);

        let ut = UpdateTime { dt: dt.as_secs_f32(), index: self.index };
        self.index = self.index.wrapping_add(1);
        ut
    }
}

impl Default for UpdateClock {
    fn default() -> Self {
        Self::new()
    }
}
