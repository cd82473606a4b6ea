use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeDelta, Timelike};

use crate::settings::MotionMode;

/// Update periods per motion mode.
///
/// These are tuning values. The only hard guarantee is that a displayed angle
/// is never older than one period, plus the whole-second alignment in steppy
/// mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CadenceConfig {
    /// Period in continuous mode; one display frame at 60 Hz.
    pub continuous: Duration,
    /// Minute/hour refresh period in steppy mode. The seconds hand is
    /// additionally updated on every whole-second boundary.
    pub steppy: Duration,
    /// Upper clamp for the `dt` reported with each update.
    pub dt_clamp: Duration,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            continuous: Duration::from_millis(16),
            steppy: Duration::from_millis(100),
            dt_clamp: Duration::from_millis(250),
        }
    }
}

impl CadenceConfig {
    #[inline]
    pub fn period(&self, mode: MotionMode) -> Duration {
        match mode {
            MotionMode::Continuous => self.continuous,
            MotionMode::Steppy => self.steppy,
        }
    }

    /// Deadline of the update following one delivered at `now`.
    ///
    /// Deadlines advance from `previous` so the cadence does not drift with
    /// callback latency. If that lands in the past (the host stalled or was
    /// paused) or more than one period ahead (the wall clock stepped back),
    /// the deadline is re-based on `now`; missed updates are never replayed.
    pub fn next_deadline(
        &self,
        mode: MotionMode,
        previous: Option<DateTime<FixedOffset>>,
        now: DateTime<FixedOffset>,
    ) -> DateTime<FixedOffset> {
        let period = TimeDelta::from_std(self.period(mode)).unwrap_or(TimeDelta::milliseconds(16));
        let rebased = now + period;

        let deadline = match previous.map(|p| p + period) {
            Some(d) if d > now && d <= rebased => d,
            _ => rebased,
        };

        match mode {
            MotionMode::Continuous => deadline,
            MotionMode::Steppy => deadline.min(next_whole_second(now)),
        }
    }
}

/// First whole-second instant strictly after `now`.
pub fn next_whole_second(now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let into_second = TimeDelta::nanoseconds(i64::from(now.nanosecond() % 1_000_000_000));
    now - into_second + TimeDelta::seconds(1)
}

/// Delay from `now` until `deadline`, zero if it already passed.
#[inline]
pub fn delay_until(deadline: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> Duration {
    deadline.signed_duration_since(now).to_std().unwrap_or_default()
}
