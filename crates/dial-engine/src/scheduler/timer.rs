use std::time::Duration;

use crate::error::TimerError;

/// Identifies one run of the scheduler.
///
/// Every `start` issues a fresh token. A timer that fires with the token of an
/// earlier run is ignored, which is what makes `stop` total even when a wake-up
/// is already in flight.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TimerToken(pub(crate) u64);

impl TimerToken {
    #[inline]
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Host-provided one-shot wake-up.
///
/// When the timer fires the host calls
/// [`Scheduler::on_timer`](super::Scheduler::on_timer) with the token it was
/// armed with.
pub trait Timer {
    /// Arms a wake-up `delay` from now, replacing any armed one.
    fn arm(&mut self, token: TimerToken, delay: Duration) -> Result<(), TimerError>;

    /// Cancels the armed wake-up, if any.
    fn disarm(&mut self);
}

/// For hosts that drive the scheduler from their own frame loop through
/// [`Scheduler::poll`](super::Scheduler::poll).
#[derive(Debug, Copy, Clone, Default)]
pub struct PollOnly;

impl Timer for PollOnly {
    fn arm(&mut self, _token: TimerToken, _delay: Duration) -> Result<(), TimerError> {
        Ok(())
    }

    fn disarm(&mut self) {}
}

/// Records the armed wake-up and lets the caller fire it by hand.
///
/// Can be switched into a failing mode to exercise the retry path.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    armed: Option<(TimerToken, Duration)>,
    failing: bool,
    arm_calls: usize,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn armed(&self) -> Option<(TimerToken, Duration)> {
        self.armed
    }

    /// Takes the armed wake-up as if it had fired.
    pub fn fire(&mut self) -> Option<TimerToken> {
        self.armed.take().map(|(token, _)| token)
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    #[inline]
    pub fn arm_calls(&self) -> usize {
        self.arm_calls
    }
}

impl Timer for ManualTimer {
    fn arm(&mut self, token: TimerToken, delay: Duration) -> Result<(), TimerError> {
        self.arm_calls += 1;
        if self.failing {
            return Err(TimerError::new("manual timer set to fail"));
        }
        self.armed = Some((token, delay));
        Ok(())
    }

    fn disarm(&mut self) {
        self.armed = None;
    }
}
