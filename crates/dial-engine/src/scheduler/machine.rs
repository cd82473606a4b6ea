use chrono::{DateTime, FixedOffset};

use crate::angles::ClockState;
use crate::coords::Viewport;
use crate::face::FaceLayout;
use crate::geometry::HandsLayout;
use crate::settings::{ClockSettings, FaceKey, ScheduleKey};
use crate::time::{TimeSampler, TimeSource, UpdateClock};

use super::cadence::{delay_until, CadenceConfig};
use super::sink::{digital_readout, ClockSink, ClockUpdate};
use super::timer::{Timer, TimerToken};

/// Externally visible scheduler state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Result of handing the scheduler a chance to run.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Tick {
    /// Not running; nothing happened.
    Idle,
    /// Timer token from an earlier run; ignored.
    Stale,
    /// Running, but the next update is not due yet.
    Pending,
    /// An update was delivered to the sink.
    Delivered,
    /// The update was due but the clock could not be sampled; retried next tick.
    Skipped,
}

#[derive(Debug)]
struct Run {
    token: TimerToken,
    key: ScheduleKey,
    /// Toggles the last published face was built from.
    face: FaceKey,
    deadline: Option<DateTime<FixedOffset>>,
    /// Set when arming the timer failed; the next `poll` delivers.
    rearm: bool,
}

/// Drives hand updates.
///
/// A two-state machine (`Idle`, `Running`) that samples the clock, computes
/// angles and geometry, and hands them to a [`ClockSink`]. It owns no thread:
/// the host calls [`on_timer`](Self::on_timer) when an armed [`Timer`] fires,
/// and/or [`poll`](Self::poll) from its frame loop. Settings are borrowed on
/// every call, never stored.
///
/// `start` while running is a no-op; use [`reconfigure`](Self::reconfigure)
/// to restart the timeline.
#[derive(Debug)]
pub struct Scheduler<S, T, K> {
    sampler: TimeSampler<S>,
    timer: T,
    sink: K,
    cadence: CadenceConfig,
    viewport: Viewport,
    clock: UpdateClock,
    run: Option<Run>,
    generation: u64,
    resume_when_visible: bool,
    last: Option<ClockState>,
}

impl<S, T, K> Scheduler<S, T, K>
where
    S: TimeSource,
    T: Timer,
    K: ClockSink,
{
    pub fn new(source: S, timer: T, sink: K) -> Self {
        Self::with_cadence(source, timer, sink, CadenceConfig::default())
    }

    pub fn with_cadence(source: S, timer: T, sink: K, cadence: CadenceConfig) -> Self {
        Self {
            sampler: TimeSampler::new(source),
            timer,
            sink,
            clock: UpdateClock::with_clamp(cadence.dt_clamp),
            cadence,
            viewport: Viewport::default(),
            run: None,
            generation: 0,
            resume_when_visible: false,
            last: None,
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> SchedulerState {
        if self.run.is_some() { SchedulerState::Running } else { SchedulerState::Idle }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn cadence(&self) -> CadenceConfig {
        self.cadence
    }

    /// Angles of the most recent delivered update.
    #[inline]
    pub fn last_state(&self) -> Option<ClockState> {
        self.last
    }

    /// Token of the current run.
    pub fn token(&self) -> Option<TimerToken> {
        self.run.as_ref().map(|r| r.token)
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn time_source(&self) -> &S {
        self.sampler.source()
    }

    // ── transitions ───────────────────────────────────────────────────────

    /// `Idle -> Running`. Publishes the face and delivers the first update
    /// before returning.
    pub fn start(&mut self, settings: &ClockSettings) -> Tick {
        if self.run.is_some() {
            log::debug!("start ignored: already running");
            return Tick::Pending;
        }

        self.generation = self.generation.wrapping_add(1);
        let token = TimerToken(self.generation);
        self.run = Some(Run {
            token,
            key: settings.schedule_key(),
            face: settings.face_key(),
            deadline: None,
            rearm: false,
        });
        self.clock.reset();

        log::debug!(
            "scheduler started (run {}, {:?}, {}h)",
            token.generation(),
            settings.mode(),
            settings.hour_format().hours_per_day()
        );

        self.sink.on_face(&FaceLayout::compute(settings, self.viewport));
        self.deliver(settings)
    }

    /// `Running -> Idle`. Idempotent.
    ///
    /// Also forgets a pending resume, so a later `set_visible(true)` does not
    /// bring the clock back.
    pub fn stop(&mut self) {
        self.resume_when_visible = false;
        self.halt();
    }

    fn halt(&mut self) {
        if let Some(run) = self.run.take() {
            self.timer.disarm();
            log::debug!("scheduler stopped (run {})", run.token.generation());
        }
    }

    /// Restarts the timeline with the current settings and viewport.
    ///
    /// Nothing computed from the previous configuration is delivered after
    /// this call: the old run's token is retired before the new first update.
    pub fn reconfigure(&mut self, settings: &ClockSettings) -> Tick {
        let was_running = self.is_running();
        self.halt();
        if was_running {
            log::debug!("reconfiguring");
            self.start(settings)
        } else {
            Tick::Idle
        }
    }

    /// Applies a new display size; reconfigures when running.
    pub fn resize(&mut self, viewport: Viewport, settings: &ClockSettings) -> Tick {
        if self.viewport == viewport {
            return if self.is_running() { Tick::Pending } else { Tick::Idle };
        }
        self.viewport = viewport;
        self.reconfigure(settings)
    }

    /// Pauses while the surface is hidden and resumes when it is shown again.
    ///
    /// Resuming recomputes from the current instant; updates missed while
    /// hidden are not replayed.
    pub fn set_visible(&mut self, visible: bool, settings: &ClockSettings) -> Tick {
        if !visible {
            if self.is_running() {
                self.halt();
                self.resume_when_visible = true;
            }
            return Tick::Idle;
        }

        if std::mem::take(&mut self.resume_when_visible) {
            self.start(settings)
        } else if self.is_running() {
            Tick::Pending
        } else {
            Tick::Idle
        }
    }

    // ── driving ───────────────────────────────────────────────────────────

    /// Handles a timer wake-up armed with `token`.
    pub fn on_timer(&mut self, token: TimerToken, settings: &ClockSettings) -> Tick {
        match self.token() {
            None => Tick::Idle,
            Some(current) if current != token => {
                log::trace!("dropping stale timer (run {})", token.generation());
                Tick::Stale
            }
            Some(_) => self.advance(settings),
        }
    }

    /// Gives the scheduler a chance to run from the host's own loop.
    ///
    /// Delivers when the deadline has passed, when the last timer arm failed,
    /// or when the motion mode or hour format changed since the run started.
    /// A changed face toggle republishes the face before the next update.
    pub fn poll(&mut self, settings: &ClockSettings) -> Tick {
        if self.run.is_none() {
            return Tick::Idle;
        }
        self.advance(settings)
    }

    fn advance(&mut self, settings: &ClockSettings) -> Tick {
        let Some(run) = self.run.as_mut() else {
            return Tick::Idle;
        };

        if run.key != settings.schedule_key() {
            return self.reconfigure(settings);
        }

        let face = settings.face_key();
        if run.face != face {
            run.face = face;
            log::debug!("face toggles changed; republishing face");
            self.sink.on_face(&FaceLayout::compute(settings, self.viewport));
        }

        let Some(run) = &self.run else {
            return Tick::Idle;
        };

        let due = run.rearm
            || run
                .deadline
                .is_none_or(|deadline| self.sampler.now() >= deadline);

        if due {
            self.deliver(settings)
        } else {
            // Woken early; make sure a wake-up is still pending.
            self.arm(self.sampler.now());
            Tick::Pending
        }
    }

    fn deliver(&mut self, settings: &ClockSettings) -> Tick {
        let mode = settings.mode();

        let tick = match self.sampler.sample() {
            Ok(sample) => {
                let state = ClockState::compute(&sample, mode, settings.hour_format());
                let update = ClockUpdate {
                    state,
                    hands: HandsLayout::compute(settings, self.viewport),
                    transition: mode.transition(),
                    digital: settings
                        .toggles()
                        .show_digital
                        .then(|| digital_readout(sample.instant, settings.hour_format())),
                    time: self.clock.tick(sample.instant),
                    instant: sample.instant,
                };

                log::trace!(
                    "update #{}: s={:.2} m={:.2} h={:.2}",
                    update.time.index,
                    state.seconds,
                    state.minutes,
                    state.hours
                );

                self.sink.on_update(&update);
                self.last = Some(state);
                Tick::Delivered
            }
            Err(err) => {
                log::warn!("skipping update: {err}");
                Tick::Skipped
            }
        };

        let now = self.sampler.now();
        if let Some(run) = self.run.as_mut() {
            run.deadline = Some(self.cadence.next_deadline(mode, run.deadline, now));
        }
        self.arm(now);
        tick
    }

    fn arm(&mut self, now: DateTime<FixedOffset>) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let delay = run.deadline.map(|d| delay_until(d, now)).unwrap_or_default();

        match self.timer.arm(run.token, delay) {
            Ok(()) => run.rearm = false,
            Err(err) => {
                log::warn!("{err}; retrying on next poll");
                run.rearm = true;
            }
        }
    }
}
