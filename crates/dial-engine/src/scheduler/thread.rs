use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, RwLock};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::coords::Viewport;
use crate::error::TimerError;
use crate::settings::ClockSettings;
use crate::time::TimeSource;

use super::machine::{Scheduler, Tick};
use super::sink::ClockSink;
use super::timer::{Timer, TimerToken};
use super::CadenceConfig;

/// Settings shared between the host (single writer) and the clock thread.
pub type SharedSettings = Arc<RwLock<ClockSettings>>;

#[derive(Debug, Default)]
struct WakeSlot {
    armed: Option<(TimerToken, Instant)>,
    shutdown: bool,
}

#[derive(Debug, Default)]
struct Wake {
    slot: Mutex<WakeSlot>,
    cv: Condvar,
}

impl Wake {
    fn lock(&self) -> MutexGuard<'_, WakeSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// [`Timer`] backed by the clock thread's condition variable.
#[derive(Debug, Clone)]
pub struct ThreadTimer {
    wake: Arc<Wake>,
}

impl Timer for ThreadTimer {
    fn arm(&mut self, token: TimerToken, delay: Duration) -> Result<(), TimerError> {
        let mut slot = self.wake.lock();
        if slot.shutdown {
            return Err(TimerError::new("clock thread is shutting down"));
        }
        slot.armed = Some((token, Instant::now() + delay));
        self.wake.cv.notify_one();
        Ok(())
    }

    fn disarm(&mut self) {
        self.wake.lock().armed = None;
        self.wake.cv.notify_one();
    }
}

type Shared<S, K> = Arc<Mutex<Scheduler<S, ThreadTimer, K>>>;

/// Runs a [`Scheduler`] on a dedicated thread.
///
/// The scheduler lives behind a mutex that is held for the whole of every
/// delivery, so sink calls never overlap and once [`stop`](Self::stop)
/// returns no further update reaches the sink.
///
/// Timer ticks read the shared `RwLock` and clone the settings before taking
/// the scheduler lock. Transitions take the settings from the caller instead,
/// so a host may call them while holding the write guard.
pub struct ClockThread<S, K>
where
    S: TimeSource + Send + 'static,
    K: ClockSink + Send + 'static,
{
    scheduler: Shared<S, K>,
    settings: SharedSettings,
    wake: Arc<Wake>,
    handle: Option<JoinHandle<()>>,
}

impl<S, K> ClockThread<S, K>
where
    S: TimeSource + Send + 'static,
    K: ClockSink + Send + 'static,
{
    /// Spawns the thread. The clock starts idle; call [`start`](Self::start).
    pub fn spawn(
        source: S,
        sink: K,
        cadence: CadenceConfig,
        viewport: Viewport,
        settings: SharedSettings,
    ) -> Result<Self> {
        let wake = Arc::new(Wake::default());
        let timer = ThreadTimer { wake: Arc::clone(&wake) };
        let scheduler = Arc::new(Mutex::new(
            Scheduler::with_cadence(source, timer, sink, cadence).with_viewport(viewport),
        ));

        let handle = std::thread::Builder::new()
            .name("dial-clock".to_string())
            .spawn({
                let scheduler = Arc::clone(&scheduler);
                let settings = Arc::clone(&settings);
                let wake = Arc::clone(&wake);
                move || run_loop(&scheduler, &settings, &wake)
            })
            .context("failed to spawn clock thread")?;

        Ok(Self {
            scheduler,
            settings,
            wake,
            handle: Some(handle),
        })
    }

    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    pub fn start(&self, settings: &ClockSettings) -> Tick {
        self.lock().start(settings)
    }

    pub fn stop(&self) {
        self.lock().stop();
    }

    pub fn reconfigure(&self, settings: &ClockSettings) -> Tick {
        self.lock().reconfigure(settings)
    }

    pub fn resize(&self, viewport: Viewport, settings: &ClockSettings) -> Tick {
        self.lock().resize(viewport, settings)
    }

    pub fn set_visible(&self, visible: bool, settings: &ClockSettings) -> Tick {
        self.lock().set_visible(visible, settings)
    }

    /// Clone of the shared settings, for callers not holding a guard.
    pub fn settings_snapshot(&self) -> ClockSettings {
        snapshot(&self.settings)
    }

    pub fn is_running(&self) -> bool {
        self.lock().is_running()
    }

    /// Runs `f` with the sink while no delivery is in progress.
    pub fn with_sink<R>(&self, f: impl FnOnce(&mut K) -> R) -> R {
        f(self.lock().sink_mut())
    }

    /// Stops the clock and joins the thread.
    pub fn shutdown(mut self) {
        self.join();
    }

    fn lock(&self) -> MutexGuard<'_, Scheduler<S, ThreadTimer, K>> {
        self.scheduler.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn join(&mut self) {
        self.lock().stop();
        {
            let mut slot = self.wake.lock();
            slot.shutdown = true;
            self.wake.cv.notify_all();
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("clock thread panicked");
            }
        }
    }
}

impl<S, K> Drop for ClockThread<S, K>
where
    S: TimeSource + Send + 'static,
    K: ClockSink + Send + 'static,
{
    fn drop(&mut self) {
        self.join();
    }
}

fn snapshot(settings: &SharedSettings) -> ClockSettings {
    settings.read().unwrap_or_else(PoisonError::into_inner).clone()
}

fn run_loop<S, K>(scheduler: &Shared<S, K>, settings: &SharedSettings, wake: &Wake)
where
    S: TimeSource,
    K: ClockSink,
{
    log::debug!("clock thread running");

    loop {
        let token = {
            let mut slot = wake.lock();
            loop {
                if slot.shutdown {
                    log::debug!("clock thread exiting");
                    return;
                }
                match slot.armed {
                    None => {
                        slot = wake.cv.wait(slot).unwrap_or_else(PoisonError::into_inner);
                    }
                    Some((token, at)) => {
                        let now = Instant::now();
                        if now >= at {
                            slot.armed = None;
                            break token;
                        }
                        slot = wake
                            .cv
                            .wait_timeout(slot, at - now)
                            .unwrap_or_else(PoisonError::into_inner)
                            .0;
                    }
                }
            }
        };

        let snapshot = snapshot(settings);
        scheduler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_timer(token, &snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::RecordingSink;
    use crate::time::SystemTime;

    fn fast() -> CadenceConfig {
        CadenceConfig {
            continuous: Duration::from_millis(2),
            ..CadenceConfig::default()
        }
    }

    #[test]
    fn thread_delivers_until_stopped() {
        let settings: SharedSettings = Arc::default();
        let clock = ClockThread::spawn(
            SystemTime,
            RecordingSink::new(),
            fast(),
            Viewport::new(300.0, 300.0),
            Arc::clone(&settings),
        )
        .unwrap();

        assert_eq!(clock.start(&clock.settings_snapshot()), Tick::Delivered);
        std::thread::sleep(Duration::from_millis(60));
        clock.stop();

        let delivered = clock.with_sink(|s| s.updates.len());
        assert!(delivered > 1, "only {delivered} updates");

        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(clock.with_sink(|s| s.updates.len()), delivered);
        assert!(!clock.is_running());

        clock.shutdown();
    }

    #[test]
    fn settings_written_by_host_reach_next_update() {
        let settings: SharedSettings = Arc::default();
        let clock = ClockThread::spawn(
            SystemTime,
            RecordingSink::new(),
            fast(),
            Viewport::new(300.0, 300.0),
            Arc::clone(&settings),
        )
        .unwrap();
        clock.start(&clock.settings_snapshot());

        settings
            .write()
            .unwrap()
            .set_show_seconds(false);
        std::thread::sleep(Duration::from_millis(30));
        clock.stop();

        let hidden = clock.with_sink(|s| s.last().map(|u| u.hands.seconds.visible));
        assert_eq!(hidden, Some(false));
    }

    #[test]
    fn transitions_while_holding_the_write_guard() {
        let settings: SharedSettings = Arc::default();
        let clock = ClockThread::spawn(
            SystemTime,
            RecordingSink::new(),
            fast(),
            Viewport::new(300.0, 300.0),
            Arc::clone(&settings),
        )
        .unwrap();

        {
            let mut guard = settings.write().unwrap();
            assert_eq!(clock.start(&guard), Tick::Delivered);

            guard.set_mode(crate::settings::MotionMode::Steppy);
            assert_eq!(clock.reconfigure(&guard), Tick::Delivered);
            assert_eq!(clock.resize(Viewport::new(500.0, 400.0), &guard), Tick::Delivered);
            assert_eq!(clock.set_visible(false, &guard), Tick::Idle);
            assert_eq!(clock.set_visible(true, &guard), Tick::Delivered);
        }

        assert!(clock.is_running());
        clock.stop();
        clock.shutdown();
    }
}
