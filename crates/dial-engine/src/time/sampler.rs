use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, TimeDelta, TimeZone};

use crate::error::{EngineError, Result};

/// Source of wall-clock time.
///
/// Implementations must be cheap to call; the scheduler samples once per update.
pub trait TimeSource {
    /// Current instant in the local offset.
    fn now(&self) -> DateTime<FixedOffset>;

    /// Local midnight of `date`, or `None` when the zone has no such instant.
    fn start_of_day(&self, date: NaiveDate) -> Option<DateTime<FixedOffset>>;
}

/// The host's local clock.
#[derive(Debug, Copy, Clone, Default)]
pub struct SystemTime;

impl TimeSource for SystemTime {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }

    fn start_of_day(&self, date: NaiveDate) -> Option<DateTime<FixedOffset>> {
        Local
            .from_local_datetime(&date.and_time(NaiveTime::MIN))
            .earliest()
            .map(|dt| dt.fixed_offset())
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a host (or test) can keep one handle and
/// give another to the scheduler.
#[derive(Debug, Clone)]
pub struct ManualTime {
    inner: Arc<Mutex<ManualInner>>,
}

#[derive(Debug)]
struct ManualInner {
    now: DateTime<FixedOffset>,
    unresolvable: Option<NaiveDate>,
}

impl ManualTime {
    pub fn new(start: DateTime<FixedOffset>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ManualInner { now: start, unresolvable: None })),
        }
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        self.lock().now = now;
    }

    pub fn advance(&self, by: std::time::Duration) {
        let delta = TimeDelta::from_std(by).unwrap_or(TimeDelta::MAX);
        let mut inner = self.lock();
        inner.now = inner.now.checked_add_signed(delta).unwrap_or(inner.now);
    }

    /// Makes `start_of_day` fail for `date`, as in zones that skip midnight.
    pub fn make_unresolvable(&self, date: Option<NaiveDate>) {
        self.lock().unresolvable = date;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> DateTime<FixedOffset> {
        self.lock().now
    }

    fn start_of_day(&self, date: NaiveDate) -> Option<DateTime<FixedOffset>> {
        let inner = self.lock();
        if inner.unresolvable == Some(date) {
            return None;
        }
        date.and_time(NaiveTime::MIN)
            .and_local_timezone(*inner.now.offset())
            .single()
    }
}

/// Cached local midnight of the current day.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReferenceEpoch {
    pub date: NaiveDate,
    pub instant: DateTime<FixedOffset>,
}

/// One reading of the clock together with the epoch it is measured against.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sample {
    pub instant: DateTime<FixedOffset>,
    pub reference: DateTime<FixedOffset>,
}

impl Sample {
    #[inline]
    pub fn elapsed_seconds(&self, continuous: bool) -> f64 {
        elapsed_seconds(self.instant, self.reference, continuous)
    }
}

/// Samples a [`TimeSource`] and keeps the reference epoch current.
///
/// The epoch is derived once per calendar day. When the date of a sample
/// differs from the cached one, local midnight is resolved again; if that
/// fails the cached epoch is kept and the next sample retries.
#[derive(Debug)]
pub struct TimeSampler<S> {
    source: S,
    epoch: Option<ReferenceEpoch>,
}

impl<S: TimeSource> TimeSampler<S> {
    pub fn new(source: S) -> Self {
        Self { source, epoch: None }
    }

    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[inline]
    pub fn epoch(&self) -> Option<ReferenceEpoch> {
        self.epoch
    }

    /// Reads the current instant without touching the epoch.
    #[inline]
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.source.now()
    }

    pub fn sample(&mut self) -> Result<Sample> {
        let instant = self.source.now();
        let reference = self.reference_for(instant.date_naive())?;
        Ok(Sample { instant, reference })
    }

    fn reference_for(&mut self, date: NaiveDate) -> Result<DateTime<FixedOffset>> {
        if let Some(epoch) = self.epoch.filter(|e| e.date == date) {
            return Ok(epoch.instant);
        }

        match self.source.start_of_day(date) {
            Some(instant) => {
                log::debug!("reference epoch -> {instant}");
                self.epoch = Some(ReferenceEpoch { date, instant });
                Ok(instant)
            }
            None => Err(EngineError::DayBoundary { date }),
        }
    }
}

/// Seconds from `reference` to `instant`.
///
/// Continuous: fractional seconds. Otherwise whole seconds, truncated.
pub fn elapsed_seconds(
    instant: DateTime<FixedOffset>,
    reference: DateTime<FixedOffset>,
    continuous: bool,
) -> f64 {
    let delta = instant.signed_duration_since(reference);
    let whole = delta.num_seconds() as f64;
    if continuous {
        whole + f64::from(delta.subsec_nanos()) * 1e-9
    } else {
        whole
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(h: u32, m: u32, s: u32, ms: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 9, h, m, s)
            .unwrap()
            + TimeDelta::milliseconds(ms as i64)
    }

    #[test]
    fn elapsed_continuous_keeps_fraction() {
        let midnight = at(0, 0, 0, 0);
        let t = at(1, 1, 1, 500);
        assert!((elapsed_seconds(t, midnight, true) - 3661.5).abs() < 1e-9);
    }

    #[test]
    fn elapsed_steppy_truncates() {
        let midnight = at(0, 0, 0, 0);
        let t = at(1, 1, 1, 999);
        assert_eq!(elapsed_seconds(t, midnight, false), 3661.0);
    }

    #[test]
    fn sampler_derives_midnight() {
        let clock = ManualTime::new(at(13, 30, 0, 0));
        let mut sampler = TimeSampler::new(clock);

        let sample = sampler.sample().unwrap();
        assert_eq!(sample.reference, at(0, 0, 0, 0));
        assert_eq!(sample.elapsed_seconds(true), 13.5 * 3600.0);
    }

    #[test]
    fn epoch_rolls_over_at_midnight() {
        let clock = ManualTime::new(at(23, 59, 59, 0));
        let mut sampler = TimeSampler::new(clock.clone());

        let before = sampler.sample().unwrap();
        assert_eq!(before.elapsed_seconds(false), 86_399.0);

        clock.advance(Duration::from_millis(1_500));
        let after = sampler.sample().unwrap();

        assert_eq!(after.reference, before.reference + TimeDelta::days(1));
        assert!((after.elapsed_seconds(true) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn failed_rollover_keeps_previous_epoch() {
        let clock = ManualTime::new(at(23, 59, 59, 0));
        let mut sampler = TimeSampler::new(clock.clone());
        let first = sampler.sample().unwrap();

        let next_day = first.instant.date_naive().succ_opt().unwrap();
        clock.make_unresolvable(Some(next_day));
        clock.advance(Duration::from_secs(2));

        assert_eq!(
            sampler.sample().unwrap_err(),
            EngineError::DayBoundary { date: next_day }
        );
        assert_eq!(sampler.epoch().unwrap().instant, first.reference);

        // Retried on the next sample once resolvable.
        clock.make_unresolvable(None);
        let ok = sampler.sample().unwrap();
        assert_eq!(ok.reference.date_naive(), next_day);
    }

    #[test]
    fn system_time_midnight_is_before_now() {
        let now = SystemTime.now();
        if let Some(midnight) = SystemTime.start_of_day(now.date_naive()) {
            assert!(midnight <= now);
            assert!(now.signed_duration_since(midnight) <= TimeDelta::hours(25));
        }
    }
}
