//! Headless host for the dial engine.
//!
//! Runs the clock on its own thread and logs what a renderer would draw.
//! Configured through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `DIAL_RUN_SECS` | `5` | how long to run |
//! | `DIAL_WIDTH` / `DIAL_HEIGHT` | `800` / `600` | surface size in logical px |
//! | `DIAL_MODE` | `continuous` | `continuous` or `steppy` |
//! | `DIAL_24H` | unset | any value selects the 24-hour face |

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};

use dial_engine::coords::Viewport;
use dial_engine::face::FaceLayout;
use dial_engine::logging::{init_logging, LoggingConfig};
use dial_engine::scheduler::{CadenceConfig, ClockSink, ClockThread, ClockUpdate, SharedSettings};
use dial_engine::settings::{
    controls, ClockSettings, Hand, HandProperty, HourFormat, MotionMode, SliderBinding,
};
use dial_engine::time::SystemTime;

/// Logs one line per displayed second; everything else at trace level.
#[derive(Default)]
struct LogSink {
    last_second: Option<i64>,
}

impl ClockSink for LogSink {
    fn on_update(&mut self, update: &ClockUpdate) {
        let second = update.instant.timestamp();
        let s = &update.state;

        if self.last_second == Some(second) {
            log::trace!("#{} s={:.3} dt={:.4}", update.time.index, s.seconds, update.time.dt);
            return;
        }
        self.last_second = Some(second);

        let tip = update.hands.tip(Hand::Minutes, s);
        log::info!(
            "{} | s {:>7.3}°  m {:>7.3}°  h {:>7.3}° | minute tip ({:.1}, {:.1}){}",
            update.instant.format("%H:%M:%S%.3f"),
            s.seconds,
            s.minutes,
            s.hours,
            tip.x,
            tip.y,
            update.digital.as_deref().map(|d| format!(" | {d}")).unwrap_or_default(),
        );
    }

    fn on_face(&mut self, face: &FaceLayout) {
        log::info!(
            "face: {} hour numbers, {} second ticks, mark radius {:.1}px",
            face.hour_numbers().count(),
            face.drawn_second_ticks().count(),
            face.mark_radius,
        );
    }
}

struct StudioConfig {
    run_for: Duration,
    viewport: Viewport,
    mode: MotionMode,
    format: HourFormat,
}

impl StudioConfig {
    fn from_env() -> Result<Self> {
        let run_secs: u64 = env_or("DIAL_RUN_SECS", "5")?
            .parse()
            .context("DIAL_RUN_SECS must be a whole number of seconds")?;
        let width: f32 = env_or("DIAL_WIDTH", "800")?
            .parse()
            .context("DIAL_WIDTH must be a number")?;
        let height: f32 = env_or("DIAL_HEIGHT", "600")?
            .parse()
            .context("DIAL_HEIGHT must be a number")?;

        let mode = match env_or("DIAL_MODE", "continuous")?.as_str() {
            "continuous" => MotionMode::Continuous,
            "steppy" => MotionMode::Steppy,
            other => bail!("DIAL_MODE must be `continuous` or `steppy`, got `{other}`"),
        };
        let format = if std::env::var_os("DIAL_24H").is_some() {
            HourFormat::H24
        } else {
            HourFormat::H12
        };

        Ok(Self {
            run_for: Duration::from_secs(run_secs),
            viewport: Viewport::new(width, height),
            mode,
            format,
        })
    }
}

fn env_or(key: &str, default: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(v) => Ok(v),
        Err(std::env::VarError::NotPresent) => Ok(default.to_string()),
        Err(e) => Err(e).with_context(|| format!("reading {key}")),
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    let config = StudioConfig::from_env()?;

    println!();
    println!("  dial studio  ·  {:?}  ·  {}h face", config.mode, config.format.hours_per_day());
    println!();

    let mut initial = ClockSettings::default();
    initial.set_mode(config.mode);
    initial.set_hour_format(config.format);
    initial.set_show_digital(true);
    let settings: SharedSettings = Arc::new(RwLock::new(initial));

    let clock = ClockThread::spawn(
        SystemTime,
        LogSink::default(),
        CadenceConfig::default(),
        config.viewport,
        Arc::clone(&settings),
    )?;
    clock.start(&clock.settings_snapshot());

    let half = config.run_for / 2;
    std::thread::sleep(half);

    // Drag the minute-hand size slider, as the settings panel would.
    let mut slider = SliderBinding::new(Hand::Minutes, HandProperty::Size);
    {
        let mut s = settings.write().map_err(|_| anyhow::anyhow!("settings lock poisoned"))?;
        let t0 = Instant::now();
        for (i, value) in [45.0, 55.0, 65.0, 75.0].into_iter().enumerate() {
            slider.on_slide(&mut s, value, t0 + Duration::from_millis(30 * i as u64));
        }
        slider.on_release(&mut s, 80.0, t0 + Duration::from_millis(150));
        log::info!("minute hand size -> {:.2}", s.hand(Hand::Minutes).size);
    }

    // Hide and show the surface; no catch-up on resume.
    let current = clock.settings_snapshot();
    clock.set_visible(false, &current);
    std::thread::sleep(Duration::from_millis(300));
    clock.set_visible(true, &current);

    // Flip the motion mode and restart the timeline.
    {
        let mut s = settings.write().map_err(|_| anyhow::anyhow!("settings lock poisoned"))?;
        let continuous = s.mode().is_continuous();
        controls::set_continuous(&mut s, !continuous);
        clock.reconfigure(&s);
    }

    std::thread::sleep(config.run_for.saturating_sub(half));
    clock.shutdown();

    log::info!("done");
    Ok(())
}
