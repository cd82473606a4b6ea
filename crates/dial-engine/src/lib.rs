//! Dial engine crate.
//!
//! Timing and geometry for an analog clock face. The crate samples wall-clock
//! time, turns it into hand angles, sizes the hands for the current display,
//! and publishes updates to a host-supplied sink at a cadence that depends on
//! the motion mode. Rendering is left to the host.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`settings`] | `ClockSettings`, hand configs, slider bindings |
//! | [`units`] | `clamp`, `rescale` |
//! | [`time`] | `TimeSource`, `TimeSampler`, `UpdateClock` |
//! | [`angles`] | `ClockState` and the per-hand angle functions |
//! | [`geometry`] | `HandsLayout` |
//! | [`face`] | `FaceLayout`, tick marks |
//! | [`scheduler`] | `Scheduler`, `Timer`, `ClockSink`, `ClockThread` |
//!
//! # Quick start
//!
//! ```rust
//! use dial_engine::coords::Viewport;
//! use dial_engine::scheduler::{ManualTimer, RecordingSink, Scheduler, Tick};
//! use dial_engine::settings::ClockSettings;
//! use dial_engine::time::SystemTime;
//!
//! let settings = ClockSettings::default();
//! let mut clock = Scheduler::new(SystemTime, ManualTimer::new(), RecordingSink::new())
//!     .with_viewport(Viewport::new(640.0, 480.0));
//!
//! // The first update is delivered before `start` returns.
//! assert_eq!(clock.start(&settings), Tick::Delivered);
//! assert_eq!(clock.sink().updates.len(), 1);
//! ```

pub mod angles;
pub mod coords;
pub mod error;
pub mod face;
pub mod geometry;
pub mod logging;
pub mod scheduler;
pub mod settings;
pub mod time;
pub mod units;

pub use error::{EngineError, TimerError};
