//! Clock settings.
//!
//! [`ClockSettings`] is a plain owned value: the host keeps it, mutates it
//! through setters and lends it to the scheduler on every call. There is no
//! global instance.
//!
//! [`controls`] adapts slider and toggle input to settings writes.

pub mod controls;
mod model;

pub use controls::{HandProperty, SliderBinding};
pub use model::{
    ClockSettings, DisplayToggles, FaceKey, Hand, HandConfig, HourFormat, MotionMode, ScheduleKey,
};
