//! Update scheduling.
//!
//! [`Scheduler`] is the state machine; it never blocks and never spawns.
//! Hosts wire it to a clock in one of two ways:
//! - arm a platform timer through the [`Timer`] trait and call
//!   `Scheduler::on_timer` when it fires, or call `Scheduler::poll` from an
//!   existing frame loop (with [`PollOnly`])
//! - hand it to [`ClockThread`], which owns a background thread and timer
//!
//! Output goes to a [`ClockSink`].

mod cadence;
mod machine;
mod sink;
mod thread;
mod timer;

pub use cadence::{delay_until, next_whole_second, CadenceConfig};
pub use machine::{Scheduler, SchedulerState, Tick};
pub use sink::{digital_readout, ClockSink, ClockUpdate, RecordingSink};
pub use thread::{ClockThread, SharedSettings, ThreadTimer};
pub use timer::{ManualTimer, PollOnly, Timer, TimerToken};
