//! Time subsystem.
//!
//! Wall-clock sampling and update timing, decoupled from the scheduler so both
//! can be tested with a manual clock.
//! - [`TimeSampler`] reads a [`TimeSource`] and keeps local midnight cached
//! - [`UpdateClock`] numbers published updates and measures the gap between them

mod sampler;
mod update_clock;

pub use sampler::{
    elapsed_seconds, ManualTime, ReferenceEpoch, Sample, SystemTime, TimeSampler, TimeSource,
};
pub use update_clock::{UpdateClock, UpdateTime};
