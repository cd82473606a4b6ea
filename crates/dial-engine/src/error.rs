use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced by the engine.
///
/// None of these leave the engine in a broken state: timer and day-boundary
/// failures are reported and retried on the next tick, configuration and
/// conversion errors are returned to the caller that produced the bad input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A configuration value outside its documented domain.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// `rescale` was asked to map from a zero-width source interval.
    #[error("cannot rescale from zero-width interval [{min}, {max}]")]
    DivisionByZero { min: f64, max: f64 },

    /// The host refused to schedule the next update.
    #[error(transparent)]
    Timer(#[from] TimerError),

    /// Local midnight does not exist (or cannot be resolved) for `date`.
    #[error("cannot resolve start of day for {date}")]
    DayBoundary { date: NaiveDate },
}

/// Failure reported by a [`Timer`](crate::scheduler::Timer) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("timer refused to arm: {reason}")]
pub struct TimerError {
    pub reason: String,
}

impl TimerError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
