//! Logging utilities.
//!
//! The engine itself only uses the `log` facade. This module gives hosts a
//! one-call `env_logger` setup.

mod init;

pub use init::{init_logging, LoggingConfig};
