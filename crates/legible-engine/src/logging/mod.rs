//! Logging utilities.
//!
//! Library code logs through the `log` facade only; this module wires up
//! `env_logger` for binaries and tests that want output.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER, VERBOSE_FILTER};
