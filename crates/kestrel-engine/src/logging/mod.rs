//! Logging setup.
//!
//! The rendering core reports every degradable failure (uniform-name
//! misses, stale handle deletes, skipped sprites) through `log`; this
//! module wires the `env_logger` backend exactly once per process.

mod init;

pub use init::{LoggingConfig, init_logging};
