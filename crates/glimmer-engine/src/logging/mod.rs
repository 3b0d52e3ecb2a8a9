//! Logging utilities.
//!
//! All diagnostics (shader source overwrites, missing references, compiler and
//! linker output) go through the `log` facade. This module only provides an
//! optional `env_logger` initializer for hosts that have none.

mod init;

pub use init::{init_logging, LoggingConfig};
