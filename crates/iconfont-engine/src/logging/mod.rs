//! Logger setup for binaries and tests.
//!
//! Library code only uses the `log` macros; `init_logging` installs
//! `env_logger` as the backend once per process.

mod init;

pub use init::{LoggingConfig, init_logging};
