//! Logging bootstrap for the CLI.
//!
//! Diagnostics go to stderr so stdout stays clean for the run summary and
//! `--layout` output. `RUST_LOG` takes precedence over the verbosity flag.

use crate::error::AppError;
use flexi_logger::{Logger, LoggerHandle};
use log::debug;

/// Log level for a given number of `-v` flags.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Starts the stderr logger. The returned handle must be kept alive for the
/// rest of the process.
pub fn init_logging(verbose: u8) -> Result<LoggerHandle, AppError> {
    let level = level_for_verbosity(verbose);
    let handle = Logger::try_with_env_or_str(level)
        .map_err(|e| AppError::LoggingError(format!("invalid log level `{}`: {}", level, e)))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|e| AppError::LoggingError(e.to_string()))?;

    debug!(
        "event=app_start level={} version={}",
        level,
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}
