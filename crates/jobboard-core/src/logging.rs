//! Tracing setup.
//!
//! Logs go to a daily rolling file under `$JOBBOARD_HOME/logs`. Stdout belongs
//! to the front-end, so nothing is ever written to the terminal.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::paths;

const LOG_FILE_PREFIX: &str = "jobboard.log";

/// Installs the global subscriber writing to the default logs directory.
///
/// `RUST_LOG` wins over `default_level`. Keep the returned guard alive for
/// the whole process or buffered lines are lost.
pub fn init(default_level: &str) -> Result<WorkerGuard> {
    init_in(&paths::logs_dir(), default_level)
}

/// Installs the global subscriber writing to `dir`.
pub fn init_in(dir: &Path, default_level: &str) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .with_context(|| format!("Invalid log level: {default_level}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}
