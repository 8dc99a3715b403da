//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "FISHRACK_LOG";

const LOG_FILE: &str = "fishrack.log";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/fishrack/logs/` because the terminal
/// belongs to the UI. The filter is read from `FISHRACK_LOG`.
///
/// # Examples
/// ```bash
/// FISHRACK_LOG=debug fishrack
/// FISHRACK_LOG=fishrack_api=trace fishrack --dump
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE);

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("fishrack=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("fishrack {} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Log directory: {}", log_dir.display());

    Ok(())
}

fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fishrack")
        .join("logs")
}

/// Path of the current log file, shown to the user on startup failures
pub fn current_log_file() -> PathBuf {
    log_directory().join(LOG_FILE)
}
