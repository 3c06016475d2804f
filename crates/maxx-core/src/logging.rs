//! Tracing setup.
//!
//! Filtering follows `MAXX_LOG`, then `RUST_LOG`, then the given default.
//! The TUI owns the terminal, so interactive sessions log to a daily file
//! under `$MAXX_HOME/logs`. One-shot commands log to stderr.

use std::path::Path;

use anyhow::{Context, Result};
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

pub const LOG_FILE_PREFIX: &str = "maxx.log";

fn env_filter(default: &str) -> EnvFilter {
    std::env::var("MAXX_LOG")
        .ok()
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

/// Routes logs to a daily-rotated file in `logs_dir`.
///
/// The returned guard flushes the writer on drop; keep it alive for the
/// whole session.
///
/// # Errors
/// Returns an error if the directory cannot be created or a global
/// subscriber is already set.
pub fn init_file_logging(logs_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(env_filter("info"));

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

/// Routes logs to stderr, quiet unless asked.
///
/// # Errors
/// Returns an error if a global subscriber is already set.
pub fn init_stderr_logging() -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter("warn"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")
}
