use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Logs to stdout and appends to `log_file`.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes and stops the file writer.
pub fn init(log_file: &Path, default_level: &str) -> Result<WorkerGuard> {
    let dir = match log_file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let name = log_file
        .file_name()
        .with_context(|| format!("log file {} has no file name", log_file.display()))?;
    let (file_writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), default_level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(guard)
}
