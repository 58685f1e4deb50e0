// 📜 Logging bootstrap
// tracing + tracing-subscriber, stderr for CLI mode, file for TUI mode

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log lines go
#[derive(Debug, Clone, PartialEq)]
pub enum LogTarget {
    /// Plain stderr (CLI mode)
    Stderr,

    /// Append to a file (TUI mode, keeps the alternate screen clean)
    File(PathBuf),
}

/// Build the filter: RUST_LOG wins over the configured level
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)
            .context("invalid RUST_LOG directives"),
        _ => EnvFilter::try_new(level).with_context(|| format!("invalid log level `{}`", level)),
    }
}

/// Install the global subscriber.
///
/// Safe to call more than once: a second call leaves the first subscriber in
/// place and returns Ok.
pub fn init_logging(level: &str, target: &LogTarget) -> Result<()> {
    let filter = build_filter(level)?;

    let installed = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
    };

    if installed.is_ok() {
        tracing::debug!(log_target = ?target, level, "logging initialized");
    }

    Ok(())
}
