//! Tracing subscriber setup
//!
//! One-shot commands log to stderr. The interactive `watch` session owns
//! the terminal, so its logs go to a daily rolling file instead.

use crate::system_config::SystemConfig;
use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

/// Install the global subscriber
///
/// For `LogTarget::File` the returned guard must be held until exit so
/// buffered lines are flushed.
pub fn init(config: &SystemConfig, target: LogTarget) -> Result<Option<WorkerGuard>> {
    let level: Level = config
        .log
        .level
        .parse()
        .context("Invalid log level")?;

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
            Ok(None)
        }
        LogTarget::File => {
            let dir = config.log_dir()?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::daily(&dir, "mq.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
    }
}
