//! Structured logging to stderr.
//!
//! Stdout carries command output only (codes, cron lines, proofs, JSON),
//! so every log line goes to stderr through a non-blocking writer.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Level used when the requested directive does not parse.
pub const FALLBACK_LEVEL: &str = "info";

/// Install the global subscriber.
///
/// Keep the returned guard alive until exit so buffered lines are flushed.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(directive: &str) -> anyhow::Result<WorkerGuard> {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL));

    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))?;

    Ok(guard)
}
