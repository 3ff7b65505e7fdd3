//! File logging
//!
//! The terminal belongs to the UI, so log output goes to a daily rolling file.
//! Filtering follows `RUST_LOG`, defaulting to `comments_tui=info`.

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_NAME: &str = "comments-tui.log";

/// Install the global subscriber
///
/// The returned guard flushes buffered lines when dropped; keep it alive for
/// the lifetime of the program.
pub fn init_logging(log_dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "comments_tui=info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_line_number(true)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(guard)
}
