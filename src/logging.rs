//! Tracing setup for the terminal demo
//!
//! The terminal belongs to the UI, so logs go to a daily-rolling file in the temp dir.
//! Filter with `RUST_LOG`, e.g. `RUST_LOG=numeric_input=debug`.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE: &str = "numeric-input.log";

pub fn log_dir() -> PathBuf {
    std::env::temp_dir().join("numeric-input")
}

/// Install the global subscriber. Keep the guard alive until exit so buffered lines are flushed.
pub fn init() -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir(), LOG_FILE));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(filter),
        )
        .init();
    guard
}
