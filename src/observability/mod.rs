//! Logging setup
//!
//! Installs a `tracing` subscriber with a console layer on stderr and an
//! optional non-blocking file layer. `RUST_LOG` takes precedence over the
//! configured level.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// Keeps the file writer flushing until dropped
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber.
///
/// A log directory that cannot be created downgrades to console-only
/// logging with a warning on stderr. Calling this twice leaves the first
/// subscriber in place.
pub fn init(config: &LoggingConfig) -> LogGuard {
    let mut guard = None;
    let file_layer = match config.directory.as_deref() {
        Some(dir) => match ensure_dir(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::never(dir, &config.file_name);
                let (writer, worker) = tracing_appender::non_blocking(appender);
                guard = Some(worker);
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_filter(env_filter(&config.level)),
                )
            }
            Err(err) => {
                eprintln!(
                    "Warning: failed to create log directory {}: {}",
                    dir.display(),
                    err
                );
                None
            }
        },
        None => None,
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter(&config.level));

    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init();

    LogGuard { _file: guard }
}

fn ensure_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}
