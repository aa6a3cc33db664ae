//! Structured logging infrastructure for tgdigest

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::Result;

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "tgdigest=debug")
    pub level: String,
    /// Optional file path for log output, in addition to the console
    pub file: Option<PathBuf>,
    /// Whether to use ANSI colors on the console
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            ansi: true,
        }
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Output always goes to stdout; when a log file is configured, a second
/// non-blocking layer writes the same events to the file without ANSI codes.
/// The returned guard must be held for the lifetime of the process so that
/// buffered file output is flushed on shutdown.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_new(&config.level)
        .or_else(|_| EnvFilter::try_new("info"))
        .expect("static fallback filter is valid");

    let console_layer = fmt::layer().with_ansi(config.ansi).with_target(true);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    match &config.file {
        Some(path) => {
            let (directory, file_name) = split_log_path(path);
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            registry
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .init();

            Ok(Some(guard))
        }
        None => {
            registry.init();
            Ok(None)
        }
    }
}

/// Split a log file path into the (directory, file name) pair the file
/// appender expects. A bare file name logs into the working directory.
fn split_log_path(path: &Path) -> (PathBuf, PathBuf) {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tgdigest.log"));
    (directory, file_name)
}
