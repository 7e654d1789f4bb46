use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Log file name inside the log directory.
pub const LOG_FILE_NAME: &str = "mazewalk.log";
/// Environment variable overriding the log directory.
pub const LOG_DIR_ENV: &str = "MAZEWALK_LOG_DIR";

/// Level filter from `RUST_LOG`, defaulting to `info`.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log directory from [`LOG_DIR_ENV`], defaulting to the working directory.
pub fn log_dir() -> String {
    std::env::var(LOG_DIR_ENV).unwrap_or_else(|_| ".".to_string())
}

/// Send logs to a file, leaving the terminal to the interactive UI.
/// Logs are flushed until the returned guard is dropped, so keep it alive for the whole run.
pub fn init_file_logging(dir: impl AsRef<Path>) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

/// Send logs to stderr.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}
