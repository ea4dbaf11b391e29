//! Logging infrastructure for geohashing.
//!
//! Provides structured logging with file output and console output:
//! - Appends to `~/.geohashing/geohashing.log` by default
//! - Mirrors warnings (or everything, when verbose) to stderr so that
//!   stdout stays clean for command output
//! - Configurable via RUST_LOG environment variable

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
    log_file: PathBuf,
}

impl LoggingGuard {
    /// Path of the log file being written.
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}

/// Initialize logging system.
///
/// Creates the log directory if needed and sets up output to both the log
/// file and stderr.
///
/// # Arguments
///
/// * `log_file` - Log file path (e.g., `~/.geohashing/geohashing.log`)
/// * `verbose` - Mirror every enabled event to stderr instead of warnings only
///
/// # Errors
///
/// Returns error if the log path has no file name or the directory cannot be
/// created.
pub fn init_logging(log_file: &Path, verbose: bool) -> Result<LoggingGuard, io::Error> {
    let (log_dir, file_name) = split_log_path(log_file)?;
    fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true);

    let stderr_level = if verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::WARN
    };
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .with_filter(stderr_level);

    // Defaults to INFO if RUST_LOG not set
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
        log_file: log_file.to_path_buf(),
    })
}

/// Splits a log file path into its directory and file name.
fn split_log_path(log_file: &Path) -> Result<(PathBuf, String), io::Error> {
    let file_name = log_file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("log path has no file name: {}", log_file.display()),
            )
        })?
        .to_string();

    let log_dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((log_dir, file_name))
}
