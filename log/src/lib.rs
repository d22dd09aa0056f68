//! Logging setup for rpe with file output and optional stdout.
//!
//! Logs always go to a file at `warn` level (or higher if `RPE_LOG` is set).
//! Stdout logging is enabled when `RPE_LOG` or `RUST_LOG` is set, or in debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`RPE_LOG`** (highest priority) - rpe-specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for rpe crates
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/rpe/logs/rpe-<pid>.log`
//! - macOS: `~/Library/Application Support/rpe/logs/rpe-12345.log`
//! - Linux: `~/.local/share/rpe/logs/rpe-12345.log`
//!
//! Override with `--log-file <path>` or `RPE_LOG_FILE`.

use std::{
    env,
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Crates whose level follows a bare `RPE_LOG=<level>`
const CRATES: &[&str] = &["rpe_text", "rpe_bin", "rpe_log"];

type InitError = Box<dyn std::error::Error + Send + Sync>;

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Debug, Default)]
pub struct LogConfig {
    /// A file path, or a directory to place the default file name in
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// This function respects the environment variable priority described in the module docs:
/// `RPE_LOG` > `RUST_LOG` > default settings.
///
/// The returned [`LogGuard`] must be held for the lifetime of the program;
/// dropping it flushes and stops the background file writer.
pub fn init(config: LogConfig) -> Result<LogGuard, InitError> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path);

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(create_file_filter());

    let stdout_enabled =
        env::var("RPE_LOG").is_ok() || env::var("RUST_LOG").is_ok() || cfg!(debug_assertions);

    let stdout_layer = if stdout_enabled {
        Some(fmt::layer().with_writer(std::io::stderr).with_filter(create_filter()))
    } else {
        None
    };

    Registry::default()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize logging for tests.
///
/// Stdout only (no file output). Will not crash if called multiple times or if
/// logging is already initialized by another test.
pub fn test() {
    let _ = fmt()
        .with_env_filter(create_filter())
        .with_test_writer()
        .try_init();
}

/// Split an override into directory and file name. A path with an extension
/// names the file; anything else is a directory.
fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("rpe-{}.log", std::process::id());

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            return (dir.to_path_buf(), name);
        }
        return (path, filename);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rpe")
        .join("logs");

    (dir, filename)
}

/// File filter: uses user-specified level if set, otherwise defaults to `warn`.
fn create_file_filter() -> EnvFilter {
    if env::var("RPE_LOG").is_ok() || env::var("RUST_LOG").is_ok() {
        return create_filter();
    }
    EnvFilter::new("warn")
}

/// Create the [`EnvFilter`] for `RPE_LOG` > `RUST_LOG` > defaults.
fn create_filter() -> EnvFilter {
    if let Ok(rpe_log) = env::var("RPE_LOG") {
        return EnvFilter::new(expand_rpe_log(&rpe_log));
    }

    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }

    EnvFilter::new(expand_rpe_log("info"))
}

/// Expand `RPE_LOG` values into full tracing filter directives.
///
/// - `RPE_LOG=debug` becomes `warn,rpe_text=debug,rpe_bin=debug,rpe_log=debug`
/// - `RPE_LOG=rpe_text=trace` is used as-is
fn expand_rpe_log(rpe_log: &str) -> String {
    if rpe_log.contains('=') || rpe_log.contains(':') || rpe_log.contains(',') {
        return rpe_log.to_owned();
    }

    CRATES.iter().fold(String::from("warn"), |mut directives, krate| {
        directives.push_str(&format!(",{krate}={rpe_log}"));
        directives
    })
}
