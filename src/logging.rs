//! Logging setup for the demo host.
//!
//! The host owns the terminal, so logs only go to a file.
//!
//! ## Environment Variables
//!
//! 1. **`VI_FIELD_LOG`** (highest priority) - level or full filter for this crate
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn`
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/vi-field/logs/vi-field-<pid>.log`.
//! Override with `--log-file <path>`; a path without an extension is a directory.

use crate::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

pub fn init(log_file: Option<PathBuf>) -> Result<LogGuard> {
    let (log_dir, filename) = resolve_log_path(log_file);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(create_filter());

    Registry::default()
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize logging for tests. Safe to call more than once.
pub fn test() {
    let _ = fmt().with_env_filter(create_filter()).with_test_writer().try_init();
}

fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("vi-field-{}.log", std::process::id());

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            return (dir, name);
        }
        return (path, filename);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vi-field")
        .join("logs");
    (dir, filename)
}

/// `VI_FIELD_LOG` > `RUST_LOG` > `warn`.
fn create_filter() -> EnvFilter {
    if let Ok(level) = env::var("VI_FIELD_LOG") {
        return expand_crate_log(&level);
    }
    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }
    EnvFilter::new("warn")
}

/// `VI_FIELD_LOG=debug` becomes `warn,vi_field=debug`; anything with filter syntax is used as-is.
fn expand_crate_log(level: &str) -> EnvFilter {
    if level.contains('=') || level.contains(':') || level.contains(',') {
        return EnvFilter::new(level);
    }
    EnvFilter::new(format!("warn,vi_field={level}"))
}
