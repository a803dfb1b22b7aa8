//! Logging setup for hledit
//!
//! The terminal belongs to the editor, so logs only ever go to a file.
//!
//! ## Environment Variables
//!
//! 1. **`HLEDIT_LOG`** (highest priority) - filter directives for hledit
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn`
//!
//! The log file is `HLEDIT_LOG_FILE` if set, otherwise
//! `<temp dir>/hledit-<pid>.log`.

use std::env;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

/// Initialize file logging.
pub fn init() -> Result<LogGuard, Box<dyn std::error::Error + Send + Sync>> {
    let log_file = env::var_os("HLEDIT_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join(format!("hledit-{}.log", std::process::id())));

    let dir = log_file.parent().unwrap_or_else(|| Path::new("."));
    let filename = log_file
        .file_name()
        .ok_or("log file path has no file name")?;
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, filename);
    let (writer, file_guard) = tracing_appender::non_blocking(file_appender);

    fmt()
        .with_env_filter(create_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file,
    })
}

/// Priority: `HLEDIT_LOG` > `RUST_LOG` > `warn`
fn create_filter() -> EnvFilter {
    if let Ok(filter) = env::var("HLEDIT_LOG") {
        return EnvFilter::new(filter);
    }
    if let Ok(filter) = env::var("RUST_LOG") {
        return EnvFilter::new(filter);
    }
    EnvFilter::new("warn")
}
