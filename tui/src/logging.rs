//! File logging. The alternate screen owns stdout and stderr while the
//! app runs, so diagnostics go to a file under the user state
//! directory instead.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Starts the file logger and returns the guard that flushes it on
/// drop. Quietly does nothing when the platform has no state
/// directory.
pub(crate) fn init(level: &str) -> io::Result<Option<WorkerGuard>> {
    let Some(dir) = log_dir() else {
        return Ok(None);
    };
    fs::create_dir_all(&dir)?;
    let appender = tracing_appender::rolling::never(&dir, "folio-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("folio_tui={level},folio_content={level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    Ok(Some(guard))
}

fn log_dir() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("folio"))
}
