use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `TYPEWELL_LOG=typewell=debug`.
pub const LOG_ENV: &str = "TYPEWELL_LOG";
const LOG_FILE: &str = "typewell.log";

pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("typewell")
}

/// Send tracing output to a file, since the terminal belongs to the UI.
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init_tracing(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("typewell=info"));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_creates_log_dir_and_rejects_second_subscriber() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("logs");
        let guard = init_tracing(&nested).unwrap();
        assert!(nested.is_dir());
        tracing::info!("logging initialised");

        assert!(init_tracing(&nested).is_err());
        drop(guard);
    }
}
