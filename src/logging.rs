use anyhow::Context;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use std::path::Path;

const LOG_BASENAME: &str = "kiyo";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Starts rotating file logging under `<data_dir>/logs`.  Log lines must
/// never reach the terminal while the TUI owns it, so there is no stderr
/// fallback.  The returned handle has to stay alive for the life of the
/// process.
pub(crate) fn init(data_dir: &Path) -> anyhow::Result<LoggerHandle> {
    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    Logger::try_with_env_or_str("info")
        .context("failed to configure logging")?
        .log_to_file(FileSpec::default().directory(log_dir).basename(LOG_BASENAME))
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .start()
        .context("failed to start logging")
}
