use std::env;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "sikdan.log";
const DEFAULT_FILTER: &str = "info";

/// Route `tracing` output to a file in the temp directory.
///
/// The terminal belongs to the UI, so nothing is written to stdout. The
/// returned guard flushes pending lines when dropped and must outlive the UI.
pub(crate) fn init() -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(env::temp_dir(), LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(non_blocking);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
