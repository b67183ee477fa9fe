//! Logging setup and configuration

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub struct LoggingGuard {
    pub _guard: tracing_appender::non_blocking::WorkerGuard,
}

pub fn setup_logging(logs_dir: &Path) -> Result<Arc<LoggingGuard>> {
    let file_appender = tracing_appender::rolling::hourly(logs_dir, "v3-pool-workbench.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_ansi(true)
                .with_level(true)
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_ansi(false)
                .compact()
        )
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse()?)
        )
        .init();

    Ok(Arc::new(LoggingGuard { _guard: guard }))
}

/// Creates `logs/` and `reports/` under the output directory.
pub fn setup_output_directories(output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir.join("logs"))?;
    std::fs::create_dir_all(output_dir.join("reports"))?;
    Ok(())
}
