//! Process-wide logging: timestamped lines to stdout and a daily file.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_DIR: &str = "log";

/// Installs the global subscriber. The file sink is named by the run's
/// start date, so every run started on one day appends to the same file.
pub fn init(log_dir: &str) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {log_dir}"))?;
    let file_name = format!("log_{}.log", chrono::Local::now().format("%Y%m%d"));
    let path = Path::new(log_dir).join(file_name);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(io::stdout))
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
        .init();
    Ok(())
}
