// src/progress.rs

use anyhow::{Context, Result};
use chrono::Local;
use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::info;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Append-only, timestamped progress log. Every line is also emitted as a
/// tracing event so the console shows the same milestones.
#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `<timestamp> - <message>` to the log file.
    pub fn log(&self, message: &str) -> Result<()> {
        info!("{}", message);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening progress log {}", self.path.display()))?;
        writeln!(
            file,
            "{} - {}",
            Local::now().format(TIMESTAMP_FORMAT),
            message
        )
        .with_context(|| format!("writing progress log {}", self.path.display()))?;
        Ok(())
    }
}
