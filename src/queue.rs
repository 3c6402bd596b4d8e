//! Batch conversion of a queue directory.
//!
//! Each pending `.txt` file is converted into the output directory and then
//! moved to the archive directory. A file that fails is logged and left in
//! the queue for inspection; the remaining files are still processed.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::convert::{Converter, INPUT_EXTENSION};
use crate::storage::config::QueueSettings;

/// Errors that stop a whole batch.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list queue directory '{path}': {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Inputs converted and archived
    pub converted: Vec<PathBuf>,
    /// Inputs that failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn is_empty(&self) -> bool {
        self.converted.is_empty() && self.failed.is_empty()
    }
}

/// Pending `.txt` files in the queue directory, sorted by file name.
pub fn pending_files(queue_dir: &Path) -> Result<Vec<PathBuf>, QueueError> {
    let entries = std::fs::read_dir(queue_dir).map_err(|source| QueueError::ListDir {
        path: queue_dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(INPUT_EXTENSION))
        })
        .collect();
    files.sort();
    Ok(files)
}

fn ensure_dir(path: &Path) -> Result<(), QueueError> {
    std::fs::create_dir_all(path).map_err(|source| QueueError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Convert every pending file in the queue.
pub fn process_queue(
    converter: &Converter,
    settings: &QueueSettings,
) -> Result<BatchReport, QueueError> {
    ensure_dir(&settings.output_dir)?;
    ensure_dir(&settings.archive_dir)?;

    let mut report = BatchReport::default();

    if !settings.queue_dir.is_dir() {
        tracing::info!(
            "Queue directory {} does not exist",
            settings.queue_dir.display()
        );
        return Ok(report);
    }

    let files = pending_files(&settings.queue_dir)?;
    if files.is_empty() {
        tracing::info!("No txt files found in queue directory");
        return Ok(report);
    }

    for file in files {
        let display_name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        tracing::info!("Processing: {}", display_name);

        match process_one(converter, &file, settings) {
            Ok(archived) => {
                tracing::info!("Moved to: {}", archived.display());
                report.converted.push(file);
            }
            Err(message) => {
                tracing::error!("Error processing {}: {}", display_name, message);
                report.failed.push((file, message));
            }
        }
    }

    Ok(report)
}

fn process_one(
    converter: &Converter,
    file: &Path,
    settings: &QueueSettings,
) -> Result<PathBuf, String> {
    let output = converter
        .convert_file(file, &settings.output_dir)
        .map_err(|e| e.to_string())?;

    tracing::info!("Created: {}", output.zwo_path.display());
    if let Some(chart) = &output.chart_path {
        tracing::info!("Generated: {}", chart.display());
    }

    let file_name = file
        .file_name()
        .ok_or_else(|| format!("{} has no file name", file.display()))?;
    let archived = settings.archive_dir.join(file_name);
    std::fs::rename(file, &archived)
        .map_err(|e| format!("failed to move to {}: {}", archived.display(), e))?;

    Ok(archived)
}
