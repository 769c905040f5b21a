//! Local scratch storage for spreadsheet uploads and exports
//!
//! Files here are transient: uploads are discarded right after an import and
//! exports are reclaimed by a periodic sweep.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::config::ScratchConfig;
use crate::core::error::{AppError, Result};

pub struct ScratchStorage {
    upload_dir: PathBuf,
    export_dir: PathBuf,
    retention: Duration,
    sweep_interval: Duration,
    last_sweep: Mutex<Option<Instant>>,
}

impl ScratchStorage {
    pub fn new(config: &ScratchConfig) -> Self {
        Self {
            upload_dir: config.upload_dir.clone(),
            export_dir: config.export_dir.clone(),
            retention: config.retention,
            sweep_interval: config.sweep_interval,
            last_sweep: Mutex::new(None),
        }
    }

    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        for dir in [&self.upload_dir, &self.export_dir] {
            if tokio::fs::metadata(dir).await.is_err() {
                tokio::fs::create_dir_all(dir).await?;
                info!("Scratch directory created: {}", dir.display());
            }
        }
        Ok(())
    }

    /// Persist an uploaded workbook under a generated name, keeping only the
    /// original extension.
    pub async fn save_upload(&self, original_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or("xlsx");
        let path = self
            .upload_dir
            .join(format!("{}.{}", Uuid::now_v7(), extension));

        write_file(&self.upload_dir, &path, bytes).await?;
        debug!("Upload saved to {}", path.display());
        Ok(path)
    }

    /// Keep a copy of a generated export until the sweep reclaims it.
    pub async fn save_export(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self
            .export_dir
            .join(format!("{}-{}", Uuid::now_v7(), file_name));

        write_file(&self.export_dir, &path, bytes).await?;
        debug!("Export saved to {}", path.display());
        Ok(path)
    }

    /// Best effort removal; failures are only logged.
    pub async fn discard(&self, path: &Path) {
        if let Err(e) = tokio::fs::remove_file(path).await {
            warn!("Failed to delete scratch file {}: {}", path.display(), e);
        }
    }

    /// Remove files older than the retention window from both directories.
    /// Returns how many files were deleted.
    pub async fn sweep(&self) -> usize {
        let mut removed = 0;
        for dir in [&self.upload_dir, &self.export_dir] {
            match sweep_dir(dir, self.retention).await {
                Ok(count) => removed += count,
                Err(e) => warn!("Error cleaning up folder {}: {}", dir.display(), e),
            }
        }
        removed
    }

    /// Start a detached sweep unless one ran within the sweep interval.
    pub fn sweep_if_due(self: &Arc<Self>) {
        {
            let mut last = match self.last_sweep.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if last.is_some_and(|at| at.elapsed() < self.sweep_interval) {
                return;
            }
            *last = Some(Instant::now());
        }

        let storage = Arc::clone(self);
        tokio::spawn(async move {
            let removed = storage.sweep().await;
            if removed > 0 {
                debug!("Scratch sweep removed {} files", removed);
            }
        });
    }
}

async fn write_file(dir: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        tracing::error!("Failed to create scratch directory {}: {:?}", dir.display(), e);
        AppError::Internal(format!("Failed to create scratch directory: {}", e))
    })?;
    tokio::fs::write(path, bytes).await.map_err(|e| {
        tracing::error!("Failed to write scratch file {}: {:?}", path.display(), e);
        AppError::Internal(format!("Failed to write scratch file: {}", e))
    })
}

async fn sweep_dir(dir: &Path, retention: Duration) -> std::io::Result<usize> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let mut removed = 0;
    while let Some(entry) = entries.next_entry().await? {
        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }

        let age = metadata
            .modified()
            .ok()
            .and_then(|modified| modified.elapsed().ok())
            .unwrap_or_default();
        if age < retention {
            continue;
        }

        let path = entry.path();
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted file: {}", path.display());
                removed += 1;
            }
            Err(e) => warn!("Failed to delete file: {}, error: {}", path.display(), e),
        }
    }

    Ok(removed)
}
