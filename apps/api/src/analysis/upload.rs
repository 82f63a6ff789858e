use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;

/// An upload written to the upload directory under a random name.
/// The file is removed when this value is dropped; removal errors are ignored.
#[derive(Debug)]
pub struct StagedUpload {
    path: PathBuf,
}

impl StagedUpload {
    pub async fn write(dir: &Path, extension: &str, data: &[u8]) -> Result<Self, AppError> {
        let path = dir.join(format!("{}.{extension}", Uuid::new_v4()));
        tokio::fs::write(&path, data)
            .await
            .with_context(|| format!("Failed to stage upload at {}", path.display()))?;
        debug!("Staged {} bytes at {}", data.len(), path.display());
        Ok(Self { path })
    }

    pub async fn read(&self) -> Result<Vec<u8>, AppError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read staged upload at {}", self.path.display()))?;
        Ok(bytes)
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            debug!("Could not remove {}: {e}", self.path.display());
        }
    }
}
