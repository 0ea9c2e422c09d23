use super::{UploadHandle, UploadStore};
use crate::{Error, Result};
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Stores each upload as its own file in a directory.
pub struct TempDirStore {
    dir: PathBuf,
}

impl TempDirStore {
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir).map_err(|e| {
            Error::Storage(format!(
                "Failed to create upload directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_sync(dir: PathBuf, data: Vec<u8>) -> Result<PathBuf> {
        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(".img")
            .tempfile_in(&dir)?;
        file.write_all(&data)?;
        file.flush()?;

        let (_, path) = file
            .keep()
            .map_err(|e| Error::Storage(format!("Failed to persist upload: {}", e)))?;
        Ok(path)
    }
}

#[async_trait]
impl UploadStore for TempDirStore {
    async fn put(&self, data: &[u8]) -> Result<UploadHandle> {
        let path = tokio::task::spawn_blocking({
            let dir = self.dir.clone();
            let data = data.to_vec();
            move || Self::write_sync(dir, data)
        })
        .await
        .map_err(|e| Error::Storage(format!("Upload write task join error: {}", e)))?
        .map_err(|e| match e {
            Error::Storage(_) => e,
            other => Error::Storage(format!("Failed to write upload: {}", other)),
        })?;

        tracing::debug!("Stored upload at {} ({} bytes)", path.display(), data.len());
        Ok(UploadHandle::new(path.to_string_lossy()))
    }

    async fn read(&self, handle: &UploadHandle) -> Result<Vec<u8>> {
        tokio::fs::read(handle.as_str())
            .await
            .map_err(|e| Error::Storage(format!("Failed to read upload {}: {}", handle, e)))
    }

    async fn delete(&self, handle: &UploadHandle) -> Result<()> {
        match tokio::fs::remove_file(handle.as_str()).await {
            Ok(()) => {
                tracing::debug!("Removed upload {}", handle);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Storage(format!(
                "Failed to remove upload {}: {}",
                handle, e
            ))),
        }
    }
}
