use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to prepare upload directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write upload {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read upload {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Directory holding uploads for the duration of a single request.
#[derive(Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn persist(&self, image_data: &[u8]) -> Result<TransientUpload, StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: self.dir.clone(),
                source,
            })?;

        // Guard exists before the write so a partial file is still removed.
        let upload = TransientUpload {
            path: self.dir.join(Uuid::new_v4().simple().to_string()),
        };
        tokio::fs::write(&upload.path, image_data)
            .await
            .map_err(|source| StorageError::Write {
                path: upload.path.clone(),
                source,
            })?;

        log::debug!("Stored upload at {} ({} bytes)", upload.path().display(), image_data.len());
        Ok(upload)
    }
}

/// An upload on disk. The file is deleted when this value is dropped.
#[derive(Debug)]
pub struct TransientUpload {
    path: PathBuf,
}

impl TransientUpload {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&self) -> Result<Vec<u8>, StorageError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| StorageError::Read {
                path: self.path.clone(),
                source,
            })
    }
}

impl Drop for TransientUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => log::debug!("Removed upload {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to remove upload {}: {}", self.path.display(), e),
        }
    }
}
