//! Local filesystem storage for uploaded blog media
//!
//! Files live under `<base_dir>/uploads/blog` and are referenced from the
//! database by their path relative to `base_dir` (e.g. `uploads/blog/<uuid>.jpg`),
//! which is also the path they are served under.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::shared::constants::BLOG_UPLOAD_DIR;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid media path: {0}")]
    InvalidPath(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to delete {path}: {source}")]
    Delete {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to prepare upload directory {path}: {source}")]
    Directory {
        path: String,
        source: std::io::Error,
    },
}

/// Filesystem-backed media store
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    base_dir: PathBuf,
}

impl LocalFileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directory that contains `uploads/`
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Create the blog upload directory if it does not exist yet
    pub async fn ensure_upload_dir(&self) -> Result<(), StorageError> {
        let dir = self.base_dir.join(BLOG_UPLOAD_DIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StorageError::Directory {
                path: dir.display().to_string(),
                source,
            })?;
        info!("Upload directory ready: {}", dir.display());
        Ok(())
    }

    /// Pick a fresh relative path for an upload; nothing is written yet
    pub fn allocate_path(&self, extension: &str) -> String {
        format!("{}/{}.{}", BLOG_UPLOAD_DIR, Uuid::new_v4(), extension)
    }

    /// Resolve a stored relative path to a location on disk.
    ///
    /// Only plain relative paths inside the upload tree are accepted.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, StorageError> {
        let path = Path::new(relative);
        let is_plain = path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

        if relative.is_empty() || !is_plain || !path.starts_with(BLOG_UPLOAD_DIR) {
            return Err(StorageError::InvalidPath(relative.to_string()));
        }

        Ok(self.base_dir.join(path))
    }

    pub async fn write(&self, relative: &str, data: &[u8]) -> Result<(), StorageError> {
        let target = self.resolve(relative)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::Directory {
                    path: parent.display().to_string(),
                    source,
                })?;
        }

        tokio::fs::write(&target, data)
            .await
            .map_err(|source| StorageError::Write {
                path: relative.to_string(),
                source,
            })?;

        debug!("Media written: {} ({} bytes)", relative, data.len());
        Ok(())
    }

    /// Delete a stored file. A file that is already gone counts as deleted.
    pub async fn delete(&self, relative: &str) -> Result<(), StorageError> {
        let target = self.resolve(relative)?;

        match tokio::fs::remove_file(&target).await {
            Ok(()) => {
                debug!("Media deleted: {}", relative);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Media already absent: {}", relative);
                Ok(())
            }
            Err(source) => Err(StorageError::Delete {
                path: relative.to_string(),
                source,
            }),
        }
    }

    /// Delete every file in `paths`, continuing past failures.
    ///
    /// Returns the paths that could not be removed.
    pub async fn delete_many<S: AsRef<str>>(&self, paths: &[S]) -> Vec<String> {
        let mut failed = Vec::new();

        for path in paths {
            let path = path.as_ref();
            if let Err(e) = self.delete(path).await {
                warn!("Could not remove media file: {}", e);
                failed.push(path.to_string());
            }
        }

        failed
    }
}
