//! Generated image storage
//!
//! Flat directory of PNG files written by the generation pipeline and served
//! back through `/api/images/{filename}`. The directory is capped by file
//! count: after every generation the oldest files beyond the cap are removed.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use tokio::fs;

/// Errors from the image store
#[derive(Error, Debug)]
pub enum StorageError {
    /// No file with that name
    #[error("Image not found: {0}")]
    NotFound(String),

    /// Name contains path components or is otherwise unusable
    #[error("Invalid image name: {0}")]
    InvalidName(String),

    /// Underlying filesystem error
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being accessed
        path: String,
        /// Source error
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Image directory
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Open the store, creating the directory if needed
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::io(&dir, e))?;
        Ok(Self { dir })
    }

    /// Directory backing this store
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for the `index`-th image of a task
    ///
    /// Format: `{task_id}_{index}_{YYYYmmdd_HHMMSS_micros}.png`
    pub fn image_filename(task_id: &str, index: usize, at: DateTime<Local>) -> String {
        format!(
            "{}_{}_{}.png",
            task_id,
            index,
            at.format("%Y%m%d_%H%M%S_%6f")
        )
    }

    /// Check a client-supplied file name and join it to the directory
    ///
    /// Only bare file names are accepted.
    pub fn path_for(&self, filename: &str) -> Result<PathBuf, StorageError> {
        let valid = !filename.is_empty()
            && !filename.starts_with('.')
            && !filename.contains(|c| c == '/' || c == '\\')
            && !filename.contains("..");
        if !valid {
            return Err(StorageError::InvalidName(filename.to_string()));
        }
        Ok(self.dir.join(filename))
    }

    /// Write an image, returning its full path
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.path_for(filename)?;
        fs::write(&path, bytes)
            .await
            .map_err(|e| StorageError::io(&path, e))?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "Saved image");
        Ok(path)
    }

    /// Read an image by file name
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(filename)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(filename.to_string()))
            }
            Err(e) => Err(StorageError::io(&path, e)),
        }
    }

    /// Regular files in the store with their age key, oldest first
    async fn files_by_age(&self) -> Result<Vec<(SystemTime, PathBuf)>, StorageError> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|e| StorageError::io(&self.dir, e))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::io(&self.dir, e))?
        {
            let metadata = match entry.metadata().await {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!(path = %entry.path().display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }
            let age = metadata
                .created()
                .or_else(|_| metadata.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            files.push((age, entry.path()));
        }

        files.sort();
        Ok(files)
    }

    /// Number of images currently stored
    pub async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.files_by_age().await?.len())
    }

    /// Delete the oldest images until at most `max_count` remain
    ///
    /// Files that cannot be removed are logged and skipped.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of files deleted
    pub async fn cleanup(&self, max_count: usize) -> Result<usize, StorageError> {
        let files = self.files_by_age().await?;
        if files.len() <= max_count {
            return Ok(0);
        }

        let excess = files.len() - max_count;
        let mut deleted = 0;
        for (_, path) in files.into_iter().take(excess) {
            match fs::remove_file(&path).await {
                Ok(()) => deleted += 1,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to delete old image");
                }
            }
        }

        tracing::info!(deleted = deleted, max_count = max_count, "Image cleanup finished");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_creates_directory() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let nested = temp_dir.path().join("outputs").join("images");

        let store = ImageStore::open(&nested).await.expect("Failed to open store");
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_image_filename_format() {
        let at = Local.with_ymd_and_hms(2026, 3, 9, 14, 5, 7).unwrap();
        let name = ImageStore::image_filename("task-1", 4, at);
        assert_eq!(name, "task-1_4_20260309_140507_000000.png");
    }

    #[tokio::test]
    async fn test_save_and_read() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let store = ImageStore::open(temp_dir.path()).await.unwrap();

        store.save("a.png", b"bytes").await.unwrap();
        assert_eq!(store.read("a.png").await.unwrap(), b"bytes");
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let store = ImageStore::open(temp_dir.path()).await.unwrap();

        match store.read("missing.png").await.unwrap_err() {
            StorageError::NotFound(name) => assert_eq!(name, "missing.png"),
            other => panic!("Expected NotFound error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_path_traversal_is_rejected() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let store = ImageStore::open(temp_dir.path()).await.unwrap();

        for name in ["../secret.png", "a/b.png", "..", ".env", "", "a\\b.png"] {
            assert!(
                matches!(store.path_for(name), Err(StorageError::InvalidName(_))),
                "{} should be rejected",
                name
            );
        }
    }

    #[tokio::test]
    async fn test_cleanup_removes_oldest_files() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let store = ImageStore::open(temp_dir.path()).await.unwrap();

        for name in ["a.png", "b.png", "c.png", "d.png", "e.png"] {
            store.save(name, b"x").await.unwrap();
            tokio::time::sleep(Duration::from_millis(15)).await;
        }
        std::fs::create_dir(temp_dir.path().join("subdir")).unwrap();

        let deleted = store.cleanup(3).await.unwrap();

        assert_eq!(deleted, 2);
        assert_eq!(store.count().await.unwrap(), 3);
        assert!(!temp_dir.path().join("a.png").exists());
        assert!(!temp_dir.path().join("b.png").exists());
        assert!(temp_dir.path().join("e.png").exists());
        assert!(temp_dir.path().join("subdir").exists());
    }

    #[tokio::test]
    async fn test_cleanup_under_limit_is_noop() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let store = ImageStore::open(temp_dir.path()).await.unwrap();
        store.save("a.png", b"x").await.unwrap();

        assert_eq!(store.cleanup(1).await.unwrap(), 0);
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
