//! File download sink
//!
//! The terminal counterpart of a browser download: the CSV text lands in the
//! configured download directory as `<base_name>.csv`.

use crate::error::ExportError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

/// Something that can hand generated CSV text to the user
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Store `contents` under `base_name` and return where it went
    async fn download(&self, contents: &str, base_name: &str) -> Result<PathBuf, ExportError>;
}

/// Writes downloads into a directory
///
/// The file is written next to its destination and renamed into place, so a
/// failed write never leaves a truncated CSV behind.
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn target_path(&self, base_name: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", base_name))
    }

    fn partial_path(&self, base_name: &str) -> PathBuf {
        self.dir.join(format!(".{}.csv.part", base_name))
    }
}

/// Remove a leftover temp file after a failed download
async fn discard(partial: &Path) {
    if let Err(e) = fs::remove_file(partial).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %partial.display(), error = %e, "could not remove partial download");
        }
    }
}

#[async_trait]
impl Downloader for DirectoryDownloader {
    async fn download(&self, contents: &str, base_name: &str) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ExportError::Download {
                path: self.dir.clone(),
                source,
            })?;

        let target = self.target_path(base_name);
        let partial = self.partial_path(base_name);

        if let Err(source) = fs::write(&partial, contents).await {
            discard(&partial).await;
            return Err(ExportError::Download {
                path: partial,
                source,
            });
        }

        if let Err(source) = fs::rename(&partial, &target).await {
            discard(&partial).await;
            return Err(ExportError::Download {
                path: target,
                source,
            });
        }

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_download_writes_named_csv() {
        let dir = TempDir::new().unwrap();
        let downloader = DirectoryDownloader::new(dir.path());

        let path = downloader.download("id\n1\n", "comments").await.unwrap();

        assert_eq!(path, dir.path().join("comments.csv"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "id\n1\n");
        assert!(!dir.path().join(".comments.csv.part").exists());
    }

    #[tokio::test]
    async fn test_download_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("exports").join("today");
        let downloader = DirectoryDownloader::new(&nested);

        let path = downloader.download("id\n", "comments").await.unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_download_overwrites_previous_file() {
        let dir = TempDir::new().unwrap();
        let downloader = DirectoryDownloader::new(dir.path());

        downloader.download("old\n", "comments").await.unwrap();
        let path = downloader.download("new\n", "comments").await.unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "new\n");
    }

    #[tokio::test]
    async fn test_failed_rename_leaves_no_partial_file() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory in the way of the target
        let blocker = dir.path().join("comments.csv");
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), "x").unwrap();
        let downloader = DirectoryDownloader::new(dir.path());

        let err = downloader.download("id\n", "comments").await.unwrap_err();

        assert!(matches!(err, ExportError::Download { ref path, .. } if *path == blocker));
        assert!(!dir.path().join(".comments.csv.part").exists());
    }

    #[tokio::test]
    async fn test_discard_ignores_missing_file() {
        let dir = TempDir::new().unwrap();
        let partial = dir.path().join(".comments.csv.part");
        std::fs::write(&partial, "half").unwrap();

        discard(&partial).await;
        assert!(!partial.exists());
        discard(&partial).await;
    }
}
