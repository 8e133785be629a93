//! File storage for rendered reports.
//!
//! Reports live flat under a configurable root directory; records store
//! the absolute path. Only "write bytes, read bytes, delete bytes" —
//! atomicity is provided by ordering (the record reaches Completed only
//! after the write finished).

use std::io;
use std::path::{Path, PathBuf};

/// Storage root for rendered report files.
#[derive(Debug, Clone)]
pub struct ReportStore {
    root: PathBuf,
}

impl ReportStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ReportStore { root: root.into() }
    }

    /// Absolute target path for a file name.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Write report bytes, creating the root directory on first use.
    /// Returns the path recorded on the report.
    pub async fn write(&self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.path_for(file_name);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    /// Read a stored report back for download.
    pub async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    /// Remove a stored file. Missing files are not an error: the record
    /// may have failed before the write, or the file was cleaned up
    /// externally.
    pub async fn remove(&self, path: &Path) -> io::Result<()> {
        match tokio::fs::remove_file(path).await {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
