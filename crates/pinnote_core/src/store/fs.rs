//! Filesystem-backed backup channel.
//!
//! # Responsibility
//! - Write and read named backup files inside one owned directory.
//!
//! # Invariants
//! - Backup names never traverse outside the configured directory.
//! - Writes replace the previous file content as a whole.

use crate::store::{BackupChannel, StoreError, StoreResult};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Backup channel writing UTF-8 files into a fixed directory, typically the
/// app's documents directory.
#[derive(Debug, Clone)]
pub struct FsBackupChannel {
    dir: PathBuf,
}

impl FsBackupChannel {
    /// Uses `dir` as the backup location. The directory is created on the
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn resolve(&self, name: &str) -> StoreResult<PathBuf> {
        let candidate = Path::new(name);
        let is_plain_file_name = candidate
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
            && candidate.components().count() == 1;
        if !is_plain_file_name {
            return Err(StoreError::Backend(format!(
                "backup name must be a plain file name, got `{name}`"
            )));
        }
        Ok(self.dir.join(candidate))
    }
}

#[async_trait]
impl BackupChannel for FsBackupChannel {
    async fn write(&self, name: &str, content: &str) -> StoreResult<()> {
        let path = self.resolve(name)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, content.as_bytes()).await?;
        Ok(())
    }

    async fn read(&self, name: &str) -> StoreResult<Option<String>> {
        let path = self.resolve(name)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
