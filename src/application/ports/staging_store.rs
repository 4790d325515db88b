use std::io;
use std::path::PathBuf;

use bytes::Bytes;

use crate::domain::StagingPath;

/// Holds in-flight request audio in the uploads area between upload and inference.
#[async_trait::async_trait]
pub trait StagingStore: Send + Sync {
    /// Writes the recording bytes and returns the on-disk location the
    /// transcription engine will read from.
    async fn store(&self, path: &StagingPath, data: Bytes) -> Result<PathBuf, StagingStoreError>;

    /// Removes a staged recording. A path that no longer exists is not an error.
    async fn delete(&self, path: &StagingPath) -> Result<(), StagingStoreError>;

    async fn exists(&self, path: &StagingPath) -> Result<bool, StagingStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StagingStoreError {
    #[error("staging write failed: {0}")]
    WriteFailed(String),
    #[error("staging delete failed: {0}")]
    DeleteFailed(String),
    #[error("staging lookup failed: {0}")]
    LookupFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
