use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::domain::StagingPath;

/// Uploads area on the local filesystem. The directory is created on startup.
pub struct LocalStagingStore {
    inner: Arc<LocalFileSystem>,
    base_path: PathBuf,
}

impl LocalStagingStore {
    pub fn new(base_path: PathBuf) -> Result<Self, StagingStoreError> {
        std::fs::create_dir_all(&base_path).map_err(StagingStoreError::Io)?;
        let base_path = base_path.canonicalize().map_err(StagingStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| StagingStoreError::WriteFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            base_path,
        })
    }
}

#[async_trait::async_trait]
impl StagingStore for LocalStagingStore {
    async fn store(&self, path: &StagingPath, data: Bytes) -> Result<PathBuf, StagingStoreError> {
        let store_path = StorePath::from(path.as_str());
        self.inner
            .put(&store_path, PutPayload::from(data))
            .await
            .map_err(|e| StagingStoreError::WriteFailed(e.to_string()))?;
        Ok(self.base_path.join(path.as_str()))
    }

    async fn delete(&self, path: &StagingPath) -> Result<(), StagingStoreError> {
        let store_path = StorePath::from(path.as_str());
        match self.inner.delete(&store_path).await {
            Ok(()) => Ok(()),
            // already gone is fine; cleanup must never fail a finished request
            Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(StagingStoreError::DeleteFailed(e.to_string())),
        }
    }

    async fn exists(&self, path: &StagingPath) -> Result<bool, StagingStoreError> {
        let store_path = StorePath::from(path.as_str());
        match self.inner.head(&store_path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(StagingStoreError::LookupFailed(e.to_string())),
        }
    }
}
