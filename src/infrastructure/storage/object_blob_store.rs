use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::TryStreamExt;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::domain::StoragePath;

/// `BlobStore` over any `object_store` backend.
pub struct ObjectBlobStore {
    inner: Arc<dyn ObjectStore>,
}

impl ObjectBlobStore {
    pub fn local(base_path: PathBuf) -> Result<Self, BlobStoreError> {
        std::fs::create_dir_all(&base_path)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| BlobStoreError::Configuration(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
        })
    }

    /// Credentials come from `service_account_path` when given, otherwise
    /// from the `GOOGLE_*` environment.
    pub fn gcs(bucket: &str, service_account_path: Option<&str>) -> Result<Self, BlobStoreError> {
        let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(bucket);
        if let Some(path) = service_account_path {
            builder = builder.with_service_account_path(path);
        }
        let store = builder
            .build()
            .map_err(|e| BlobStoreError::Configuration(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(store),
        })
    }
}

fn not_found_or(e: object_store::Error, other: fn(String) -> BlobStoreError) -> BlobStoreError {
    match e {
        object_store::Error::NotFound { path, .. } => BlobStoreError::NotFound(path),
        e => other(e.to_string()),
    }
}

#[async_trait::async_trait]
impl BlobStore for ObjectBlobStore {
    async fn put(&self, path: &StoragePath, data: Bytes) -> Result<u64, BlobStoreError> {
        let size = data.len() as u64;
        self.inner
            .put(&StorePath::from(path.as_str()), PutPayload::from(data))
            .await
            .map_err(|e| BlobStoreError::UploadFailed(e.to_string()))?;
        tracing::debug!(path = %path, size, "Blob stored");
        Ok(size)
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, BlobStoreError> {
        let result = self
            .inner
            .get(&StorePath::from(path.as_str()))
            .await
            .map_err(|e| not_found_or(e, BlobStoreError::DownloadFailed))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| BlobStoreError::DownloadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), BlobStoreError> {
        self.inner
            .delete(&StorePath::from(path.as_str()))
            .await
            .map_err(|e| not_found_or(e, BlobStoreError::DeleteFailed))
    }

    async fn list(&self, prefix: &StoragePath) -> Result<Vec<StoragePath>, BlobStoreError> {
        let prefix = StorePath::from(prefix.as_str());
        let mut paths: Vec<StoragePath> = self
            .inner
            .list(Some(&prefix))
            .map_ok(|meta| StoragePath::from_raw(meta.location.to_string()))
            .try_collect()
            .await
            .map_err(|e| BlobStoreError::ListFailed(e.to_string()))?;
        paths.sort();
        Ok(paths)
    }
}
