use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::presentation::config::{StorageProviderSetting, StorageSettings};

use super::object_blob_store::ObjectBlobStore;

pub struct BlobStoreFactory;

impl BlobStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn BlobStore>, BlobStoreError> {
        match settings.provider {
            StorageProviderSetting::Local => {
                tracing::info!(path = %settings.local_path, "Using local blob store");
                let store = ObjectBlobStore::local(PathBuf::from(&settings.local_path))?;
                Ok(Arc::new(store))
            }
            StorageProviderSetting::Gcs => {
                let bucket = settings.bucket.as_deref().ok_or_else(|| {
                    BlobStoreError::Configuration("storage.bucket required for gcs".into())
                })?;
                tracing::info!(bucket, "Using Google Cloud Storage blob store");
                let store =
                    ObjectBlobStore::gcs(bucket, settings.service_account_path.as_deref())?;
                Ok(Arc::new(store))
            }
        }
    }
}
