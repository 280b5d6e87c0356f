use std::sync::Arc;

use crate::application::ports::{DocumentRepository, RepositoryError};
use crate::presentation::config::{DatabaseProviderSetting, DatabaseSettings};

use super::in_memory_document_repository::InMemoryDocumentRepository;
use super::pg_document_repository::PgDocumentRepository;
use super::pg_pool::create_pool;

pub struct DocumentRepositoryFactory;

impl DocumentRepositoryFactory {
    pub async fn create(
        settings: &DatabaseSettings,
    ) -> Result<Arc<dyn DocumentRepository>, RepositoryError> {
        match settings.provider {
            DatabaseProviderSetting::Memory => {
                tracing::warn!("Using in-memory document store; records are lost on restart");
                Ok(Arc::new(InMemoryDocumentRepository::new()))
            }
            DatabaseProviderSetting::Postgres => {
                let url = settings.url.as_deref().ok_or_else(|| {
                    RepositoryError::ConnectionFailed("database.url required for postgres".into())
                })?;
                let pool = create_pool(url, settings.max_connections).await?;
                Ok(Arc::new(PgDocumentRepository::new(pool)))
            }
        }
    }
}
