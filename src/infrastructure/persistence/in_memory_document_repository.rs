use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::application::ports::{DocumentRepository, RepositoryError};
use crate::domain::{Document, DocumentId, DocumentStatus, UserId};

/// Process-local store with the same transition rules as the PostgreSQL one.
#[derive(Default)]
pub struct InMemoryDocumentRepository {
    documents: RwLock<HashMap<(UserId, DocumentId), Document>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn create(&self, document: &Document) -> Result<(), RepositoryError> {
        let mut documents = self.documents.write().await;
        let key = (document.owner.clone(), document.id);
        if documents.contains_key(&key) {
            return Err(RepositoryError::QueryFailed(format!(
                "document {} already exists",
                document.id
            )));
        }
        documents.insert(key, document.clone());
        Ok(())
    }

    async fn get(
        &self,
        owner: &UserId,
        id: DocumentId,
    ) -> Result<Option<Document>, RepositoryError> {
        Ok(self
            .documents
            .read()
            .await
            .get(&(owner.clone(), id))
            .cloned())
    }

    async fn update_status(
        &self,
        owner: &UserId,
        id: DocumentId,
        status: &DocumentStatus,
    ) -> Result<(), RepositoryError> {
        if !status.is_terminal() {
            return Err(RepositoryError::InvalidTransition(
                "cannot move a document back to processing".to_string(),
            ));
        }

        let mut documents = self.documents.write().await;
        let document = documents
            .get_mut(&(owner.clone(), id))
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        if document.status.is_terminal() {
            return Err(RepositoryError::InvalidTransition(format!(
                "document {id} is already terminal"
            )));
        }

        document.status = status.clone();
        document.updated_at = Utc::now();
        Ok(())
    }
}
