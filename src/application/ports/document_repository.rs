use async_trait::async_trait;

use crate::domain::{Document, DocumentId, DocumentStatus, UserId};

use super::RepositoryError;

/// Document metadata keyed by `(owner, id)`.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn create(&self, document: &Document) -> Result<(), RepositoryError>;

    async fn get(
        &self,
        owner: &UserId,
        id: DocumentId,
    ) -> Result<Option<Document>, RepositoryError>;

    /// Moves a `processing` document to a terminal status in one write.
    /// Fails with `InvalidTransition` if the document is already terminal.
    async fn update_status(
        &self,
        owner: &UserId,
        id: DocumentId,
        status: &DocumentStatus,
    ) -> Result<(), RepositoryError>;
}
