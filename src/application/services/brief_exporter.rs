use std::sync::Arc;

use crate::application::ports::{BriefRenderer, DocumentRepository, RenderError, RepositoryError};
use crate::domain::{BriefSections, DocumentId, UserId};

#[derive(Debug, Clone)]
pub struct ExportedBrief {
    pub filename: String,
    pub content_type: &'static str,
    pub content: Vec<u8>,
}

pub struct BriefExporter {
    repository: Arc<dyn DocumentRepository>,
    renderer: Arc<dyn BriefRenderer>,
}

impl BriefExporter {
    pub fn new(repository: Arc<dyn DocumentRepository>, renderer: Arc<dyn BriefRenderer>) -> Self {
        Self {
            repository,
            renderer,
        }
    }

    #[tracing::instrument(skip(self), fields(owner = %owner, document_id = %id))]
    pub async fn export(&self, owner: &UserId, id: DocumentId) -> Result<ExportedBrief, ExportError> {
        let document = self
            .repository
            .get(owner, id)
            .await?
            .ok_or(ExportError::NotFound(id))?;

        let Some(brief) = document.brief() else {
            return Err(ExportError::NotReady {
                id,
                status: document.status.as_str(),
            });
        };

        let sections = BriefSections::parse(brief);
        for heading in sections.missing() {
            tracing::warn!(heading = %heading, "Missing section in brief");
        }

        let content = self.renderer.render(&sections)?;
        tracing::info!(bytes = content.len(), "Brief rendered");

        Ok(ExportedBrief {
            filename: format!("brief_{}.{}", id, self.renderer.extension()),
            content_type: self.renderer.content_type(),
            content,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("document not found: {0}")]
    NotFound(DocumentId),
    #[error("document {id} is not ready (status: {status})")]
    NotReady { id: DocumentId, status: &'static str },
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error("render: {0}")]
    Render(#[from] RenderError),
}
