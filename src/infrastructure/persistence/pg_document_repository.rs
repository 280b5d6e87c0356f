use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{DocumentRepository, RepositoryError};
use crate::domain::{Document, DocumentId, DocumentStatus, GeneratedBrief, UserId};

pub struct PgDocumentRepository {
    pool: PgPool,
}

impl PgDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct DocumentRow {
    id: Uuid,
    user_id: String,
    filename: String,
    status: String,
    facts: Option<String>,
    analysis: Option<String>,
    brief: Option<String>,
    error: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DocumentRow> for Document {
    type Error = RepositoryError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        let status = match (row.status.as_str(), row.facts, row.analysis, row.brief) {
            ("processing", ..) => DocumentStatus::Processing,
            ("completed", Some(facts), Some(analysis), Some(brief)) => {
                DocumentStatus::Completed(GeneratedBrief {
                    facts,
                    analysis,
                    brief,
                })
            }
            ("failed", ..) => DocumentStatus::Failed {
                error: row.error.unwrap_or_default(),
            },
            (other, ..) => {
                return Err(RepositoryError::QueryFailed(format!(
                    "inconsistent document row {}: status {}",
                    row.id, other
                )));
            }
        };

        Ok(Document {
            id: DocumentId::from_uuid(row.id),
            owner: UserId::new(row.user_id),
            filename: row.filename,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    #[instrument(skip(self, document), fields(document_id = %document.id))]
    async fn create(&self, document: &Document) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO documents (id, user_id, filename, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(document.id.as_uuid())
        .bind(document.owner.as_str())
        .bind(&document.filename)
        .bind(document.status.as_str())
        .bind(document.created_at)
        .bind(document.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(owner = %owner, document_id = %id))]
    async fn get(
        &self,
        owner: &UserId,
        id: DocumentId,
    ) -> Result<Option<Document>, RepositoryError> {
        let row: Option<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, filename, status, facts, analysis, brief, error, created_at, updated_at
            FROM documents
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(owner.as_str())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.map(Document::try_from).transpose()
    }

    #[instrument(skip(self, status), fields(owner = %owner, document_id = %id, status = status.as_str()))]
    async fn update_status(
        &self,
        owner: &UserId,
        id: DocumentId,
        status: &DocumentStatus,
    ) -> Result<(), RepositoryError> {
        let (facts, analysis, brief, error) = match status {
            DocumentStatus::Processing => {
                return Err(RepositoryError::InvalidTransition(
                    "cannot move a document back to processing".to_string(),
                ));
            }
            DocumentStatus::Completed(generated) => (
                Some(generated.facts.as_str()),
                Some(generated.analysis.as_str()),
                Some(generated.brief.as_str()),
                None,
            ),
            DocumentStatus::Failed { error } => (None, None, None, Some(error.as_str())),
        };

        let result = sqlx::query(
            r#"
            UPDATE documents
            SET status = $1, facts = $2, analysis = $3, brief = $4, error = $5, updated_at = $6
            WHERE user_id = $7 AND id = $8 AND status = 'processing'
            "#,
        )
        .bind(status.as_str())
        .bind(facts)
        .bind(analysis)
        .bind(brief)
        .bind(error)
        .bind(Utc::now())
        .bind(owner.as_str())
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        if result.rows_affected() == 0 {
            return match self.get(owner, id).await? {
                Some(_) => Err(RepositoryError::InvalidTransition(format!(
                    "document {id} is already terminal"
                ))),
                None => Err(RepositoryError::NotFound(id.to_string())),
            };
        }

        Ok(())
    }
}
