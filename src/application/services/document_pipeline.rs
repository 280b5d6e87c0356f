use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{BlobStore, BlobStoreError, DocumentRepository, RepositoryError};
use crate::domain::{
    Document, DocumentId, DocumentStatus, ExtractionResult, GeneratedBrief, StoragePath, UserId,
};

use super::brief_generator::{BriefGenerationError, BriefGenerator};
use super::ocr_bridge::{OcrBridge, OcrError};
use super::text_extractor::{Extraction, ExtractionError, TextExtractor};

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub struct Upload {
    pub filename: String,
    pub data: Bytes,
}

/// Upload → native extraction → OCR when needed → generation → persistence.
pub struct DocumentPipeline {
    text_extractor: TextExtractor,
    ocr_bridge: OcrBridge,
    brief_generator: BriefGenerator,
    blob_store: Arc<dyn BlobStore>,
    repository: Arc<dyn DocumentRepository>,
    max_upload_bytes: usize,
}

impl DocumentPipeline {
    pub fn new(
        text_extractor: TextExtractor,
        ocr_bridge: OcrBridge,
        brief_generator: BriefGenerator,
        blob_store: Arc<dyn BlobStore>,
        repository: Arc<dyn DocumentRepository>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            text_extractor,
            ocr_bridge,
            brief_generator,
            blob_store,
            repository,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Rejects uploads that are not PDFs by name or exceed the size limit.
    pub fn validate(&self, filename: &str, size: usize) -> Result<(), ValidationError> {
        if !filename.to_ascii_lowercase().ends_with(".pdf") {
            return Err(ValidationError::NotPdf(filename.to_string()));
        }
        if size > self.max_upload_bytes {
            return Err(ValidationError::TooLarge {
                size,
                limit: self.max_upload_bytes,
            });
        }
        Ok(())
    }

    #[tracing::instrument(skip(self, upload), fields(owner = %owner, filename = %upload.filename))]
    pub async fn process(&self, owner: &UserId, upload: Upload) -> Result<DocumentId, PipelineError> {
        self.validate(&upload.filename, upload.data.len())?;

        let document = Document::new(owner.clone(), upload.filename);
        let id = document.id;
        self.repository.create(&document).await?;
        tracing::info!(document_id = %id, bytes = upload.data.len(), "Processing document");

        let outcome = self.run_stages(owner, id, &upload.data).await;

        let status = match &outcome {
            Ok(generated) => DocumentStatus::Completed(generated.clone()),
            Err(e) => DocumentStatus::Failed {
                error: e.to_string(),
            },
        };

        if let Err(e) = self.brief_generator.persist(owner, id, &status).await {
            tracing::error!(document_id = %id, error = %e, "Failed to persist document status");
            if outcome.is_ok() {
                return Err(PipelineError::Repository(e));
            }
        }

        match outcome {
            Ok(_) => {
                tracing::info!(document_id = %id, "Document processing completed");
                Ok(id)
            }
            Err(e) => {
                tracing::error!(document_id = %id, error = %e, "Document processing failed");
                Err(e)
            }
        }
    }

    async fn run_stages(
        &self,
        owner: &UserId,
        id: DocumentId,
        data: &Bytes,
    ) -> Result<GeneratedBrief, PipelineError> {
        let original = StoragePath::original_upload(owner, &id);
        self.blob_store
            .put(&original, data.clone())
            .await
            .map_err(PipelineError::Storage)?;

        let extraction = match self.text_extractor.extract(data).await? {
            Extraction::Native(result) => {
                tracing::info!(document_id = %id, "Text extracted natively");
                result
            }
            Extraction::OcrRequired { native_chars } => {
                tracing::info!(document_id = %id, native_chars, "Low text detected, using OCR");
                ExtractionResult::ocr(self.ocr_bridge.run_ocr(id, data).await?)
            }
        };

        tracing::debug!(method = %extraction.method, chars = extraction.text.len(), "Extraction finished");

        Ok(self.brief_generator.generate(&extraction.text).await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Only PDF files allowed")]
    NotPdf(String),
    #[error("File too large ({size} bytes, limit {limit})")]
    TooLarge { size: usize, limit: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
    #[error("extraction: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("ocr: {0}")]
    Ocr(#[from] OcrError),
    #[error("generation: {0}")]
    Generation(#[from] BriefGenerationError),
    #[error("storage: {0}")]
    Storage(BlobStoreError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}
