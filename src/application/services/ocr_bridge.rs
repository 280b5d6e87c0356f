//! OCR fallback for PDFs without a usable text layer.
//!
//! The PDF is staged in blob storage, an asynchronous text detection job is
//! submitted against it, and the job is polled until it settles. The job
//! writes one JSON artifact per page under a per-document output prefix.
//! Staged input and every output artifact are deleted before `run_ocr`
//! returns, whatever the outcome.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::Deserialize;

use crate::application::ports::{BlobStore, BlobStoreError, OcrEngine, OcrEngineError};
use crate::domain::{DocumentId, OcrJobHandle, OcrJobStatus, OcrRequest, StoragePath};

/// Returned when the job produced no output artifact.
pub const OCR_FAILED_SENTINEL: &str = "OCR processing failed.";
/// Returned when artifacts exist but contain no text.
pub const NO_TEXT_SENTINEL: &str = "No text could be extracted from the document.";

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(600);

const PAGES_PER_OUTPUT_FILE: u32 = 1;

pub struct OcrBridge {
    blob_store: Arc<dyn BlobStore>,
    ocr_engine: Arc<dyn OcrEngine>,
    poll_interval: Duration,
    poll_timeout: Duration,
}

impl OcrBridge {
    pub fn new(
        blob_store: Arc<dyn BlobStore>,
        ocr_engine: Arc<dyn OcrEngine>,
        poll_interval: Duration,
        poll_timeout: Duration,
    ) -> Self {
        Self {
            blob_store,
            ocr_engine,
            poll_interval,
            poll_timeout,
        }
    }

    #[tracing::instrument(skip(self, data), fields(document_id = %document_id, bytes = data.len()))]
    pub async fn run_ocr(&self, document_id: DocumentId, data: &[u8]) -> Result<String, OcrError> {
        let input = StoragePath::staged_input(&document_id);
        let output_prefix = StoragePath::staged_output_prefix(&document_id);

        let result = self.recognize(&input, &output_prefix, data).await;
        self.release_staged(&input, &output_prefix).await;

        result
    }

    async fn recognize(
        &self,
        input: &StoragePath,
        output_prefix: &StoragePath,
        data: &[u8],
    ) -> Result<String, OcrError> {
        self.blob_store
            .put(input, Bytes::copy_from_slice(data))
            .await
            .map_err(OcrError::Staging)?;

        let request = OcrRequest {
            input: input.clone(),
            output_prefix: output_prefix.clone(),
            batch_size: PAGES_PER_OUTPUT_FILE,
        };
        let handle = self.ocr_engine.submit(&request).await?;
        tracing::info!(job = %handle, "OCR job submitted");

        match self.wait_for_completion(&handle).await? {
            OcrJobStatus::Failed(reason) => {
                tracing::warn!(job = %handle, reason = %reason, "OCR job reported failure");
            }
            _ => tracing::info!(job = %handle, "OCR job completed"),
        }

        self.collect_output(output_prefix).await
    }

    async fn wait_for_completion(&self, handle: &OcrJobHandle) -> Result<OcrJobStatus, OcrError> {
        tokio::time::timeout(self.poll_timeout, self.poll_until_settled(handle))
            .await
            .map_err(|_| OcrError::Timeout(self.poll_timeout))?
    }

    async fn poll_until_settled(&self, handle: &OcrJobHandle) -> Result<OcrJobStatus, OcrError> {
        let mut polls: u32 = 0;
        loop {
            polls += 1;
            match self.ocr_engine.poll(handle).await? {
                OcrJobStatus::Pending => {
                    tracing::debug!(job = %handle, polls, "OCR job pending");
                    tokio::time::sleep(self.poll_interval).await;
                }
                settled => return Ok(settled),
            }
        }
    }

    async fn collect_output(&self, output_prefix: &StoragePath) -> Result<String, OcrError> {
        let mut artifacts: Vec<StoragePath> = self
            .blob_store
            .list(output_prefix)
            .await
            .map_err(OcrError::Staging)?
            .into_iter()
            .filter(|p| p.as_str().ends_with(".json"))
            .collect();

        if artifacts.is_empty() {
            tracing::error!(prefix = %output_prefix, "OCR output not found");
            return Ok(OCR_FAILED_SENTINEL.to_string());
        }

        artifacts.sort_by(|a, b| {
            (first_page(a.file_name()), a.as_str()).cmp(&(first_page(b.file_name()), b.as_str()))
        });

        let mut text = String::new();
        for artifact in &artifacts {
            let raw = self
                .blob_store
                .fetch(artifact)
                .await
                .map_err(OcrError::Staging)?;

            match serde_json::from_slice::<AnnotationOutput>(&raw) {
                Ok(output) => text.push_str(&output.text()),
                Err(e) => {
                    tracing::warn!(artifact = %artifact, error = %e, "Skipping unreadable OCR artifact");
                }
            }
        }

        if text.trim().is_empty() {
            tracing::warn!(prefix = %output_prefix, "No text extracted via OCR");
            return Ok(NO_TEXT_SENTINEL.to_string());
        }

        Ok(text)
    }

    async fn release_staged(&self, input: &StoragePath, output_prefix: &StoragePath) {
        match self.blob_store.delete(input).await {
            Ok(()) | Err(BlobStoreError::NotFound(_)) => {}
            Err(e) => tracing::warn!(path = %input, error = %e, "Failed to delete staged OCR input"),
        }

        let outputs = match self.blob_store.list(output_prefix).await {
            Ok(outputs) => outputs,
            Err(e) => {
                tracing::warn!(prefix = %output_prefix, error = %e, "Failed to list OCR output");
                return;
            }
        };

        for path in outputs {
            if let Err(e) = self.blob_store.delete(&path).await {
                tracing::warn!(path = %path, error = %e, "Failed to delete OCR output");
            }
        }
    }
}

/// `output-3-to-3.json` -> 3. Unrecognized names sort last.
fn first_page(file_name: &str) -> u32 {
    file_name
        .strip_prefix("output-")
        .and_then(|rest| rest.split("-to-").next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(u32::MAX)
}

/// One OCR output artifact.
#[derive(Debug, Deserialize)]
pub struct AnnotationOutput {
    #[serde(default)]
    pub responses: Vec<AnnotationResponse>,
}

#[derive(Debug, Deserialize)]
pub struct AnnotationResponse {
    #[serde(rename = "fullTextAnnotation")]
    pub full_text_annotation: Option<FullTextAnnotation>,
}

#[derive(Debug, Deserialize)]
pub struct FullTextAnnotation {
    #[serde(default)]
    pub text: String,
}

impl AnnotationOutput {
    /// Each response's text followed by a newline.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for response in &self.responses {
            if let Some(annotation) = &response.full_text_annotation {
                text.push_str(&annotation.text);
            }
            text.push('\n');
        }
        text
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("staging: {0}")]
    Staging(BlobStoreError),
    #[error("ocr engine: {0}")]
    Engine(#[from] OcrEngineError),
    #[error("ocr job did not finish within {0:?}")]
    Timeout(Duration),
}
