use std::io::Write;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{PdfTextLoader, PdfTextLoaderError};

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(60);

/// Reads the embedded text layer with `pdf_oxide`.
#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn read_pages(path: &Path) -> Result<Vec<String>, PdfTextLoaderError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| PdfTextLoaderError::Malformed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc
            .page_count()
            .map_err(|e| PdfTextLoaderError::Malformed(format!("failed to read page count: {e}")))?;

        let mut pages = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            match doc.extract_text(page_index) {
                Ok(text) => pages.push(text),
                Err(e) => {
                    tracing::warn!(page = page_index + 1, error = %e, "Page has no readable text layer");
                    pages.push(String::new());
                }
            }
        }

        Ok(pages)
    }
}

#[async_trait]
impl PdfTextLoader for PdfAdapter {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>, PdfTextLoaderError> {
        if !data.starts_with(b"%PDF") {
            return Err(PdfTextLoaderError::Malformed(
                "missing %PDF header".to_string(),
            ));
        }

        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            PdfTextLoaderError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(data).map_err(|e| {
            PdfTextLoaderError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();

        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::read_pages(&temp_path)),
        )
        .await
        .map_err(|_| PdfTextLoaderError::Timeout)?
        .map_err(|e| PdfTextLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");
        drop(temp_file);

        Ok(pages)
    }
}
