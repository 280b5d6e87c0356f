use async_trait::async_trait;

/// Native (non-OCR) PDF text layer reader.
#[async_trait]
pub trait PdfTextLoader: Send + Sync {
    /// Returns the text of every page in page order. Pages without a text
    /// layer yield an empty string.
    async fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>, PdfTextLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PdfTextLoaderError {
    #[error("malformed pdf: {0}")]
    Malformed(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("extraction timed out")]
    Timeout,
}
