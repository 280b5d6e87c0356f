use std::sync::Arc;

use crate::application::ports::{PdfTextLoader, PdfTextLoaderError};
use crate::domain::ExtractionResult;

pub const DEFAULT_MIN_NATIVE_CHARS: usize = 500;

/// Outcome of the native pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Native(ExtractionResult),
    /// The text layer is too thin to trust; OCR must run.
    OcrRequired { native_chars: usize },
}

pub struct TextExtractor {
    loader: Arc<dyn PdfTextLoader>,
    min_native_chars: usize,
}

impl TextExtractor {
    pub fn new(loader: Arc<dyn PdfTextLoader>, min_native_chars: usize) -> Self {
        Self {
            loader,
            min_native_chars,
        }
    }

    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn extract(&self, data: &[u8]) -> Result<Extraction, ExtractionError> {
        let pages = self.loader.extract_pages(data).await?;
        let page_count = pages.len();

        let mut text = String::new();
        for page in &pages {
            text.push_str(page);
            text.push('\n');
        }

        let native_chars = text.trim().chars().count();
        tracing::debug!(page_count, native_chars, "Native text layer read");

        if native_chars < self.min_native_chars {
            return Ok(Extraction::OcrRequired { native_chars });
        }

        Ok(Extraction::Native(ExtractionResult::native(text)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("pdf could not be parsed: {0}")]
    Unparsable(#[from] PdfTextLoaderError),
}
