use std::fmt;

use super::{DocumentId, UserId};

const STAGING_PREFIX: &str = "temp";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct StoragePath(String);

impl StoragePath {
    /// Permanent location of an uploaded PDF: `{user}/{doc}.pdf`.
    pub fn original_upload(owner: &UserId, document_id: &DocumentId) -> Self {
        Self(format!("{}/{}.pdf", owner.as_str(), document_id.as_uuid()))
    }

    /// Staged OCR input: `temp/{doc}.pdf`.
    pub fn staged_input(document_id: &DocumentId) -> Self {
        Self(format!("{}/{}.pdf", STAGING_PREFIX, document_id.as_uuid()))
    }

    /// Staged OCR output prefix: `temp/{doc}_ocr/`.
    pub fn staged_output_prefix(document_id: &DocumentId) -> Self {
        Self(format!("{}/{}_ocr/", STAGING_PREFIX, document_id.as_uuid()))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final path segment, e.g. `output-1-to-1.json`.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
