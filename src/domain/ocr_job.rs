use std::fmt;

use super::StoragePath;

/// Engine-assigned identifier of a submitted OCR operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrJobHandle(String);

impl OcrJobHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OcrJobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrJobStatus {
    Pending,
    Done,
    Failed(String),
}

/// Document text detection request over a staged PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrRequest {
    pub input: StoragePath,
    pub output_prefix: StoragePath,
    pub batch_size: u32,
}
