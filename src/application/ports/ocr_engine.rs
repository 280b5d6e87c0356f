use async_trait::async_trait;

use crate::domain::{OcrJobHandle, OcrJobStatus, OcrRequest};

/// Asynchronous document text detection service.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn submit(&self, request: &OcrRequest) -> Result<OcrJobHandle, OcrEngineError>;

    async fn poll(&self, handle: &OcrJobHandle) -> Result<OcrJobStatus, OcrEngineError>;
}

#[derive(Debug, thiserror::Error)]
pub enum OcrEngineError {
    #[error("submit failed: {0}")]
    SubmitFailed(String),
    #[error("poll failed: {0}")]
    PollFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
