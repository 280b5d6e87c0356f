use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::IdentityError;
use crate::application::services::{ExportError, PipelineError};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors surfaced to HTTP callers. Internal detail stays in the logs.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    NotReady(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::NotReady(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(error: PipelineError) -> Self {
        match error {
            PipelineError::Validation(e) => ApiError::Validation(e.to_string()),
            other => {
                tracing::error!(error = %other, "Pipeline failure");
                ApiError::Internal("Document processing failed".to_string())
            }
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(error: ExportError) -> Self {
        match error {
            ExportError::NotFound(_) => ApiError::NotFound("Document not found".to_string()),
            ExportError::NotReady { .. } => ApiError::NotReady("Brief not ready".to_string()),
            other => {
                tracing::error!(error = %other, "Export failure");
                ApiError::Internal("Export failed".to_string())
            }
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(error: IdentityError) -> Self {
        match error {
            IdentityError::InvalidToken => ApiError::Unauthorized("Invalid token".to_string()),
            IdentityError::Unavailable(detail) => {
                tracing::error!(error = %detail, "Identity provider unavailable");
                ApiError::Unavailable("Identity provider unavailable".to_string())
            }
        }
    }
}
