use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::services::Upload;
use crate::presentation::auth::AuthenticatedUser;
use crate::presentation::error::ApiError;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ProcessDocumentResponse {
    #[serde(rename = "docId")]
    pub doc_id: String,
}

#[tracing::instrument(skip(state, user, multipart), fields(user = %user.0))]
pub async fn process_document_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let upload = read_upload(multipart).await?;
    tracing::info!(filename = %upload.filename, bytes = upload.data.len(), "Upload accepted");

    let doc_id = state.pipeline.process(&user.0, upload).await?;

    Ok((
        StatusCode::OK,
        Json(ProcessDocumentResponse {
            doc_id: doc_id.to_string(),
        }),
    ))
}

/// Takes the first multipart field that carries a filename.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                tracing::warn!("Process request with no file");
                return Err(ApiError::Validation("No file uploaded".to_string()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return Err(ApiError::Validation(format!(
                    "Failed to read upload: {}",
                    e.body_text()
                )));
            }
        };

        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let data = field.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read file bytes");
            ApiError::Validation(format!("Failed to read upload: {}", e.body_text()))
        })?;

        return Ok(Upload { filename, data });
    }
}
