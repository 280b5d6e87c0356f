use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;

use crate::domain::DocumentId;
use crate::presentation::auth::AuthenticatedUser;
use crate::presentation::error::ApiError;
use crate::presentation::state::AppState;

#[tracing::instrument(skip(state, user), fields(user = %user.0))]
pub async fn export_brief_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(doc_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    // Ids that are not UUIDs cannot exist under any user.
    let id: DocumentId = doc_id
        .parse()
        .map_err(|_| ApiError::NotFound("Document not found".to_string()))?;

    let exported = state.exporter.export(&user.0, id).await?;

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, exported.content_type.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename={}", exported.filename),
            ),
        ],
        exported.content,
    ))
}
