// handlers/public/uploads.rs - GET /uploads/*path handler

use axum::{
    extract::{Path, State},
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::uploads::{content_type_for, resolve_upload_path, IMMUTABLE_CACHE_CONTROL};

/// GET /uploads/*path - Serve a stored upload with long-lived cache headers
///
/// Unsafe paths are a 400; anything that cannot be read is a 404.
pub async fn upload_get(State(state): State<AppState>, Path(path): Path<String>) -> ApiResult<Response> {
    let file_path = resolve_upload_path(state.uploads.root(), &path)?;

    let bytes = tokio::fs::read(&file_path).await.map_err(|e| {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("Could not read upload {}: {}", file_path.display(), e);
        }
        ApiError::not_found("Archivo no encontrado")
    })?;

    let headers = [
        (CONTENT_TYPE, content_type_for(&file_path)),
        (CACHE_CONTROL, IMMUTABLE_CACHE_CONTROL),
    ];
    Ok((headers, bytes).into_response())
}
