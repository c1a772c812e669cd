// handlers/protected/upload.rs - POST /api/admin/upload handler

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Json,
    Extension,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AdminContext;
use crate::uploads::{UploadKind, UploadRequest};

struct UploadedFile {
    mime_type: String,
    bytes: Bytes,
}

/// POST /api/admin/upload - Optimize an image and store it for the tenant
///
/// Multipart fields: `file` (required) and `kind` (`generic`, anything else
/// is treated as a hero image).
///
/// Expected Output:
/// ```json
/// { "ok": true, "file": { "url": "/uploads/...", "contentType": "image/webp",
///   "sizeBytes": 12345, "width": 1920, "height": 1080 } }
/// ```
pub async fn upload(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<Value>> {
    let mut multipart = multipart.map_err(|e| {
        tracing::warn!("Rejected upload form: {}", e);
        ApiError::bad_request("Formulario inválido")
    })?;

    let invalid_form = |e: axum::extract::multipart::MultipartError| {
        tracing::warn!("Rejected upload form: {}", e);
        ApiError::bad_request("Formulario inválido")
    };

    let mut file: Option<UploadedFile> = None;
    let mut kind: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let mime_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(invalid_form)?;
                file = Some(UploadedFile { mime_type, bytes });
            }
            Some("kind") => {
                kind = Some(field.text().await.map_err(invalid_form)?);
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| ApiError::bad_request("Adjunta un archivo válido"))?;

    let stored = state
        .uploads
        .store(UploadRequest {
            tenant_domain: ctx.tenant.domain.clone(),
            mime_type: file.mime_type,
            size_bytes: file.bytes.len() as u64,
            bytes: file.bytes,
            kind: UploadKind::parse(kind.as_deref()),
        })
        .await?;

    tracing::info!("Upload {} stored by {}", stored.url, ctx.admin.user.email);
    Ok(Json(json!({ "ok": true, "file": stored })))
}
