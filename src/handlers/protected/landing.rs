// handlers/protected/landing.rs - Draft editing, publishing and publish history

use axum::{
    body::Bytes,
    extract::State,
    response::Json,
    Extension,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiResult;
use crate::handlers::json_body;
use crate::middleware::AdminContext;

/// Snapshots shown in the backoffice history panel.
const PUBLISH_HISTORY_LIMIT: i64 = 30;

/// GET /api/admin/landing - Current draft (seeded from the template on first access)
pub async fn landing_get(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
) -> ApiResult<Json<Value>> {
    let landing = state.content.get_draft(ctx.tenant.id).await?;
    Ok(Json(json!({ "landing": landing })))
}

/// PUT /api/admin/landing - Replace the draft
///
/// Expected Input:
/// ```json
/// { "data": { "heroSlider": [...], "features": [...], "faq": [...], "contact": {...} },
///   "seo": { "title": "...", "description": "...", "ogTitle": "...", "ogDescription": "..." } }
/// ```
///
/// 400 `{error: "Payload invalido", issues}` leaves the stored draft untouched.
pub async fn landing_put(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let landing = state
        .content
        .save_draft(ctx.tenant.id, &json_body(&body), ctx.admin.user.id)
        .await?;

    tracing::info!("Draft saved for {} by {}", ctx.tenant.domain, ctx.admin.user.email);
    Ok(Json(json!({ "ok": true, "landing": landing })))
}

/// POST /api/admin/publish - Promote the draft and record a snapshot
pub async fn publish(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
) -> ApiResult<Json<Value>> {
    let result = state.content.publish(&ctx.tenant, ctx.admin.user.id).await?;
    Ok(Json(json!({
        "ok": true,
        "published": result.published,
        "snapshot": result.snapshot,
    })))
}

/// GET /api/admin/publishes - Newest snapshots first
pub async fn publishes(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
) -> ApiResult<Json<Value>> {
    let publishes = state
        .content
        .list_publishes(ctx.tenant.id, Some(PUBLISH_HISTORY_LIMIT))
        .await?;
    Ok(Json(json!({ "publishes": publishes })))
}
