// handlers/protected/leads.rs - Lead listing and CSV export

use axum::{
    extract::{Query, State},
    http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Json, Response},
    Extension,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiResult;
use crate::leads::{export_filename, leads_to_csv, parse_limit, LeadFilter, MAX_LIST_LIMIT};
use crate::middleware::AdminContext;

#[derive(Debug, Default, Deserialize)]
pub struct LeadQuery {
    pub q: Option<String>,
    pub source: Option<String>,
    pub limit: Option<String>,
}

/// GET /api/admin/leads?q=&source=&limit= - Newest leads first
///
/// `limit` defaults to 100 and is clamped to 1..=500.
pub async fn leads_list(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Query(query): Query<LeadQuery>,
) -> ApiResult<Json<Value>> {
    let filter = LeadFilter::new(
        query.q.as_deref(),
        query.source.as_deref(),
        parse_limit(query.limit.as_deref()),
    );
    let leads = state.leads.list(ctx.tenant.id, &filter).await?;
    Ok(Json(json!({ "leads": leads })))
}

/// GET /api/admin/leads/export?q=&source= - Up to 500 leads as a CSV attachment
pub async fn leads_export(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Query(query): Query<LeadQuery>,
) -> ApiResult<Response> {
    let filter = LeadFilter::new(query.q.as_deref(), query.source.as_deref(), Some(MAX_LIST_LIMIT));
    let leads = state.leads.list(ctx.tenant.id, &filter).await?;

    let disposition = format!("attachment; filename=\"{}\"", export_filename(Utc::now()));
    tracing::info!("Exporting {} leads for {}", leads.len(), ctx.tenant.domain);

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, disposition),
            (CACHE_CONTROL, "no-store".to_string()),
        ],
        leads_to_csv(&leads),
    )
        .into_response())
}
