// handlers/public/leads.rs - POST /api/leads handler

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::handlers::json_body;
use crate::leads::{screen_lead, LeadSubmission};

const LEAD_STORE_FAILED: &str = "No se pudo registrar el lead";

/// POST /api/leads - Public contact form
///
/// A filled-in `website` field marks a bot: the answer is `{ok: true}` and
/// nothing is stored.
///
/// Expected Output:
/// ```json
/// { "ok": true, "leadId": "uuid" }
/// ```
pub async fn lead_create(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> ApiResult<Json<Value>> {
    let payload = json_body(&body);

    let lead = match screen_lead(&payload) {
        Ok(LeadSubmission::Valid(lead)) => lead,
        Ok(LeadSubmission::Ignored) => {
            tracing::debug!("Honeypot lead ignored");
            return Ok(Json(json!({ "ok": true })));
        }
        Err(issues) => return Err(ApiError::validation_error("Payload inválido", issues)),
    };

    let tenant = state.tenants.resolve(&headers).await.map_err(|e| {
        tracing::error!("Error resolviendo tenant para lead: {}", e);
        ApiError::internal_server_error(LEAD_STORE_FAILED)
    })?;

    let id = state.leads.create(tenant.id, &lead).await.map_err(|e| {
        tracing::error!("Error registrando lead: {}", e);
        ApiError::internal_server_error(LEAD_STORE_FAILED)
    })?;

    tracing::info!("Lead {} registered for {}", id, tenant.domain);
    Ok(Json(json!({ "ok": true, "leadId": id })))
}
