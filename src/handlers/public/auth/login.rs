// handlers/public/auth/login.rs - POST /api/admin/login handler

use axum::{
    body::Bytes,
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::app::AppState;
use crate::auth::{session_cookie, validate_login_payload};
use crate::error::{ApiError, ApiResult};
use crate::handlers::json_body;

/// POST /api/admin/login - Exchange the admin credentials for a session cookie
///
/// Credentials are checked before the tenant is resolved, so a rejected
/// login never touches the database.
///
/// Expected Input:
/// ```json
/// { "email": "admin@example.com", "password": "..." }
/// ```
///
/// Expected Output:
/// ```json
/// { "ok": true, "user": { "email": "admin@example.com", "role": "SUPER_ADMIN" } }
/// ```
pub async fn login(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> ApiResult<Response> {
    let payload = validate_login_payload(&json_body(&body))?;
    let (email, password_hash) = state.auth.check_credentials(&payload.email, &payload.password)?;

    let tenant = state.tenants.resolve(&headers).await?;
    let session = state.auth.open_session(&tenant, &email, &password_hash).await?;

    let cookie = session_cookie(
        &session.token,
        state.auth.codec().ttl_secs(),
        state.config.security.secure_cookies,
    )
    .ok_or_else(|| ApiError::internal_server_error("No se pudo crear la sesion"))?;

    let body = Json(json!({
        "ok": true,
        "user": {
            "email": session.user.email,
            "role": session.user.role,
        }
    }));

    Ok(([(SET_COOKIE, cookie)], body).into_response())
}
