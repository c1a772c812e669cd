// handlers/public/auth/logout.rs - POST /api/admin/logout handler

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::app::AppState;
use crate::auth::clear_session_cookie;

/// POST /api/admin/logout - Clear the session cookie. Always succeeds.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = clear_session_cookie(state.config.security.secure_cookies);
    ([(SET_COOKIE, cookie)], Json(json!({ "ok": true })))
}
