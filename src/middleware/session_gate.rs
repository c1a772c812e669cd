use axum::{extract::Request, middleware::Next, response::{IntoResponse, Response}};

use crate::auth::extract_session_token;
use crate::error::ApiError;

const ADMIN_API_PREFIX: &str = "/api/admin";

/// Admin endpoints reachable without a session.
const OPEN_ADMIN_PATHS: [&str; 2] = ["/api/admin/login", "/api/admin/logout"];

/// True for paths that require the session cookie to be present.
pub fn requires_session(path: &str) -> bool {
    let path = path.trim_end_matches('/');
    let under_admin = path == ADMIN_API_PREFIX || path.starts_with("/api/admin/");
    under_admin && !OPEN_ADMIN_PATHS.contains(&path)
}

/// Edge check: reject admin API calls that carry no session cookie at all.
///
/// Only presence is checked here; the token itself is verified when the
/// admin context is resolved.
pub async fn require_admin_session(request: Request, next: Next) -> Response {
    if requires_session(request.uri().path()) && extract_session_token(request.headers()).is_none() {
        tracing::debug!("Missing admin session for {}", request.uri().path());
        return ApiError::unauthorized().into_response();
    }

    next.run(request).await
}
