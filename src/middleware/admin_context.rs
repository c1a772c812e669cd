use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::auth::extract_session_token;
use crate::database::models::Tenant;
use crate::error::ApiError;
use crate::services::AuthenticatedAdmin;

/// Tenant and admin resolved for a backoffice request, injected as an extension.
#[derive(Clone, Debug)]
pub struct AdminContext {
    pub tenant: Tenant,
    pub admin: AuthenticatedAdmin,
}

/// Resolve the request's tenant and the session's admin, in parallel.
///
/// 401 when the token is invalid or the account is gone; 403 when the
/// account belongs to a different tenant than the request host.
pub async fn admin_context_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let resolved = resolve_admin_context(&state, request.headers()).await;
    match resolved {
        Ok(context) => {
            request.extensions_mut().insert(context);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

async fn resolve_admin_context(state: &AppState, headers: &HeaderMap) -> Result<AdminContext, ApiError> {
    let token = extract_session_token(headers).ok_or_else(ApiError::unauthorized)?;

    let (tenant, admin) = tokio::join!(state.tenants.resolve(headers), state.auth.authenticate(&token));
    let tenant = tenant?;
    let admin = admin?.ok_or_else(ApiError::unauthorized)?;

    if admin.user.tenant_id != tenant.id {
        tracing::warn!(
            "Admin {} belongs to another tenant than {}",
            admin.user.email,
            tenant.domain
        );
        return Err(ApiError::forbidden());
    }

    Ok(AdminContext { tenant, admin })
}
