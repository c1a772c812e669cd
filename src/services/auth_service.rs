use std::sync::Arc;

use super::ServiceError;
use crate::auth::{validate_admin_credentials, CredentialCheck, SessionClaims, SessionCodec, SessionPayload};
use crate::config::AppConfig;
use crate::database::models::{AdminRole, AdminUser, Tenant};
use crate::database::repository::AdminRepository;
use crate::database::DatabaseError;

/// Admin identity resolved from a valid session cookie.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub session: SessionPayload,
    pub user: AdminUser,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: AdminUser,
    pub token: String,
}

/// Login and session hydration.
#[derive(Clone, Debug)]
pub struct AuthService {
    admins: AdminRepository,
    codec: SessionCodec,
    config: Arc<AppConfig>,
}

impl AuthService {
    pub fn new(admins: AdminRepository, codec: SessionCodec, config: Arc<AppConfig>) -> Self {
        Self { admins, codec, config }
    }

    pub fn codec(&self) -> &SessionCodec {
        &self.codec
    }

    /// Check a login attempt against the configured admin account.
    ///
    /// Returns the normalized email and the hash to store for the account.
    pub fn check_credentials(&self, email: &str, password: &str) -> Result<(String, String), ServiceError> {
        let check = validate_admin_credentials(
            &self.config.security,
            self.config.is_production(),
            email,
            password,
        );

        match check {
            CredentialCheck::Valid {
                email,
                password_hash_for_storage,
            } => Ok((email, password_hash_for_storage)),
            CredentialCheck::Invalid { reason } => {
                tracing::warn!("Rejected admin login: {}", reason);
                Err(ServiceError::Unauthorized(reason.to_string()))
            }
        }
    }

    /// Upsert the tenant's admin account and issue a session token for it.
    pub async fn open_session(
        &self,
        tenant: &Tenant,
        email: &str,
        password_hash: &str,
    ) -> Result<LoginResult, DatabaseError> {
        let user = self
            .admins
            .upsert(tenant.id, email, password_hash, AdminRole::SuperAdmin)
            .await?;

        let token = self.codec.create(SessionClaims {
            user_id: user.id,
            tenant_id: user.tenant_id,
            email: user.email.clone(),
            role: user.role,
        });

        tracing::info!("Admin {} logged in for {}", user.email, tenant.domain);
        Ok(LoginResult { user, token })
    }

    /// Resolve a token to a live admin account.
    ///
    /// `None` when the token does not verify, the account is gone, or the
    /// account's tenant or email no longer match the token.
    pub async fn authenticate(&self, token: &str) -> Result<Option<AuthenticatedAdmin>, DatabaseError> {
        let Some(session) = self.codec.verify(token) else {
            return Ok(None);
        };

        let Some(user) = self.admins.find_by_id(session.claims.user_id).await? else {
            tracing::warn!("Session for unknown admin {}", session.claims.user_id);
            return Ok(None);
        };

        if user.tenant_id != session.claims.tenant_id || user.email != session.claims.email {
            tracing::warn!("Session claims no longer match admin {}", user.id);
            return Ok(None);
        }

        Ok(Some(AuthenticatedAdmin { session, user }))
    }
}
