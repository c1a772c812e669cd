//! Admin credential validation against the configured account.

use serde_json::Value;

use crate::auth::password::{hash_password_scrypt, verify_password_hash};
use crate::config::SecurityConfig;
use crate::validation::{required_email, ValidationErrors};

pub const INVALID_CREDENTIALS: &str = "Credenciales invalidas";
const MISSING_ADMIN_EMAIL: &str = "ADMIN_EMAIL no esta configurado";
const MISSING_SECRET: &str =
    "Configura ADMIN_PASSWORD_HASH (produccion) o ADMIN_PASSWORD_PLAIN (solo desarrollo)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialCheck {
    Valid {
        email: String,
        password_hash_for_storage: String,
    },
    Invalid {
        reason: &'static str,
    },
}

/// Body of `POST /api/admin/login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Shape check only: a well-formed email and a non-empty password.
pub fn validate_login_payload(value: &Value) -> Result<LoginPayload, ValidationErrors> {
    if !value.is_object() {
        return Err(ValidationErrors::form("Se esperaba un objeto"));
    }

    let mut errors = ValidationErrors::new();
    let email = required_email(&mut errors, "email", value.get("email").and_then(Value::as_str));
    let password = value
        .get("password")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    if password.is_empty() {
        errors.add("password", "Campo requerido");
    }

    errors.into_result(LoginPayload { email, password })
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check a login attempt against `ADMIN_EMAIL` and the configured secret.
///
/// A configured hash always wins. The plaintext fallback is only honoured
/// outside production and produces a fresh scrypt hash for storage.
pub fn validate_admin_credentials(
    security: &SecurityConfig,
    is_production: bool,
    email: &str,
    password: &str,
) -> CredentialCheck {
    let Some(expected_email) = security.admin_email.as_deref().map(normalize_email) else {
        return CredentialCheck::Invalid { reason: MISSING_ADMIN_EMAIL };
    };

    let email = normalize_email(email);
    if email != expected_email {
        return CredentialCheck::Invalid { reason: INVALID_CREDENTIALS };
    }

    if let Some(configured_hash) = security.admin_password_hash.as_deref().map(str::trim) {
        if !configured_hash.is_empty() {
            return if verify_password_hash(password, configured_hash) {
                CredentialCheck::Valid {
                    email,
                    password_hash_for_storage: configured_hash.to_string(),
                }
            } else {
                CredentialCheck::Invalid { reason: INVALID_CREDENTIALS }
            };
        }
    }

    match security.admin_password_plain.as_deref() {
        Some(plain) if !is_production && !plain.is_empty() => {
            if password != plain {
                return CredentialCheck::Invalid { reason: INVALID_CREDENTIALS };
            }
            CredentialCheck::Valid {
                email,
                password_hash_for_storage: hash_password_scrypt(plain),
            }
        }
        _ => CredentialCheck::Invalid { reason: MISSING_SECRET },
    }
}
