//! Signed admin session tokens.
//!
//! A token is `base64url(json) "." base64url(hmac_sha256(secret, body))`.
//! The JSON body carries the admin identity and an absolute expiry in unix
//! seconds. Verification never errors: anything that is not a valid, unexpired
//! token yields `None`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::database::models::AdminRole;

type HmacSha256 = Hmac<Sha256>;

/// Identity embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub email: String,
    pub role: AdminRole,
}

/// Decoded, verified session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    #[serde(flatten)]
    pub claims: SessionClaims,
    pub exp: i64,
}

/// Wire shape used while decoding so that missing fields can be rejected
/// without a deserialization error leaking out.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPayload {
    user_id: Option<String>,
    tenant_id: Option<String>,
    email: Option<String>,
    role: Option<AdminRole>,
    exp: Option<i64>,
}

#[derive(Clone)]
pub struct SessionCodec {
    secret: Vec<u8>,
    ttl_secs: i64,
}

impl std::fmt::Debug for SessionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCodec")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl SessionCodec {
    pub fn new(secret: impl AsRef<[u8]>, ttl_secs: i64) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    pub fn create(&self, claims: SessionClaims) -> String {
        self.create_at(claims, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (unix seconds).
    pub fn create_at(&self, claims: SessionClaims, now: i64) -> String {
        let payload = SessionPayload {
            claims,
            exp: now.saturating_add(self.ttl_secs),
        };
        // Serializing plain strings, uuids and integers cannot fail.
        let json = serde_json::to_vec(&payload).unwrap_or_default();
        let body = URL_SAFE_NO_PAD.encode(json);
        let signature = self.sign(&body);
        format!("{body}.{signature}")
    }

    pub fn verify(&self, token: &str) -> Option<SessionPayload> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as if the current time were `now` (unix seconds).
    pub fn verify_at(&self, token: &str, now: i64) -> Option<SessionPayload> {
        let (body, signature) = token.split_once('.')?;
        if body.is_empty() || signature.is_empty() {
            return None;
        }

        let expected = self.sign(body);
        if signature.len() != expected.len() {
            return None;
        }
        if !bool::from(signature.as_bytes().ct_eq(expected.as_bytes())) {
            return None;
        }

        let decoded = URL_SAFE_NO_PAD.decode(body).ok()?;
        let raw: RawPayload = serde_json::from_slice(&decoded).ok()?;

        let user_id = raw.user_id.filter(|v| !v.is_empty())?;
        let tenant_id = raw.tenant_id.filter(|v| !v.is_empty())?;
        let email = raw.email.filter(|v| !v.is_empty())?;
        let role = raw.role?;
        let exp = raw.exp.filter(|v| *v != 0)?;

        if exp < now {
            return None;
        }

        Some(SessionPayload {
            claims: SessionClaims {
                user_id: Uuid::parse_str(&user_id).ok()?,
                tenant_id: Uuid::parse_str(&tenant_id).ok()?,
                email,
                role,
            },
            exp,
        })
    }

    fn sign(&self, body: &str) -> String {
        // HMAC accepts keys of any length.
        let mut mac = match HmacSha256::new_from_slice(&self.secret) {
            Ok(mac) => mac,
            Err(_) => return String::new(),
        };
        mac.update(body.as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }
}
