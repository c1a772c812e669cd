// handlers/mod.rs - HTTP handlers grouped by access level
//
// public:    no session required (site content, lead form, login/logout)
// protected: backoffice, requires a valid admin session for the request's tenant

pub mod protected;
pub mod public;

use axum::body::Bytes;
use serde_json::Value;

/// Parse a JSON request body leniently: anything unparseable becomes `null`
/// and is rejected by the payload validators with a form-level issue.
pub(crate) fn json_body(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}
