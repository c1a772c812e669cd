//! Session cookie helpers.

use axum::http::{header::COOKIE, HeaderMap, HeaderValue};

pub const ADMIN_SESSION_COOKIE: &str = "admin_session";

/// Build the `Set-Cookie` value carrying a session token.
pub fn session_cookie(token: &str, ttl_secs: i64, secure: bool) -> Option<HeaderValue> {
    let mut cookie = format!(
        "{ADMIN_SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_secs}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).ok()
}

/// Build the `Set-Cookie` value that clears the session.
pub fn clear_session_cookie(secure: bool) -> HeaderValue {
    if secure {
        HeaderValue::from_static("admin_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0; Secure")
    } else {
        HeaderValue::from_static("admin_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }
}

/// Read the session token from the `Cookie` header(s). Empty values count as absent.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name.trim() == ADMIN_SESSION_COOKIE).then(|| percent_decode(value.trim()))
        })
        .filter(|token| !token.is_empty())
}

/// Minimal `%XX` decoding; tokens are base64url so this only matters for clients
/// that escape the dot.
fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let Some(Ok(byte)) = value.get(i + 1..i + 3).map(|hex| u8::from_str_radix(hex, 16)) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
