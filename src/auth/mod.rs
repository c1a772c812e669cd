pub mod cookie;
pub mod credentials;
pub mod password;
pub mod session;

pub use cookie::{clear_session_cookie, extract_session_token, session_cookie, ADMIN_SESSION_COOKIE};
pub use credentials::{
    validate_admin_credentials, validate_login_payload, CredentialCheck, LoginPayload, INVALID_CREDENTIALS,
};
pub use password::{hash_password_scrypt, verify_password_hash};
pub use session::{SessionClaims, SessionCodec, SessionPayload};
