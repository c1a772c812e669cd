//! Admin password hashing.
//!
//! Two stored formats are understood:
//! - bcrypt (`$2a$`, `$2b$`, `$2y$`), verified by the `bcrypt` crate;
//! - `scrypt$N$r$p$salt$key`, where `salt` is a hex string used as-is (its
//!   UTF-8 bytes feed the KDF) and `key` is the hex-encoded derived key.
//!
//! Verification fails closed: malformed hashes return `false`.

use rand::RngCore;
use scrypt::{scrypt, Params};
use subtle::ConstantTimeEq;

const SCRYPT_PREFIX: &str = "scrypt";
const SCRYPT_N: u64 = 16384;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;
const SCRYPT_KEY_LEN: usize = 64;
const SALT_LEN: usize = 16;

pub fn is_bcrypt_hash(value: &str) -> bool {
    value.starts_with("$2a$") || value.starts_with("$2b$") || value.starts_with("$2y$")
}

/// Hash a password with scrypt and the default work factors.
pub fn hash_password_scrypt(password: &str) -> String {
    let mut salt_bytes = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt_bytes);
    let salt = hex::encode(salt_bytes);

    let mut derived = vec![0u8; SCRYPT_KEY_LEN];
    // The default parameters are always accepted by the scrypt crate.
    if let Some(params) = scrypt_params(SCRYPT_N, SCRYPT_R, SCRYPT_P) {
        if scrypt(password.as_bytes(), salt.as_bytes(), &params, &mut derived).is_err() {
            tracing::error!("scrypt rejected default output length");
        }
    }

    [
        SCRYPT_PREFIX.to_string(),
        SCRYPT_N.to_string(),
        SCRYPT_R.to_string(),
        SCRYPT_P.to_string(),
        salt,
        hex::encode(derived),
    ]
    .join("$")
}

/// Check `password` against a stored hash in either supported format.
pub fn verify_password_hash(password: &str, hash: &str) -> bool {
    if hash.is_empty() {
        return false;
    }

    if is_bcrypt_hash(hash) {
        return bcrypt::verify(password, hash).unwrap_or(false);
    }

    if hash.starts_with("scrypt$") {
        return verify_scrypt_hash(password, hash);
    }

    false
}

fn verify_scrypt_hash(password: &str, hash: &str) -> bool {
    let parts: Vec<&str> = hash.split('$').collect();
    let [prefix, n, r, p, salt, stored_hex] = parts.as_slice() else {
        return false;
    };
    if *prefix != SCRYPT_PREFIX || [n, r, p, salt, stored_hex].iter().any(|s| s.is_empty()) {
        return false;
    }

    let (Ok(n), Ok(r), Ok(p)) = (n.parse::<u64>(), r.parse::<u32>(), p.parse::<u32>()) else {
        return false;
    };
    let Ok(stored) = hex::decode(stored_hex) else {
        return false;
    };
    if stored.is_empty() {
        return false;
    }
    let Some(params) = scrypt_params(n, r, p) else {
        return false;
    };

    let mut derived = vec![0u8; stored.len()];
    if scrypt(password.as_bytes(), salt.as_bytes(), &params, &mut derived).is_err() {
        return false;
    }

    derived.ct_eq(&stored).into()
}

/// Translate the stored cost `N` into scrypt's `log2(N)`; `N` must be a power of two above 1.
///
/// The output length is taken from the buffer handed to `scrypt`, not from the params.
fn scrypt_params(n: u64, r: u32, p: u32) -> Option<Params> {
    if n < 2 || !n.is_power_of_two() {
        return None;
    }
    let log_n = u8::try_from(n.trailing_zeros()).ok()?;
    Params::new(log_n, r, p, Params::RECOMMENDED_LEN).ok()
}
